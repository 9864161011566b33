use hyclock_core::{
    event_bus::{BusEvent, ModuleEvent},
    modules::{Module, ModuleError},
};
use iced::{Subscription, Task, time};
use log::{debug, error, warn};

use super::{
    bus::drain_bus,
    state::{App, Message},
};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MicroTick => {
                let outcome = drain_bus(&self.bus_receiver);
                self.update(Message::BusFlushed(outcome))
            }
            Message::BusFlushed(outcome) => {
                if outcome.had_error() {
                    error!("failed to drain event bus, keeping fast cadence");
                }
                self.micro_ticker
                    .observe(outcome.had_error() || !outcome.is_empty());

                let tasks: Vec<_> = outcome
                    .into_events()
                    .into_iter()
                    .filter_map(App::message_from_bus_event)
                    .map(|msg| self.update(msg))
                    .collect();

                Task::batch(tasks)
            }
            Message::None => Task::none(),
            Message::Clock(message) => {
                self.clock.update(message);
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        time::every(self.micro_ticker.interval()).map(|_| Message::MicroTick)
    }

    /// Mounts the clock with the configured format, falling back to the
    /// default format when the configuration is rejected.
    pub(crate) fn register_modules(&mut self) {
        debug!("registering clock module");

        match self.clock.register(&self.module_context, &self.config.clock) {
            Ok(()) => {}
            Err(err @ ModuleError::Registration { .. }) => {
                warn!("Failed to register clock module: {err}, using default format");

                if let Err(err) = self.clock.mount(&self.module_context) {
                    error!("Failed to mount clock module: {err}");
                }
            }
            Err(err) => error!("Clock mounted without initial redraw: {err}"),
        }
    }

    fn message_from_bus_event(event: BusEvent) -> Option<Message> {
        match event {
            BusEvent::Redraw => Some(Message::None),
            BusEvent::Module(ModuleEvent::Clock(message)) => Some(Message::Clock(message)),
            _ => None,
        }
    }
}
