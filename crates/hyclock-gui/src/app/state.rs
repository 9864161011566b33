use std::sync::{Arc, Mutex};

use hyclock_core::{
    ModuleContext,
    event_bus::{EventReceiver, EventSender},
    modules::clock::{self, ClockWidget},
};
use hyclock_proto::config::Config;
use iced::Task;
use tokio::runtime::Handle;

use super::{bus::BusFlushOutcome, micro_ticker::MicroTicker};

pub struct App {
    pub(super) bus_receiver: Arc<Mutex<EventReceiver>>,
    pub(super) micro_ticker: MicroTicker,
    pub(super) module_context: ModuleContext,
    pub config: Config,
    pub clock: ClockWidget,
}

#[derive(Debug, Clone)]
pub enum Message {
    None,
    MicroTick,
    BusFlushed(BusFlushOutcome),
    Clock(clock::Message),
}

impl App {
    pub fn new(
        (config, event_sender, runtime_handle, bus_receiver): (
            Config,
            EventSender,
            Handle,
            EventReceiver,
        ),
    ) -> impl FnOnce() -> (Self, Task<Message>) {
        move || {
            let mut app = App {
                bus_receiver: Arc::new(Mutex::new(bus_receiver)),
                micro_ticker: MicroTicker::default(),
                module_context: ModuleContext::new(event_sender, runtime_handle),
                clock: ClockWidget::new(),
                config,
            };

            app.register_modules();

            (app, Task::none())
        }
    }
}
