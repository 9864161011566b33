use std::sync::Mutex;

use hyclock_core::event_bus::{BusEvent, EventReceiver};
use log::error;

#[derive(Debug, Clone, Default)]
pub struct BusFlushOutcome {
    events:    Vec<BusEvent>,
    had_error: bool
}

impl BusFlushOutcome {
    pub(super) fn had_error(&self) -> bool {
        self.had_error
    }

    pub(super) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(super) fn into_events(self) -> Vec<BusEvent> {
        self.events
    }
}

/// Pops everything currently queued. Stops early on the first read error and
/// reports it through [`BusFlushOutcome::had_error`].
pub(super) fn drain_bus(receiver: &Mutex<EventReceiver>) -> BusFlushOutcome {
    let mut guard = match receiver.lock() {
        Ok(guard) => guard,
        Err(err) => {
            error!("event bus receiver poisoned: {err}");
            return BusFlushOutcome {
                events:    Vec::new(),
                had_error: true
            };
        }
    };

    let mut outcome = BusFlushOutcome::default();

    loop {
        match guard.try_recv() {
            Ok(Some(event)) => outcome.events.push(event),
            Ok(None) => break,
            Err(err) => {
                error!("failed to read event bus payload: {err}");
                outcome.had_error = true;
                break;
            }
        }
    }

    outcome
}
