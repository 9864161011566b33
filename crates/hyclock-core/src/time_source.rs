use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta};

/// Supplier of wall-clock time.
pub trait TimeSource: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the host clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Time source that only moves when told to.
///
/// Clones share the same instant, so a test can keep one clone and hand the
/// other to a widget.
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    instant: Arc<Mutex<DateTime<Local>>>,
}

impl ManualTimeSource {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self {
            instant: Arc::new(Mutex::new(instant)),
        }
    }

    pub fn set(&self, instant: DateTime<Local>) {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut guard = self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
