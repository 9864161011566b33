//! Owned handle to a periodic background callback.

use std::time::Duration;

use log::debug;
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at}
};

/// A callback fired on a fixed period until the handle is cancelled or dropped.
///
/// The first firing happens one full period after [`spawn`](Self::spawn), never
/// immediately. Dropping the handle aborts the task, so the callback cannot run
/// after the owner is gone.
#[derive(Debug)]
#[must_use = "dropping the handle cancels the task"]
pub struct RecurringTask {
    period: Duration,
    handle: JoinHandle<()>
}

impl RecurringTask {
    /// Spawns `on_tick` on `runtime`, firing every `period`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::time::Duration;
    /// # use hyclock_core::recurring::RecurringTask;
    /// # let runtime = tokio::runtime::Runtime::new().expect("runtime");
    /// let task = RecurringTask::spawn(runtime.handle(), Duration::from_secs(1), || {});
    /// task.cancel();
    /// ```
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static
    {
        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                on_tick();
            }
        });

        debug!("recurring task started with period {period:?}");

        Self {
            period,
            handle
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Cancels the task. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RecurringTask {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("recurring task with period {:?} cancelled", self.period);
    }
}
