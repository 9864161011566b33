mod format;

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use hyclock_proto::config::ClockModuleConfig;
use log::{debug, error};

pub use format::{ClockFormat, ClockFormatError, capitalize_first};

use crate::{
    ModuleContext, ModuleEventSender,
    event_bus::ModuleEvent,
    modules::{Module, ModuleError},
    recurring::RecurringTask,
    time_source::{SystemTimeSource, TimeSource}
};

/// Refresh period while mounted.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Label exposed on the root display node.
pub const ACCESSIBILITY_LABEL: &str = "current time and date";

/// Latest sampled wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockData {
    pub current_time: DateTime<Local>
}

/// Everything a view needs to draw the clock block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockDisplay {
    pub label: &'static str,
    pub date:  String,
    pub time:  String
}

/// Message type for GUI communication
#[derive(Debug, Clone)]
pub enum Message {
    Tick(DateTime<Local>)
}

/// Clock widget state - business logic only, no GUI!
///
/// Owns at most one [`RecurringTask`]. The task is started by
/// [`mount`](Self::mount) and released by [`unmount`](Self::unmount) or when the
/// widget is dropped.
#[derive(Debug)]
pub struct ClockWidget {
    data:   ClockData,
    format: ClockFormat,
    source: Arc<dyn TimeSource>,
    task:   Option<RecurringTask>
}

impl Default for ClockWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockWidget {
    pub fn new() -> Self {
        Self::with_source(Arc::new(SystemTimeSource), ClockFormat::default())
    }

    /// Builds a widget that samples time from `source`.
    pub fn with_source(source: Arc<dyn TimeSource>, format: ClockFormat) -> Self {
        Self {
            data: ClockData {
                current_time: source.now()
            },
            format,
            source,
            task: None
        }
    }

    pub fn data(&self) -> &ClockData {
        &self.data
    }

    pub fn is_mounted(&self) -> bool {
        self.task.is_some()
    }

    pub fn set_format(&mut self, format: ClockFormat) {
        self.format = format;
    }

    /// Starts the refresh timer and asks for the initial redraw.
    ///
    /// Mounting an already mounted widget replaces its timer, so only one is
    /// ever live.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::EventBus`] when the initial redraw cannot be
    /// queued. The timer is running regardless.
    pub fn mount(&mut self, ctx: &ModuleContext) -> Result<(), ModuleError> {
        self.unmount();
        self.data.current_time = self.source.now();

        let sender: ModuleEventSender<Message> = ctx.module_sender(ModuleEvent::Clock);
        let source = Arc::clone(&self.source);

        self.task = Some(RecurringTask::spawn(
            ctx.runtime_handle(),
            TICK_INTERVAL,
            move || {
                if let Err(err) = sender.try_send(Message::Tick(source.now())) {
                    error!("Failed to publish clock tick: {err}");
                }
            }
        ));
        debug!("clock mounted");

        ctx.request_redraw()?;
        Ok(())
    }

    /// Cancels the refresh timer. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
            debug!("clock unmounted");
        }
    }

    /// Update clock state from GUI message.
    ///
    /// Ticks delivered after unmount were queued before the timer stopped and
    /// are dropped, as are ticks older than the time already shown (left over
    /// from a previous mount).
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Tick(now) => {
                if !self.is_mounted() {
                    debug!("dropping clock tick received while unmounted");
                } else if now < self.data.current_time {
                    debug!("dropping stale clock tick {now}");
                } else {
                    self.data.current_time = now;
                }
            }
        }
    }

    pub fn render(&self) -> ClockDisplay {
        let at = &self.data.current_time;

        ClockDisplay {
            label: ACCESSIBILITY_LABEL,
            date:  capitalize_first(&self.format.date(at)),
            time:  self.format.time(at)
        }
    }
}

impl Module for ClockWidget {
    type RegistrationData<'a> = &'a ClockModuleConfig;

    fn register(
        &mut self,
        ctx: &ModuleContext,
        config: Self::RegistrationData<'_>
    ) -> Result<(), ModuleError> {
        let format = ClockFormat::from_config(config)
            .map_err(|err| ModuleError::registration(err.to_string()))?;

        self.set_format(format);
        self.mount(ctx)
    }

    fn unregister(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use chrono::{TimeDelta, TimeZone};
    use tokio::{runtime::Handle, time::sleep};

    use super::*;
    use crate::{
        event_bus::{BusEvent, EventBus},
        time_source::ManualTimeSource
    };

    fn fixed() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .single()
            .expect("valid local time")
    }

    /// Wall clock anchored at [`fixed`] that advances with tokio's paused clock.
    #[derive(Debug)]
    struct PausedClock {
        base:  DateTime<Local>,
        start: tokio::time::Instant
    }

    impl PausedClock {
        fn new() -> Self {
            Self {
                base:  fixed(),
                start: tokio::time::Instant::now()
            }
        }
    }

    impl TimeSource for PausedClock {
        fn now(&self) -> DateTime<Local> {
            let elapsed = TimeDelta::from_std(self.start.elapsed()).expect("elapsed fits");
            self.base + elapsed
        }
    }

    fn setup(capacity: usize) -> (EventBus, ModuleContext) {
        let bus = EventBus::new(NonZeroUsize::new(capacity).expect("capacity"));
        let ctx = ModuleContext::new(bus.sender(), Handle::current());
        (bus, ctx)
    }

    fn paused_widget() -> ClockWidget {
        ClockWidget::with_source(Arc::new(PausedClock::new()), ClockFormat::default())
    }

    fn split(events: Vec<BusEvent>) -> (usize, Vec<DateTime<Local>>) {
        let mut redraws = 0;
        let mut ticks = Vec::new();

        for event in events {
            match event {
                BusEvent::Redraw => redraws += 1,
                BusEvent::Module(ModuleEvent::Clock(Message::Tick(at))) => ticks.push(at)
            }
        }

        (redraws, ticks)
    }

    #[test]
    fn fixed_timestamp_renders_time_and_capitalized_date() {
        let source = ManualTimeSource::new(fixed());
        let widget = ClockWidget::with_source(Arc::new(source), ClockFormat::default());

        let display = widget.render();

        assert_eq!(display.label, "current time and date");
        assert_eq!(display.time, "14:07:09");
        assert_eq!(display.date, "Вторник, 05 марта 2024");
        assert_eq!(widget.format.date(&fixed()), "вторник, 05 марта 2024");
    }

    #[test]
    fn english_locale_renders_full_names() {
        let format = ClockFormat::new("en_US", "%H:%M:%S", "%A, %B %d, %Y").expect("valid");
        let widget = ClockWidget::with_source(Arc::new(ManualTimeSource::new(fixed())), format);

        let display = widget.render();

        assert_eq!(display.date, "Tuesday, March 05, 2024");
        assert_eq!(display.time, "14:07:09");
    }

    #[test]
    fn construction_samples_the_source() {
        let widget = ClockWidget::with_source(
            Arc::new(ManualTimeSource::new(fixed())),
            ClockFormat::default()
        );

        assert_eq!(widget.data().current_time, fixed());
        assert!(!widget.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn displayed_time_changes_every_second() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        sleep(Duration::from_millis(3_500)).await;

        let (redraws, ticks) = split(bus.drain().expect("drain"));
        assert_eq!(redraws, 1);
        assert_eq!(ticks.len(), 3);

        let mut shown = vec![widget.render().time];
        for at in ticks {
            widget.update(Message::Tick(at));
            shown.push(widget.render().time);
        }

        assert_eq!(shown, ["14:07:09", "14:07:10", "14:07:11", "14:07:12"]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_updates_after_unmount() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        sleep(Duration::from_millis(1_500)).await;
        widget.unmount();

        let (_, queued) = split(bus.drain().expect("drain"));
        assert_eq!(queued.len(), 1);

        sleep(Duration::from_secs(5)).await;
        assert!(bus.drain().expect("drain").is_empty());

        let before = widget.data().current_time;
        widget.update(Message::Tick(queued[0]));
        assert_eq!(widget.data().current_time, before);
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_unmount_renders_once_and_never_fires() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        widget.unmount();
        sleep(Duration::from_secs(5)).await;

        let (redraws, ticks) = split(bus.drain().expect("drain"));
        assert_eq!(redraws, 1);
        assert!(ticks.is_empty());
        assert!(!widget.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn remounting_keeps_a_single_timer() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        for _ in 0..5 {
            widget.mount(&ctx).expect("mounted");
            widget.unmount();
        }
        widget.mount(&ctx).expect("mounted");
        widget.mount(&ctx).expect("mounted again");
        sleep(Duration::from_millis(2_500)).await;

        let (_, ticks) = split(bus.drain().expect("drain"));
        assert_eq!(ticks.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn remount_ignores_ticks_from_the_previous_mount() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        sleep(Duration::from_millis(1_500)).await;
        widget.unmount();
        sleep(Duration::from_secs(3)).await;
        widget.mount(&ctx).expect("mounted again");

        let remounted_at = widget.data().current_time;
        let (_, stale) = split(bus.drain().expect("drain"));
        assert_eq!(stale.len(), 1);

        widget.update(Message::Tick(stale[0]));

        assert_eq!(widget.data().current_time, remounted_at);
        assert_eq!(widget.render().time, "14:07:13");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_widget_cancels_the_timer() {
        let (bus, ctx) = setup(64);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        drop(widget);
        sleep(Duration::from_secs(5)).await;

        let (_, ticks) = split(bus.drain().expect("drain"));
        assert!(ticks.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn full_bus_does_not_stop_the_timer() {
        let (bus, ctx) = setup(1);
        let mut widget = paused_widget();

        widget.mount(&ctx).expect("mounted");
        sleep(Duration::from_millis(2_500)).await;

        let (redraws, ticks) = split(bus.drain().expect("drain"));
        assert_eq!(redraws, 1);
        assert!(ticks.is_empty());

        sleep(Duration::from_secs(1)).await;
        let (_, ticks) = split(bus.drain().expect("drain"));
        assert_eq!(ticks.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn register_applies_config_and_mounts() {
        let (_bus, ctx) = setup(8);
        let mut widget = paused_widget();
        let config = ClockModuleConfig {
            locale:      "en_US".to_owned(),
            time_format: "%H:%M".to_owned(),
            date_format: "%A".to_owned()
        };

        Module::register(&mut widget, &ctx, &config).expect("registered");

        assert!(widget.is_mounted());
        assert_eq!(widget.render().time, "14:07");
        assert_eq!(widget.render().date, "Tuesday");

        Module::unregister(&mut widget);
        assert!(!widget.is_mounted());
    }

    #[tokio::test(start_paused = true)]
    async fn register_rejects_unknown_locale() {
        let (_bus, ctx) = setup(8);
        let mut widget = paused_widget();
        let config = ClockModuleConfig {
            locale: "xx_YY".to_owned(),
            ..ClockModuleConfig::default()
        };

        let err = Module::register(&mut widget, &ctx, &config).unwrap_err();

        assert!(matches!(err, ModuleError::Registration { .. }));
        assert!(!widget.is_mounted());
    }
}
