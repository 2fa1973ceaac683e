use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use mandala_core::MandalaConfig;
use mandala_layout::calendar::{CalendarLayoutBuilder, YearGrid};
use mandala_layout::locale::Locale;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::error::EngineError;
use crate::frame::{Frame, FrameBuilder};
use crate::source::TimeSource;

/// Consumer of the geometry produced on each tick.
#[async_trait]
pub trait FrameSink: Send + Sync + 'static {
    async fn on_frame(&self, frame: &Frame) -> Result<(), String>;

    /// Called on the first tick and whenever the calendar date changes.
    async fn on_calendar(&self, grid: &YearGrid) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerStats {
    pub ticks: u64,
    pub calendar_rebuilds: u64,
    pub sink_failures: u64,
}

#[derive(Default)]
struct Shared {
    latest_frame: RwLock<Option<Frame>>,
    calendar: RwLock<Option<YearGrid>>,
    ticks: AtomicU64,
    calendar_rebuilds: AtomicU64,
    sink_failures: AtomicU64,
    started: AtomicBool,
    shutting_down: AtomicBool,
    notify: Notify,
}

/// Read-only view of a running ticker.
#[derive(Clone)]
pub struct TickerHandle {
    shared: Arc<Shared>,
}

impl TickerHandle {
    pub fn stats(&self) -> TickerStats {
        TickerStats {
            ticks: self.shared.ticks.load(Ordering::Relaxed),
            calendar_rebuilds: self.shared.calendar_rebuilds.load(Ordering::Relaxed),
            sink_failures: self.shared.sink_failures.load(Ordering::Relaxed),
        }
    }

    pub fn latest_frame(&self) -> Option<Frame> {
        self.shared.latest_frame.read().clone()
    }

    pub fn calendar(&self) -> Option<YearGrid> {
        self.shared.calendar.read().clone()
    }

    /// True between `start` and `shutdown`.
    pub fn is_running(&self) -> bool {
        self.shared.started.load(Ordering::Relaxed)
            && !self.shared.shutting_down.load(Ordering::Relaxed)
    }
}

/// Recurring task that recomputes the clock every tick.
///
/// Ticks follow a fixed cadence from the start instant; a tick that comes
/// due while the previous one is still running is skipped, never queued.
pub struct Ticker {
    config: MandalaConfig,
    locale: Locale,
    source: Arc<dyn TimeSource>,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(config: MandalaConfig, locale: Locale, source: Arc<dyn TimeSource>) -> Self {
        Self {
            config,
            locale,
            source,
            shared: Arc::new(Shared::default()),
            task: None,
        }
    }

    pub fn handle(&self) -> TickerHandle {
        TickerHandle {
            shared: self.shared.clone(),
        }
    }

    /// Spawns the tick loop on the current tokio runtime.
    pub fn start<S>(&mut self, sink: Arc<S>)
    where
        S: FrameSink,
    {
        if self.task.is_some() {
            warn!("ticker already started");
            return;
        }

        let context = TickContext {
            config: self.config.clone(),
            locale: self.locale.clone(),
            source: self.source.clone(),
        };
        let shared = self.shared.clone();

        info!(
            interval_ms = self.config.tick_interval_ms,
            "starting ticker"
        );
        self.shared.started.store(true, Ordering::Relaxed);
        self.task = Some(tokio::spawn(async move {
            tick_loop(context, shared, sink).await;
        }));
    }

    /// Stops the loop and waits for the in-flight tick to finish.
    pub async fn shutdown(&mut self) -> Result<(), EngineError> {
        let task = self.task.take().ok_or(EngineError::AlreadyStopped)?;
        self.shared.shutting_down.store(true, Ordering::Relaxed);
        self.shared.notify.notify_one();

        task.await.map_err(|err| {
            error!("ticker task crashed: {:?}", err);
            EngineError::Join(err.to_string())
        })?;
        info!(stats = ?self.handle().stats(), "ticker stopped");
        Ok(())
    }
}

struct TickContext {
    config: MandalaConfig,
    locale: Locale,
    source: Arc<dyn TimeSource>,
}

async fn tick_loop<S>(context: TickContext, shared: Arc<Shared>, sink: Arc<S>)
where
    S: FrameSink,
{
    let frames = FrameBuilder::new(context.config.hands);
    let calendar = CalendarLayoutBuilder::new(&context.config.calendar, &context.locale);
    let mut calendar_date: Option<NaiveDate> = None;

    let mut ticks = interval(context.config.tick_interval());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticks.tick() => {}
            _ = shared.notify.notified() => {}
        }

        if shared.shutting_down.load(Ordering::Relaxed) {
            break;
        }

        let now = context.source.now();
        let today = now.date_naive();

        if calendar_date != Some(today) {
            let grid = calendar.build_year_grid(today, None);
            info!(date = %today, year = grid.year, "calendar rebuilt");
            if let Err(err) = sink.on_calendar(&grid).await {
                shared.sink_failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %err, "calendar sink failed");
            }
            *shared.calendar.write() = Some(grid);
            shared.calendar_rebuilds.fetch_add(1, Ordering::Relaxed);
            calendar_date = Some(today);
        }

        let frame = frames.build(now);
        debug!(time = %frame.digital, "tick");
        if let Err(err) = sink.on_frame(&frame).await {
            shared.sink_failures.fetch_add(1, Ordering::Relaxed);
            warn!(error = %err, time = %frame.digital, "frame sink failed");
        }
        *shared.latest_frame.write() = Some(frame);
        shared.ticks.fetch_add(1, Ordering::Relaxed);
    }
}
