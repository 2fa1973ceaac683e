// Tests covering the tick engine against scripted clocks and sinks.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use mandala::{Frame, FrameSink, Locale, MandalaConfig, Ticker, YearGrid};
use mandala_engine::{EngineError, FixedTimeSource};
use mockall::mock;

mock! {
    pub Sink {}

    #[async_trait]
    impl FrameSink for Sink {
        async fn on_frame(&self, frame: &Frame) -> Result<(), String>;
        async fn on_calendar(&self, grid: &YearGrid) -> Result<(), String>;
    }
}

fn config() -> MandalaConfig {
    MandalaConfig {
        tick_interval_ms: 10,
        ..MandalaConfig::default()
    }
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid timestamp")
}

#[tokio::test(start_paused = true)]
async fn sink_receives_a_new_calendar_after_new_year() {
    let mut sink = MockSink::new();
    sink.expect_on_calendar()
        .withf(|grid| grid.year == 2024)
        .times(1)
        .returning(|_| Ok(()));
    sink.expect_on_calendar()
        .withf(|grid| grid.year == 2025 && grid.today_cell().is_some())
        .times(1)
        .returning(|_| Ok(()));
    sink.expect_on_frame().returning(|_| Ok(()));

    // half an hour per tick: 23:00, 23:30, 00:00, 00:30
    let source = Arc::new(FixedTimeSource::stepping(
        at(2024, 12, 31, 23, 0),
        chrono::Duration::minutes(30),
    ));
    let mut ticker = Ticker::new(config(), Locale::english(), source);
    let handle = ticker.handle();
    ticker.start(Arc::new(sink));

    tokio::time::sleep(Duration::from_millis(35)).await;
    ticker.shutdown().await.expect("clean shutdown");

    let stats = handle.stats();
    assert_eq!(stats.ticks, 4);
    assert_eq!(stats.calendar_rebuilds, 2);
    assert_eq!(stats.sink_failures, 0);
    assert_eq!(
        handle.latest_frame().map(|frame| frame.digital),
        Some("00:30:00".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn failing_sink_does_not_stop_the_clock() {
    let mut sink = MockSink::new();
    sink.expect_on_calendar()
        .returning(|_| Err("calendar surface gone".to_string()));
    sink.expect_on_frame()
        .returning(|_| Err("frame surface gone".to_string()));

    let source = Arc::new(FixedTimeSource::stepping(
        at(2024, 6, 1, 8, 0),
        chrono::Duration::seconds(1),
    ));
    let mut ticker = Ticker::new(config(), Locale::english(), source);
    let handle = ticker.handle();
    ticker.start(Arc::new(sink));

    tokio::time::sleep(Duration::from_millis(45)).await;
    ticker.shutdown().await.expect("clean shutdown");

    let stats = handle.stats();
    assert_eq!(stats.ticks, 5);
    assert_eq!(stats.calendar_rebuilds, 1);
    assert_eq!(stats.sink_failures, stats.ticks + 1);
    assert_eq!(handle.calendar().map(|grid| grid.year), Some(2024));
    assert_eq!(
        handle.latest_frame().map(|frame| frame.digital),
        Some("08:00:04".to_string())
    );
}

#[tokio::test]
async fn shutdown_twice_is_an_error() {
    let mut sink = MockSink::new();
    sink.expect_on_calendar().returning(|_| Ok(()));
    sink.expect_on_frame().returning(|_| Ok(()));

    let source = Arc::new(FixedTimeSource::new(at(2024, 6, 1, 8, 0)));
    let mut ticker = Ticker::new(MandalaConfig::default(), Locale::english(), source);
    ticker.start(Arc::new(sink));

    ticker.shutdown().await.expect("first shutdown");
    assert!(matches!(
        ticker.shutdown().await,
        Err(EngineError::AlreadyStopped)
    ));
    assert!(!ticker.handle().is_running());
}
