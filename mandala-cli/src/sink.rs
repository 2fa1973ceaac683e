use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use mandala_engine::{Frame, FrameSink};
use mandala_layout::calendar::YearGrid;
use parking_lot::RwLock;
use tokio::sync::Notify;

use crate::render::MandalaRenderer;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Prints every frame to stdout, optionally stopping after a number of frames.
pub struct TerminalSink<W = io::Stdout> {
    renderer: MandalaRenderer,
    calendar: RwLock<Option<YearGrid>>,
    out: parking_lot::Mutex<W>,
    clear_screen: bool,
    limit: Option<u64>,
    rendered: AtomicU64,
    finished: Notify,
}

impl TerminalSink {
    pub fn stdout(renderer: MandalaRenderer, clear_screen: bool, limit: Option<u64>) -> Self {
        Self::with_writer(io::stdout(), renderer, clear_screen, limit)
    }
}

impl<W: Write + Send + 'static> TerminalSink<W> {
    pub fn with_writer(
        out: W,
        renderer: MandalaRenderer,
        clear_screen: bool,
        limit: Option<u64>,
    ) -> Self {
        Self {
            renderer,
            calendar: RwLock::new(None),
            out: parking_lot::Mutex::new(out),
            clear_screen,
            limit,
            rendered: AtomicU64::new(0),
            finished: Notify::new(),
        }
    }

    /// Resolves once the frame limit is reached; never without a limit.
    pub async fn finished(&self) {
        self.finished.notified().await;
    }

    pub fn rendered(&self) -> u64 {
        self.rendered.load(Ordering::Relaxed)
    }

    fn write_frame(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        if self.clear_screen {
            out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(out, "{text}")?;
        out.flush()
    }
}

#[async_trait]
impl<W: Write + Send + 'static> FrameSink for TerminalSink<W> {
    async fn on_frame(&self, frame: &Frame) -> Result<(), String> {
        if self.limit.is_some_and(|limit| self.rendered() >= limit) {
            return Ok(());
        }

        let text = self.renderer.render(self.calendar.read().as_ref(), Some(frame));
        self.write_frame(&text).map_err(|err| err.to_string())?;

        let rendered = self.rendered.fetch_add(1, Ordering::Relaxed) + 1;
        if self.limit == Some(rendered) {
            self.finished.notify_one();
        }
        Ok(())
    }

    async fn on_calendar(&self, grid: &YearGrid) -> Result<(), String> {
        *self.calendar.write() = Some(grid.clone());
        Ok(())
    }
}
