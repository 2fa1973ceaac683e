use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use clap::{Args, Parser, Subcommand};
use mandala_core::config::load_config;
use mandala_core::logging::init_tracing;
use mandala_core::serde_utils::{to_compact_json, to_pretty_json};
use mandala_core::MandalaConfig;
use mandala_engine::{FrameBuilder, SystemTimeSource, Ticker};
use mandala_layout::calendar::CalendarLayoutBuilder;
use mandala_layout::face::ClockFace;
use mandala_layout::locale::Locale;
use serde::Serialize;
use tracing::{debug, info};

mod output;
mod render;
mod sink;

use output::{calendar_report, clock_report, face_report};
use render::MandalaRenderer;
use sink::TerminalSink;

#[derive(Parser)]
#[command(name = "mandala")]
#[command(about = "Mandala clock - hand angles and a radial year calendar", long_about = None)]
struct Cli {
    /// TOML configuration file; MANDALA_* environment variables are used otherwise
    #[arg(long, global = true, env = "MANDALA_CONFIG")]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hand angles for now or for a given time
    Clock(ClockArgs),
    /// Lay out the radial calendar of a year
    Calendar(CalendarArgs),
    /// Print the numerals of the clock face
    Face(FaceArgs),
    /// Render the mandala in the terminal on every tick
    Run(RunArgs),
    /// Show version information
    Version,
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Print the JSON on a single line
    #[arg(long, default_value_t = false, requires = "json")]
    compact: bool,
}

impl OutputArgs {
    fn print<T: Serialize>(&self, value: &T, report: impl FnOnce(&T) -> String) -> Result<()> {
        let text = match (self.json, self.compact) {
            (true, true) => to_compact_json(value)?,
            (true, false) => to_pretty_json(value)?,
            (false, _) => report(value),
        };
        println!("{text}");
        Ok(())
    }
}

#[derive(Args)]
struct ClockArgs {
    /// Local time as HH:MM:SS
    #[arg(long, value_parser = parse_time)]
    at: Option<NaiveTime>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct CalendarArgs {
    /// Day to highlight, defaults to today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// First day of the laid out year, defaults to January 1st of --date
    #[arg(long, value_parser = parse_date)]
    year_start: Option<NaiveDate>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct FaceArgs {
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct RunArgs {
    /// Stop after this many frames instead of waiting for Ctrl-C
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,
    #[arg(long, default_value_t = 120)]
    width: usize,
    #[arg(long, default_value_t = 60)]
    height: usize,
    /// Append frames instead of redrawing the screen
    #[arg(long, default_value_t = false)]
    no_clear: bool,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .map_err(|err| format!("expected HH:MM:SS: {err}"))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    if let Commands::Version = cli.command {
        println!("Mandala v{}", env!("CARGO_PKG_VERSION"));
        println!("Clock hands and a radial year calendar");
        return Ok(());
    }

    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let locale = Locale::for_language_or_default(&config.language);
    locale.validate()?;
    debug!(language = %config.language, "configuration loaded");

    match cli.command {
        Commands::Clock(args) => clock(&config, args)?,
        Commands::Calendar(args) => calendar(&config, &locale, args)?,
        Commands::Face(args) => args.output.print(&ClockFace::build(&config.face), face_report)?,
        Commands::Run(args) => run(config, locale, args).await?,
        Commands::Version => {}
    }

    Ok(())
}

fn clock(config: &MandalaConfig, args: ClockArgs) -> Result<()> {
    let now = Local::now().fixed_offset();
    let at = match args.at {
        Some(time) => now
            .offset()
            .from_local_datetime(&now.date_naive().and_time(time))
            .single()
            .context("time does not exist in the local zone")?,
        None => now,
    };

    let frame = FrameBuilder::new(config.hands).build(at);
    args.output.print(&frame, clock_report)
}

fn calendar(config: &MandalaConfig, locale: &Locale, args: CalendarArgs) -> Result<()> {
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let grid =
        CalendarLayoutBuilder::new(&config.calendar, locale).build_year_grid(today, args.year_start);
    args.output.print(&grid, |grid| calendar_report(grid, locale))
}

async fn run(config: MandalaConfig, locale: Locale, args: RunArgs) -> Result<()> {
    let renderer = MandalaRenderer::new(&config, args.width, args.height);
    let sink = Arc::new(TerminalSink::stdout(renderer, !args.no_clear, args.frames));

    let mut ticker = Ticker::new(config, locale, Arc::new(SystemTimeSource));
    ticker.start(sink.clone());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    tokio::select! {
        _ = sink.finished(), if args.frames.is_some() => {
            info!(frames = sink.rendered(), "frame limit reached");
        }
        result = &mut ctrl_c => {
            result.context("failed to listen for Ctrl-C")?;
            info!("interrupted");
        }
    }

    ticker.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn compact_output_needs_json() {
        let err = Cli::try_parse_from(["mandala", "face", "--compact"])
            .err()
            .expect("--compact alone is rejected");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["mandala", "calendar", "--json", "--compact"])
            .expect("parses");
        match cli.command {
            Commands::Calendar(args) => assert!(args.output.json && args.output.compact),
            _ => panic!("expected the calendar command"),
        }
    }

    #[test]
    fn clock_time_and_calendar_dates_are_parsed() {
        assert_eq!(parse_time("09:30:05"), Ok(NaiveTime::from_hms_opt(9, 30, 5).unwrap()));
        assert!(parse_time("9h30").is_err());
        assert_eq!(parse_date("2040-12-31"), Ok(NaiveDate::from_ymd_opt(2040, 12, 31).unwrap()));
    }
}
