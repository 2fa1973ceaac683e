//! Radial year calendar.
//!
//! The year is laid out as 53 spokes of 7 cells. Ring 0 is the outermost
//! ring and holds Mondays; ring 6 is the innermost and holds Sundays. The
//! first spoke is padded with weekday labels up to January 1, and every
//! slot left over after December 31 becomes a weekday label too.
//!
//! A year opening on a Sunday starts at ring 0 without padding, so its
//! dates sit one ring early. That keeps 366 days inside the 371 slots.

mod band;

pub use band::{build_ring_band, BandGlyph};

use chrono::{Datelike, NaiveDate, Weekday};
use mandala_core::{CalendarGeometry, FillerLabels};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locale::Locale;

pub const WEEKS: u32 = 53;
pub const RINGS: u32 = 7;
pub const WEEK_LABELS: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellKind {
    Date { date: NaiveDate, month_index: u32 },
    Filler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    #[default]
    None,
    /// Date cell holding today's date.
    Today,
    /// Filler cell on today's weekday ring.
    CurrentWeekday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub week: u32,
    pub ring: u32,
    pub kind: CellKind,
    pub label: String,
    pub highlight: Highlight,
    pub angle_degrees: f64,
    pub radius_pixels: f64,
}

impl CalendarCell {
    pub fn is_filler(&self) -> bool {
        matches!(self.kind, CellKind::Filler)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self.kind {
            CellKind::Date { date, .. } => Some(date),
            CellKind::Filler => None,
        }
    }

    pub fn month_index(&self) -> Option<u32> {
        match self.kind {
            CellKind::Date { month_index, .. } => Some(month_index),
            CellKind::Filler => None,
        }
    }

    pub fn highlights_today(&self) -> bool {
        self.highlight == Highlight::Today
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLabel {
    pub week: u32,
    pub label: String,
    pub angle_degrees: f64,
    pub radius_pixels: f64,
}

/// Everything the renderer needs to draw one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearGrid {
    pub year: i32,
    /// Filler cells before January 1 in the first spoke.
    pub start_offset: u32,
    pub cells: Vec<CalendarCell>,
    pub week_labels: Vec<WeekLabel>,
    pub ring_band: Vec<BandGlyph>,
}

impl YearGrid {
    pub fn cell(&self, week: u32, ring: u32) -> Option<&CalendarCell> {
        if week >= WEEKS || ring >= RINGS {
            return None;
        }
        self.cells.get((week * RINGS + ring) as usize)
    }

    pub fn date_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|cell| !cell.is_filler())
    }

    pub fn filler_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|cell| cell.is_filler())
    }

    pub fn today_cell(&self) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.highlights_today())
    }

    /// Last date that found a slot in the grid.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.date_cells().filter_map(CalendarCell::date).last()
    }
}

/// Builds [`YearGrid`]s from a date and the calendar geometry.
pub struct CalendarLayoutBuilder<'a> {
    geometry: &'a CalendarGeometry,
    locale: &'a Locale,
}

impl<'a> CalendarLayoutBuilder<'a> {
    pub fn new(geometry: &'a CalendarGeometry, locale: &'a Locale) -> Self {
        Self { geometry, locale }
    }

    /// Distance of a day ring from the centre.
    pub fn ring_radius(&self, ring: u32) -> f64 {
        f64::from(RINGS - ring) * self.geometry.ring_spacing + self.geometry.base_offset
    }

    /// Lays out the year of `today`, or the year starting at `year_start_override`.
    ///
    /// `today` only decides highlighting once an override is given.
    pub fn build_year_grid(
        &self,
        today: NaiveDate,
        year_start_override: Option<NaiveDate>,
    ) -> YearGrid {
        let year_start = year_start_override.unwrap_or_else(|| {
            NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today)
        });
        let year = year_start.year();
        let start = leading_fillers(year_start);
        let today_ring = today.weekday().num_days_from_monday();

        let mut pointer = Some(year_start);
        let mut cells = Vec::with_capacity((WEEKS * RINGS) as usize);

        for week in 0..WEEKS {
            let angle_degrees = f64::from(week) * (360.0 / f64::from(WEEKS));
            for ring in 0..RINGS {
                let radius_pixels = self.ring_radius(ring);
                let current = pointer.filter(|date| date.year() <= year);

                let (kind, label, highlight) = match current {
                    Some(date) if !(week == 0 && ring < start) => {
                        pointer = date.succ_opt();
                        let highlight = if date == today {
                            Highlight::Today
                        } else {
                            Highlight::None
                        };
                        (
                            CellKind::Date {
                                date,
                                month_index: date.month0(),
                            },
                            date.day().to_string(),
                            highlight,
                        )
                    }
                    _ => {
                        let highlight = if ring == today_ring {
                            Highlight::CurrentWeekday
                        } else {
                            Highlight::None
                        };
                        (CellKind::Filler, self.filler_label(ring), highlight)
                    }
                };

                cells.push(CalendarCell {
                    week,
                    ring,
                    kind,
                    label,
                    highlight,
                    angle_degrees,
                    radius_pixels,
                });
            }
        }

        let week_labels = (0..WEEK_LABELS)
            .map(|week| WeekLabel {
                week,
                label: (week + 1).to_string(),
                angle_degrees: f64::from(week) * (360.0 / f64::from(WEEK_LABELS)),
                radius_pixels: self.geometry.week_label_radius,
            })
            .collect();

        let current_month = (today.year() == year).then(|| today.month0());
        let ring_band = build_ring_band(year, self.locale, current_month);

        let grid = YearGrid {
            year,
            start_offset: start,
            cells,
            week_labels,
            ring_band,
        };
        debug!(
            year,
            start_offset = start,
            last_date = ?grid.last_date(),
            "year grid built"
        );
        grid
    }

    fn filler_label(&self, ring: u32) -> String {
        let index = match self.geometry.filler_labels {
            FillerLabels::Aligned => Some(ring as usize),
            FillerLabels::Shifted => (ring as usize).checked_sub(1),
        };
        index
            .and_then(|index| self.locale.day(index))
            .unwrap_or_default()
            .to_string()
    }
}

/// Filler cells before `year_start` in the first spoke, Sunday counting as none.
pub fn leading_fillers(year_start: NaiveDate) -> u32 {
    match year_start.weekday() {
        Weekday::Sun => 0,
        weekday => weekday.num_days_from_monday(),
    }
}
