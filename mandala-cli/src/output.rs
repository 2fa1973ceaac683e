use colored::Colorize;
use mandala_engine::Frame;
use mandala_layout::calendar::{YearGrid, RINGS, WEEKS};
use mandala_layout::clock::HandKind;
use mandala_layout::face::{ClockFace, Numeral};
use mandala_layout::locale::Locale;

use crate::render::{cell_paint, Paint};

fn hand_name(kind: HandKind) -> &'static str {
    match kind {
        HandKind::Hour => "hour",
        HandKind::Minute => "minute",
        HandKind::Second => "second",
    }
}

pub fn clock_report(frame: &Frame) -> String {
    let mut lines = vec![format!("{} {}", "time  ".bold(), frame.digital)];
    for hand in frame.hands.visible() {
        let (x, y) = hand.tip_offset();
        lines.push(format!(
            "{} {:>9.5} rad  tip ({:>8.2}, {:>8.2})  width {:.1}  cap {:.2}",
            format!("{:<6}", hand_name(hand.kind)).cyan(),
            hand.angle_radians,
            x,
            y,
            hand.width_pixels,
            hand.cap_radius()
        ));
    }
    lines.push(format!("{} {}", "zulu  ".bold(), frame.zulu));
    lines.join("\n")
}

/// One row per week, one column per day ring.
pub fn calendar_report(grid: &YearGrid, locale: &Locale) -> String {
    let mut lines = Vec::with_capacity(WEEKS as usize + 3);

    let last = grid
        .last_date()
        .map(|date| date.to_string())
        .unwrap_or_else(|| "-".to_string());
    lines.push(format!(
        "{} {}  start offset {}  last date {}",
        "year".bold(),
        grid.year,
        grid.start_offset,
        last
    ));

    let band: String = grid
        .ring_band
        .iter()
        .map(|glyph| {
            let paint = match glyph.month_index {
                None => Paint::Year,
                Some(month) if glyph.is_current_month => Paint::CurrentMonth(month),
                Some(month) => Paint::Month(month),
            };
            paint.apply(&glyph.glyph.to_string()).to_string()
        })
        .collect();
    lines.push(band);

    let header: String = (0..RINGS as usize)
        .map(|ring| format!("{:>4}", locale.day(ring).unwrap_or("")))
        .collect();
    lines.push(format!("{:>4}{}", "", header).dimmed().to_string());

    for week in 0..WEEKS {
        let label = grid
            .week_labels
            .get(week as usize)
            .map(|label| label.label.as_str())
            .unwrap_or("");
        let mut row = format!("{label:>4}").dimmed().to_string();
        for ring in 0..RINGS {
            let cell = grid.cell(week, ring);
            let text = match cell.and_then(|cell| cell_paint(cell).map(|paint| (cell, paint))) {
                Some((cell, paint)) => paint.apply(&format!("{:>4}", cell.label)).to_string(),
                None => "    ".to_string(),
            };
            row.push_str(&text);
        }
        lines.push(row);
    }

    lines.join("\n")
}

pub fn face_report(face: &ClockFace) -> String {
    let ring = |name: &str, numerals: &[Numeral]| {
        let labels: Vec<&str> = numerals.iter().map(|n| n.label.as_str()).collect();
        format!(
            "{} r={:<6} {}",
            format!("{name:<8}").bold(),
            numerals.first().map_or(0.0, |n| n.radius_pixels),
            labels.join(" ")
        )
    };

    [
        ring("minutes", &face.minutes),
        ring("24h", &face.hours_24),
        ring("12h", &face.hours_12),
    ]
    .join("\n")
}
