//! Character-grid rendering of the mandala.
//!
//! Geometry arrives in pixels around a centre point; the canvas scales it
//! down to terminal cells, which are roughly twice as tall as they are wide.

use colored::{Color, ColoredString, Colorize};
use mandala_core::MandalaConfig;
use mandala_engine::Frame;
use mandala_layout::calendar::{CalendarCell, CellKind, Highlight, YearGrid};
use mandala_layout::clock::HandKind;
use mandala_layout::face::ClockFace;

const CELL_ASPECT: f64 = 2.0;
const MARGIN: f64 = 1.04;

const MONTH_COLORS: [Color; 12] = [
    Color::Blue,
    Color::Cyan,
    Color::Green,
    Color::BrightGreen,
    Color::Yellow,
    Color::BrightYellow,
    Color::Red,
    Color::BrightRed,
    Color::Magenta,
    Color::BrightMagenta,
    Color::BrightBlue,
    Color::BrightCyan,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Plain,
    Dim,
    Month(u32),
    CurrentMonth(u32),
    Today,
    CurrentWeekday,
    Year,
    Hand(HandKind),
    Pivot,
}

impl Paint {
    pub fn apply(self, text: &str) -> ColoredString {
        match self {
            Paint::Plain => text.normal(),
            Paint::Dim => text.dimmed(),
            Paint::Month(index) => text.color(month_color(index)),
            Paint::CurrentMonth(index) => text.color(month_color(index)).bold().underline(),
            Paint::Today => text.black().on_bright_white().bold(),
            Paint::CurrentWeekday => text.bright_white().bold().underline(),
            Paint::Year => text.bright_white().bold(),
            Paint::Hand(HandKind::Hour) => text.bright_red().bold(),
            Paint::Hand(HandKind::Minute) => text.bright_yellow().bold(),
            Paint::Hand(HandKind::Second) => text.bright_cyan(),
            Paint::Pivot => text.white().bold(),
        }
    }
}

fn month_color(index: u32) -> Color {
    MONTH_COLORS[(index % 12) as usize]
}

/// Paint for a calendar cell, `None` when the cell has nothing to print.
pub fn cell_paint(cell: &CalendarCell) -> Option<Paint> {
    if cell.label.is_empty() {
        return None;
    }
    Some(match (cell.kind, cell.highlight) {
        (_, Highlight::Today) => Paint::Today,
        (_, Highlight::CurrentWeekday) => Paint::CurrentWeekday,
        (CellKind::Date { month_index, .. }, Highlight::None) => Paint::Month(month_index),
        (CellKind::Filler, Highlight::None) => Paint::Dim,
    })
}

fn hand_glyph(kind: HandKind) -> char {
    match kind {
        HandKind::Hour => '#',
        HandKind::Minute => '+',
        HandKind::Second => '.',
    }
}

/// Fixed-size grid of painted characters.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    scale_x: f64,
    scale_y: f64,
    cells: Vec<Option<(char, Paint)>>,
}

impl Canvas {
    /// A canvas on which a circle of `max_radius` pixels just fits.
    pub fn new(width: usize, height: usize, max_radius: f64) -> Self {
        let width = width.max(3);
        let height = height.max(3);
        let half_w = (width as f64 - 1.0) / 2.0;
        let half_h = (height as f64 - 1.0) / 2.0;
        let max_radius = if max_radius > 0.0 { max_radius } else { 1.0 };
        let scale_x = (half_w / max_radius).min(half_h * CELL_ASPECT / max_radius);

        Self {
            width,
            height,
            scale_x,
            scale_y: scale_x / CELL_ASPECT,
            cells: vec![None; width * height],
        }
    }

    fn center(&self) -> (f64, f64) {
        (
            (self.width as f64 - 1.0) / 2.0,
            (self.height as f64 - 1.0) / 2.0,
        )
    }

    /// Cell for a pixel offset from the centre, y pointing down.
    pub fn project(&self, dx: f64, dy: f64) -> Option<(usize, usize)> {
        let (cx, cy) = self.center();
        let x = (cx + dx * self.scale_x).round();
        let y = (cy + dy * self.scale_y).round();
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Cell for a polar position, zero degrees at the top, clockwise.
    pub fn polar(&self, angle_degrees: f64, radius: f64) -> Option<(usize, usize)> {
        let theta = angle_degrees.to_radians();
        self.project(radius * theta.sin(), -radius * theta.cos())
    }

    pub fn put(&mut self, x: usize, y: usize, glyph: char, paint: Paint) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Some((glyph, paint));
        }
    }

    /// Writes `text` centred on the given cell, clipping at the edges.
    pub fn put_text(&mut self, at: (usize, usize), text: &str, paint: Paint) {
        let chars: Vec<char> = text.chars().collect();
        let start = at.0 as isize - (chars.len() as isize - 1) / 2;
        for (i, glyph) in chars.into_iter().enumerate() {
            let column = start + i as isize;
            if column >= 0 {
                self.put(column as usize, at.1, glyph, paint);
            }
        }
    }

    /// Straight line between two pixel offsets from the centre.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), glyph: char, paint: Paint) {
        let span_x = (to.0 - from.0) * self.scale_x;
        let span_y = (to.1 - from.1) * self.scale_y;
        let steps = span_x.abs().max(span_y.abs()).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let dx = from.0 + (to.0 - from.0) * t;
            let dy = from.1 + (to.1 - from.1) * t;
            if let Some((x, y)) = self.project(dx, dy) {
                self.put(x, y, glyph, paint);
            }
        }
    }

    pub fn render(&self) -> String {
        self.rows(|glyph, paint| paint.apply(&glyph.to_string()).to_string())
    }

    fn rows<F>(&self, paint: F) -> String
    where
        F: Fn(char, Paint) -> String,
    {
        self.cells
            .chunks(self.width)
            .map(|row| {
                let used = row.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
                row[..used]
                    .iter()
                    .map(|cell| match cell {
                        Some((glyph, p)) => paint(*glyph, *p),
                        None => " ".to_string(),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
impl Canvas {
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        self.cell_at(x, y).map(|(glyph, _)| glyph)
    }

    pub fn paint_at(&self, x: usize, y: usize) -> Option<Paint> {
        self.cell_at(x, y).map(|(_, paint)| paint)
    }

    fn cell_at(&self, x: usize, y: usize) -> Option<(char, Paint)> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    /// All cells holding `paint`, row by row.
    pub fn find(&self, paint: Paint) -> Vec<(usize, usize)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.paint_at(x, y) == Some(paint))
            .collect()
    }

    /// Rows without colour codes and without trailing blanks.
    pub fn plain_text(&self) -> String {
        self.rows(|glyph, _| glyph.to_string())
    }
}

/// Draws calendar, face and hands onto a canvas of a fixed size.
#[derive(Debug, Clone)]
pub struct MandalaRenderer {
    config: MandalaConfig,
    face: ClockFace,
    width: usize,
    height: usize,
}

impl MandalaRenderer {
    pub fn new(config: &MandalaConfig, width: usize, height: usize) -> Self {
        Self {
            config: config.clone(),
            face: ClockFace::build(&config.face),
            width,
            height,
        }
    }

    /// Radius of the year/month band, one ring outside the outermost day ring.
    fn band_radius(&self, grid: &YearGrid) -> f64 {
        let outermost = grid
            .cells
            .iter()
            .map(|cell| cell.radius_pixels)
            .fold(0.0, f64::max);
        outermost + self.config.calendar.ring_spacing
    }

    fn face_radius(&self) -> f64 {
        let hands = &self.config.hands;
        self.face
            .numerals()
            .map(|numeral| numeral.radius_pixels)
            .chain([hands.hour_radius, hands.minute_radius, hands.second_radius])
            .fold(0.0, f64::max)
    }

    pub fn draw(&self, grid: Option<&YearGrid>, frame: Option<&Frame>) -> Canvas {
        let outer = grid
            .map(|grid| self.band_radius(grid))
            .unwrap_or(0.0)
            .max(self.face_radius());
        let mut canvas = Canvas::new(self.width, self.height, outer * MARGIN);

        if let Some(grid) = grid {
            self.draw_calendar(&mut canvas, grid);
        }
        self.draw_face(&mut canvas);
        if let Some(frame) = frame {
            self.draw_hands(&mut canvas, frame);
        }
        canvas
    }

    /// Full frame as printed by the terminal sink.
    pub fn render(&self, grid: Option<&YearGrid>, frame: Option<&Frame>) -> String {
        let mut out = self.draw(grid, frame).render();
        if let Some(frame) = frame {
            out.push('\n');
            out.push_str(&format!(
                "{}  {}",
                frame.digital.bold(),
                frame.zulu.dimmed()
            ));
        }
        out
    }

    fn draw_calendar(&self, canvas: &mut Canvas, grid: &YearGrid) {
        let band_radius = self.band_radius(grid);
        for glyph in &grid.ring_band {
            let paint = match glyph.month_index {
                None => Paint::Year,
                Some(month) if glyph.is_current_month => Paint::CurrentMonth(month),
                Some(month) => Paint::Month(month),
            };
            if let Some((x, y)) = canvas.polar(glyph.angle_degrees, band_radius) {
                canvas.put(x, y, glyph.glyph, paint);
            }
        }

        for label in &grid.week_labels {
            if let Some(at) = canvas.polar(label.angle_degrees, label.radius_pixels) {
                canvas.put_text(at, &label.label, Paint::Dim);
            }
        }

        // highlighted cells last so neighbours never cover them
        let (highlighted, plain): (Vec<_>, Vec<_>) = grid
            .cells
            .iter()
            .partition(|cell| cell.highlight != Highlight::None);
        for cell in plain.into_iter().chain(highlighted) {
            let Some(paint) = cell_paint(cell) else {
                continue;
            };
            if let Some(at) = canvas.polar(cell.angle_degrees, cell.radius_pixels) {
                canvas.put_text(at, &cell.label, paint);
            }
        }
    }

    fn draw_face(&self, canvas: &mut Canvas) {
        for numeral in self.face.numerals() {
            let paint = if numeral.is_major {
                Paint::Plain
            } else {
                Paint::Dim
            };
            if let Some(at) = canvas.polar(numeral.angle_degrees, numeral.radius_pixels) {
                canvas.put_text(at, &numeral.label, paint);
            }
        }
    }

    fn draw_hands(&self, canvas: &mut Canvas, frame: &Frame) {
        let pivot = (self.config.pivot.dx, self.config.pivot.dy);
        for hand in frame.hands.visible() {
            let (tip_x, tip_y) = hand.tip_offset();
            canvas.line(
                pivot,
                (pivot.0 + tip_x, pivot.1 + tip_y),
                hand_glyph(hand.kind),
                Paint::Hand(hand.kind),
            );
        }
        if let Some((x, y)) = canvas.project(pivot.0, pivot.1) {
            canvas.put(x, y, '@', Paint::Pivot);
        }
    }
}
