use serde::{Deserialize, Serialize};

use crate::locale::{Locale, MONTH_DELIMITER};

/// One character slot of the outer year/month ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandGlyph {
    pub char_index: usize,
    pub glyph: char,
    pub is_year_digit: bool,
    /// Month the glyph is coloured with; `None` for year digits.
    pub month_index: Option<u32>,
    pub is_current_month: bool,
    pub angle_degrees: f64,
}

/// Lays out `yy` + January..June + July..December + `cc` around the circle.
///
/// A delimiter glyph still belongs to the month it closes, is drawn as a
/// space, and moves the following glyphs to the next month.
pub fn build_ring_band(year: i32, locale: &Locale, current_month: Option<u32>) -> Vec<BandGlyph> {
    let digits: Vec<char> = format!("{:04}", year.rem_euclid(10_000)).chars().collect();
    let text: Vec<char> = [digits[2], digits[3]]
        .into_iter()
        .chain(locale.months_jan_jun.chars())
        .chain(locale.months_jul_dec.chars())
        .chain([digits[0], digits[1]])
        .collect();

    let len = text.len();
    let step = 360.0 / len as f64;
    let mut month = 0u32;

    text.into_iter()
        .enumerate()
        .map(|(i, c)| {
            let angle_degrees = i as f64 * step;
            if i < 2 || i + 3 > len {
                return BandGlyph {
                    char_index: i,
                    glyph: c,
                    is_year_digit: true,
                    month_index: None,
                    is_current_month: false,
                    angle_degrees,
                };
            }

            // padding after the last delimiter stays with December
            let month_index = month.min(11);
            let glyph = if c == MONTH_DELIMITER {
                month += 1;
                ' '
            } else {
                c
            };
            BandGlyph {
                char_index: i,
                glyph,
                is_year_digit: false,
                month_index: Some(month_index),
                is_current_month: current_month == Some(month_index),
                angle_degrees,
            }
        })
        .collect()
}
