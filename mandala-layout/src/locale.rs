//! Text tables for the calendar rings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LayoutError;

/// Marks the end of a month name inside a month band.
pub const MONTH_DELIMITER: char = '!';

const EN_DAY_ABBREV: [&str; 7] = ["M", "Tu", "W", "Th", "F", "Sa", "Su"];
const EN_MONTHS_JAN_JUN: &str =
    "   January!    February!     March!        April!         May!          June!    ";
const EN_MONTHS_JUL_DEC: &str =
    "    July!       August!      September!     October!     November!   December!   ";

/// Day abbreviations (Monday first) and the padded month bands of the outer ring.
///
/// The padding inside the month bands is part of the layout: each glyph
/// takes an equal slice of the circle, so the spaces line the month names
/// up with the day cells underneath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub day_abbrev: [String; 7],
    pub months_jan_jun: String,
    pub months_jul_dec: String,
}

impl Locale {
    pub fn english() -> Self {
        Self {
            day_abbrev: EN_DAY_ABBREV.map(str::to_string),
            months_jan_jun: EN_MONTHS_JAN_JUN.to_string(),
            months_jul_dec: EN_MONTHS_JUL_DEC.to_string(),
        }
    }

    /// Table for a BCP 47 language tag, if one is bundled.
    pub fn for_language(tag: &str) -> Option<Self> {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Some(Self::english())
        } else {
            None
        }
    }

    /// Like [`Locale::for_language`], falling back to English.
    pub fn for_language_or_default(tag: &str) -> Self {
        Self::for_language(tag).unwrap_or_else(|| {
            warn!(language = tag, "no calendar texts for language, using English");
            Self::english()
        })
    }

    /// Abbreviation for a weekday counted from Monday.
    pub fn day(&self, index: usize) -> Option<&str> {
        self.day_abbrev.get(index).map(String::as_str)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, band) in [
            ("months_jan_jun", &self.months_jan_jun),
            ("months_jul_dec", &self.months_jul_dec),
        ] {
            let delimiters = band.chars().filter(|c| *c == MONTH_DELIMITER).count();
            if delimiters != 6 {
                return Err(LayoutError::InvalidLocale(format!(
                    "{name} needs 6 `{MONTH_DELIMITER}` delimiters, found {delimiters}"
                )));
            }
        }
        if self.day_abbrev.iter().any(|day| day.trim().is_empty()) {
            return Err(LayoutError::InvalidLocale(
                "day abbreviations must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_tables_are_valid() {
        let locale = Locale::english();
        assert!(locale.validate().is_ok());
        assert_eq!(locale.day(0), Some("M"));
        assert_eq!(locale.day(6), Some("Su"));
        assert_eq!(locale.day(7), None);
        assert_eq!(locale.months_jan_jun.chars().count(), 81);
        assert_eq!(locale.months_jul_dec.chars().count(), 81);
    }

    #[test]
    fn language_lookup() {
        assert!(Locale::for_language("en-US").is_some());
        assert!(Locale::for_language("EN").is_some());
        assert!(Locale::for_language("pt-BR").is_none());
        assert_eq!(Locale::for_language_or_default("pt-BR"), Locale::english());
    }

    #[test]
    fn rejects_band_without_six_months() {
        let mut locale = Locale::english();
        locale.months_jul_dec = "July!August!".to_string();
        assert!(matches!(locale.validate(), Err(LayoutError::InvalidLocale(_))));
    }
}
