// Tests covering configuration files feeding the layout and engine.
use std::io::Write;

use chrono::NaiveDate;
use mandala::{year_grid, Locale, MandalaConfig, MandalaError};
use mandala_core::config::load_config;
use mandala_core::FillerLabels;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn toml_file_overrides_only_the_keys_it_names() {
    let file = write_config(
        r#"
tick_interval_ms = 250
language = "en-GB"

[hands]
hour_radius = 100.0
show_second_hand = false

[calendar]
filler_labels = "shifted"
"#,
    );

    let config = load_config(Some(file.path())).expect("config loads");
    assert_eq!(config.tick_interval_ms, 250);
    assert_eq!(config.language, "en-GB");
    assert_eq!(config.hands.hour_radius, 100.0);
    assert!(!config.hands.show_second_hand);
    assert_eq!(config.hands.minute_radius, 250.0);
    assert_eq!(config.calendar.filler_labels, FillerLabels::Shifted);
    assert_eq!(config.pivot, MandalaConfig::default().pivot);
}

#[test]
fn shifted_labels_from_a_file_reach_the_calendar() {
    let file = write_config("[calendar]\nfiller_labels = \"shifted\"\n");
    let config = load_config(Some(file.path())).expect("config loads");
    let locale = Locale::for_language_or_default(&config.language);

    // 2022 starts on a Saturday, so week 0 is five fillers and then New Year's Day
    let grid = year_grid(&config, &locale, NaiveDate::from_ymd_opt(2022, 8, 1).unwrap());
    let labels: Vec<&str> = (0..6)
        .map(|ring| grid.cell(0, ring).unwrap().label.as_str())
        .collect();
    assert_eq!(labels, ["", "M", "Tu", "W", "Th", "1"]);
}

#[test]
fn rejected_geometry_surfaces_as_a_config_error() {
    let file = write_config("[calendar]\nring_spacing = -5.0\n");
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, MandalaError::ConfigError(_)));
    assert!(err.to_string().contains("calendar.ring_spacing"));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}
