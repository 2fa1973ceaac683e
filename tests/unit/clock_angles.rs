// Tests covering the hand angle properties across a whole day.
use std::f64::consts::PI;

use chrono::NaiveTime;
use mandala::{compute_hand_angles, MandalaConfig, TimeOfDay};
use mandala_layout::clock::HandKind;
use test_case::test_case;

fn turn_fraction(angle_radians: f64) -> f64 {
    (-angle_radians / (2.0 * PI)).rem_euclid(1.0)
}

#[test]
fn hour_hand_never_runs_backwards_within_an_hour() {
    let geometry = MandalaConfig::default().hands;
    for hours in 0..24 {
        let mut previous: Option<f64> = None;
        for minutes in 0..60 {
            let time = TimeOfDay::new(hours, minutes, 0).expect("valid time");
            let fraction = turn_fraction(compute_hand_angles(time, &geometry).hour.angle_radians);
            if let Some(previous) = previous {
                // one minute moves the hour hand 1/720 of a turn, modulo the full turn
                let step = (fraction - previous).rem_euclid(1.0);
                assert!(
                    (step - 1.0 / 720.0).abs() < 1e-9,
                    "{hours:02}:{minutes:02} stepped {step}"
                );
            }
            previous = Some(fraction);
        }
    }
}

#[test]
fn second_hand_repeats_every_minute() {
    let geometry = MandalaConfig::default().hands;
    for start in (0..86_400).step_by(997) {
        let a = compute_hand_angles(TimeOfDay::from_seconds_of_day(start), &geometry);
        let b = compute_hand_angles(TimeOfDay::from_seconds_of_day(start + 60), &geometry);
        assert_eq!(a.second.angle_radians, b.second.angle_radians);
    }
}

#[test_case("00:00:00", 0.0 ; "midnight points up")]
#[test_case("03:00:00", 0.25 ; "three o'clock")]
#[test_case("06:00:00", 0.5 ; "six o'clock")]
#[test_case("15:00:00", 0.25 ; "afternoon folds onto the dial")]
#[test_case("21:30:00", 0.791_666_666_666_666_6 ; "half past nine")]
fn hour_hand_matches_the_dial(at: &str, expected_turn: f64) {
    let time = NaiveTime::parse_from_str(at, "%H:%M:%S").unwrap();
    let hands = compute_hand_angles(time.into(), &MandalaConfig::default().hands);

    // a half-turn offset puts zero at the top of a y-down canvas
    let (x, y) = hands.hour.tip_offset();
    let screen_turn = (x.atan2(-y) / (2.0 * PI)).rem_euclid(1.0);
    let distance = (screen_turn - expected_turn).abs();
    assert!(distance < 1e-9 || (1.0 - distance) < 1e-9, "{at}: {screen_turn}");
}

#[test]
fn hidden_second_hand_is_still_computed() {
    let mut config = MandalaConfig::default();
    config.hands.show_second_hand = false;
    let hands = compute_hand_angles(TimeOfDay::new(10, 10, 10).unwrap(), &config.hands);

    let kinds: Vec<HandKind> = hands.visible().map(|hand| hand.kind).collect();
    assert_eq!(kinds, vec![HandKind::Hour, HandKind::Minute]);
    assert_eq!(hands.second.radius_pixels, config.hands.second_radius);
    assert!(hands.second.angle_radians.is_finite());
}

#[test]
fn hand_angles_serialize_for_the_cli() {
    let hands = compute_hand_angles(
        TimeOfDay::new(12, 0, 0).unwrap(),
        &MandalaConfig::default().hands,
    );
    let value = serde_json::to_value(hands).expect("serialize hands");
    assert_eq!(value["hour"]["kind"], "hour");
    assert_eq!(value["minute"]["radius_pixels"], 250.0);
    assert_eq!(value["show_second_hand"], true);
}
