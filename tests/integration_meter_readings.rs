use assert_matches::assert_matches;
use std::time::{Duration, Instant};
use typometer::meter::Meter;

#[test]
fn completed_session_reading_integration() {
    let mut meter = Meter::new("abc");
    let t0 = Instant::now();

    assert_matches!(meter.observe("a", "abc", t0), None);
    assert_matches!(meter.observe("ab", "abc", t0 + Duration::from_secs(1)), None);

    let reading = meter
        .observe("abc", "abc", t0 + Duration::from_secs(2))
        .unwrap();
    assert_eq!(reading.elapsed_secs, 2.0);
    assert_eq!(reading.chars_per_min, 90.0);
    assert_eq!(reading.accuracy, 100.0);
    assert!(reading.finished);
}

#[test]
fn mistyped_session_accuracy_integration() {
    let mut meter = Meter::new("abc");
    let t0 = Instant::now();

    meter.observe("a", "abc", t0);
    let reading = meter
        .observe("axc", "abc", t0 + Duration::from_secs(2))
        .unwrap();

    assert_eq!(reading.accuracy, 66.67);
    assert_eq!(reading.chars_per_min, 90.0);
}

#[test]
fn finished_meter_freezes_until_reset() {
    let mut meter = Meter::new("hi");
    let t0 = Instant::now();

    meter.observe("h", "hi", t0);
    meter.observe("hi", "hi", t0 + Duration::from_secs(1));
    assert!(meter.has_finished());

    // Later snapshots and ticks leave the final reading untouched
    assert_matches!(meter.observe("hix", "hi", t0 + Duration::from_secs(5)), None);
    assert_matches!(meter.tick(t0 + Duration::from_secs(5)), None);
    assert_eq!(meter.reading().elapsed_secs, 1.0);

    let zeroed = meter.reset();
    assert_eq!(zeroed.elapsed_secs, 0.0);
    assert_eq!(zeroed.chars_per_min, 0.0);
    assert!(!zeroed.finished);
    assert_eq!(meter.reference(), "hi");

    // A fresh session on the kept reference times from its own first key
    let t1 = t0 + Duration::from_secs(60);
    meter.observe("h", "hi", t1);
    let reading = meter.tick(t1 + Duration::from_secs(1)).unwrap();
    assert_eq!(reading.elapsed_secs, 1.0);
}

#[test]
fn reference_change_starts_a_new_session() {
    let mut meter = Meter::new("abc");
    let t0 = Instant::now();

    meter.observe("ab", "abc", t0);
    assert!(meter.has_started());

    // A different reference abandons the old session in the same call
    assert_matches!(meter.observe("x", "xy", t0 + Duration::from_secs(1)), None);
    assert_eq!(meter.reference(), "xy");
    assert_eq!(meter.typed(), "x");

    let reading = meter
        .observe("xy", "xy", t0 + Duration::from_secs(3))
        .unwrap();
    assert_eq!(reading.elapsed_secs, 2.0);
    assert_eq!(reading.chars_per_min, 60.0);
    assert_eq!(reading.accuracy, 100.0);
}

#[test]
fn tick_stream_tracks_a_live_session() {
    let mut meter = Meter::new("hello world");
    let t0 = Instant::now();

    meter.observe("hel", "hello world", t0);

    let first = meter.tick(t0 + Duration::from_secs(1)).unwrap();
    assert_eq!(first.elapsed_secs, 1.0);
    assert_eq!(first.chars_per_min, 180.0);
    assert!(!first.finished);

    let second = meter.tick(t0 + Duration::from_secs(3)).unwrap();
    assert_eq!(second.elapsed_secs, 3.0);
    assert_eq!(second.chars_per_min, 60.0);
}
