use chrono::{Duration, FixedOffset, TimeZone, Utc};
use serene_core::{to_day_key, DayKey, TimeZoneSource};

#[test]
fn instants_on_same_local_day_share_a_key() {
    let zone = FixedOffset::west_opt(5 * 3600).unwrap();
    let start_of_day = zone
        .with_ymd_and_hms(2024, 7, 4, 0, 0, 0)
        .unwrap()
        .with_timezone(&Utc);

    let expected = DayKey::parse("2024-07-04").unwrap();
    for minutes in [0_i64, 1, 60 * 12, 60 * 23 + 59] {
        let instant = start_of_day + Duration::minutes(minutes);
        assert_eq!(to_day_key(instant, &zone), expected, "offset {minutes} min");
    }
    let next_day = start_of_day + Duration::hours(24);
    assert_eq!(to_day_key(next_day, &zone), expected.succ().unwrap());
}

#[test]
fn named_zone_handles_dst_transition_day() {
    let berlin = TimeZoneSource::parse("Europe/Berlin").unwrap();
    // 2026-03-29 is a 23-hour day in Berlin.
    let just_after_midnight = Utc.with_ymd_and_hms(2026, 3, 28, 23, 15, 0).unwrap();
    let late_evening = Utc.with_ymd_and_hms(2026, 3, 29, 21, 45, 0).unwrap();
    assert_eq!(berlin.day_key(just_after_midnight).to_string(), "2026-03-29");
    assert_eq!(berlin.day_key(late_evening).to_string(), "2026-03-29");
    assert_eq!(
        berlin.day_key(late_evening + Duration::minutes(30)).to_string(),
        "2026-03-30"
    );
}

#[test]
fn day_key_serializes_as_canonical_string() {
    let key = DayKey::from_ymd(2024, 1, 5).unwrap();
    assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-01-05\"");
    assert!(serde_json::from_str::<DayKey>("\"2024-1-5\"").is_err());
    assert!(serde_json::from_str::<DayKey>("\"not-a-date\"").is_err());
}
