use super::*;
use chrono::TimeZone;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn plus_one() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

#[test]
fn hour_minute() {
    assert_eq!(
        parse_time("14:30", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 1, 14, 30, 0).unwrap()
    );
}

#[test]
fn hour_minute_with_offset() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    assert_eq!(
        parse_time("14:30+02:00", utc()).unwrap(),
        plus_two.with_ymd_and_hms(0, 1, 1, 14, 30, 0).unwrap()
    );
}

#[test]
fn hour_minute_second() {
    assert_eq!(
        parse_time("14:30:15", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 1, 14, 30, 15).unwrap()
    );
}

#[test]
fn day_month() {
    assert_eq!(
        parse_time("25/12", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 12, 25, 0, 0, 0).unwrap()
    );
}

#[test]
fn month_name_and_day() {
    assert_eq!(
        parse_time("Jan 02", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 2, 0, 0, 0).unwrap()
    );
}

#[test]
fn month_name_alone() {
    assert_eq!(
        parse_time("Mar", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 3, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn full_date() {
    assert_eq!(
        parse_time("2006-01-02", utc()).unwrap(),
        utc().with_ymd_and_hms(2006, 1, 2, 0, 0, 0).unwrap()
    );
}

#[test]
fn full_date_and_time() {
    assert_eq!(
        parse_time("2006-01-02 15:04:05", utc()).unwrap(),
        utc().with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap()
    );
}

#[test]
fn full_date_and_time_with_offset() {
    let plus_seven = FixedOffset::east_opt(7 * 3600).unwrap();

    assert_eq!(
        parse_time("2006-01-02 15:04:05+07:00", utc()).unwrap(),
        plus_seven.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap()
    );
}

#[test]
fn rfc3339() {
    assert_eq!(
        parse_time("2006-01-02T15:04:05Z", utc()).unwrap(),
        utc().with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap()
    );
}

#[test]
fn layouts_without_offset_use_the_default() {
    assert_eq!(
        parse_time("14:30", plus_one()).unwrap(),
        plus_one().with_ymd_and_hms(0, 1, 1, 14, 30, 0).unwrap()
    );
}

#[test]
fn weekday_names_parse_case_insensitively() {
    assert_eq!(
        parse_time("monday", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(
        parse_time("SUNDAY", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 7, 0, 0, 0).unwrap()
    );
    assert_eq!(
        parse_time("Thursday", utc()).unwrap(),
        utc().with_ymd_and_hms(0, 1, 4, 0, 0, 0).unwrap()
    );
}

#[test]
fn garbage_is_rejected() {
    assert!(parse_time("not a time", utc()).is_err());
    assert!(parse_time("25:99", utc()).is_err());
    assert!(parse_time("", utc()).is_err());
}
