use super::*;
use crate::clock::FakeClock;
use chrono::{FixedOffset, TimeZone};
use gtm_time::{Frequency, RecurrentMoment};
use std::time::Duration;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// A one-second window at noon, repeated daily.
fn daily_noon_second() -> RecurrentMoment {
    RecurrentMoment::new(
        utc().with_ymd_and_hms(1900, 1, 1, 12, 0, 0).unwrap(),
        utc().with_ymd_and_hms(1900, 1, 1, 12, 0, 1).unwrap(),
        Frequency::Day,
    )
}

#[tokio::test]
async fn follows_the_interval_boundaries() {
    let clock = FakeClock::new(utc().with_ymd_and_hms(2017, 3, 9, 11, 59, 59).unwrap());
    let condition = TimeCondition::with_clock(daily_noon_second(), clock.clone());

    assert!(!condition.watch().0);

    clock.advance(Duration::from_secs(1));
    condition.wait_for(true).await.unwrap();

    clock.advance(Duration::from_secs(1));
    condition.wait_for(false).await.unwrap();

    condition.close();
}

#[tokio::test]
async fn starts_satisfied_inside_the_interval() {
    let clock = FakeClock::new(utc().with_ymd_and_hms(2017, 3, 9, 12, 0, 0).unwrap());
    let condition = TimeCondition::with_clock(daily_noon_second(), clock);

    assert!(condition.watch().0);

    condition.close();
}

#[tokio::test]
async fn close_stops_the_driver() {
    let clock = FakeClock::new(utc().with_ymd_and_hms(2017, 3, 9, 11, 59, 59).unwrap());
    let condition = TimeCondition::with_clock(daily_noon_second(), clock.clone());

    condition.close();
    clock.advance(Duration::from_secs(1));

    assert!(condition.wait_for(true).await.is_err());
}
