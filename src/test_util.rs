// src/test_util.rs

use crate::{Field, Observation, Price, Timestamp};

use chrono::{Days, TimeZone, Utc};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Midnight UTC on the given calendar day.
pub fn day(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid calendar day")
}

/// Consecutive days starting 2019-01-01.
pub fn nth_day(n: usize) -> Timestamp {
    day(2019, 1, 1) + Days::new(n as u64)
}

/// Close/volume observation on [`nth_day`].
pub fn cv(n: usize, close: Price, volume: Price) -> Observation {
    Observation::new(nth_day(n))
        .with(Field::Close, close)
        .with(Field::Volume, volume)
}

/// High/low/close observation on [`nth_day`].
pub fn hlc(n: usize, high: Price, low: Price, close: Price) -> Observation {
    Observation::new(nth_day(n))
        .with(Field::High, high)
        .with(Field::Low, low)
        .with(Field::Close, close)
}
