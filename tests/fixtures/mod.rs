#![allow(dead_code)]

use serde::{Deserialize, de::DeserializeOwned};
use technical_analysis::{Field, Observation, Price, Timestamp};

/// Daily OHLCV bar parsed from CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub date_time: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: f64,
}

impl RefBar {
    pub fn to_observation(&self) -> Observation {
        Observation::new(self.date_time)
            .with(Field::Open, self.open)
            .with(Field::High, self.high)
            .with(Field::Low, self.low)
            .with(Field::Close, self.close)
            .with(Field::Volume, self.volume)
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub date_time: Timestamp,
    pub expected: f64,
}

/// Reference WATR record. `watr` is empty for the oldest record.
#[derive(Debug, Deserialize)]
pub struct RefWatrValue {
    pub date_time: Timestamp,
    pub atr: f64,
    pub watr: Option<f64>,
}

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv-daily.csv";

/// Load reference daily OHLCV bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Reference bars as observations, in file (chronological) order.
pub fn load_reference_observations() -> Vec<Observation> {
    load_reference_bars()
        .iter()
        .map(RefBar::to_observation)
        .collect()
}

/// Load single-value reference data (OBV mean).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load WATR reference data (atr, watr).
pub fn load_watr_ref(path: &str) -> Vec<RefWatrValue> {
    load_records(path, "invalid WATR reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Deterministic shuffle so order-independence tests don't need a RNG crate.
pub fn scrambled<T: Clone>(data: &[T]) -> Vec<T> {
    let mut out = data.to_vec();
    let len = out.len();
    for i in 0..len {
        out.swap(i, (i * 7 + 3) % len);
    }
    out
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
