use crate::Field;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A price or volume value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Observation timestamp.
///
/// Serialized as an RFC 3339 / ISO-8601 string, e.g.
/// `"2019-01-09T00:00:00.000Z"`.
pub type Timestamp = DateTime<Utc>;

/// A single dated record of price/volume data.
///
/// Observations are dynamic: values are kept as JSON values under string
/// keys, exactly as a caller (CLI, dispatcher, data feed) supplied them.
/// Indicators validate the keys they need before computing, so a record
/// with a missing or non-numeric field is reported instead of silently
/// skipped.
///
/// `date_time` must be an RFC 3339 string. It is parsed into a
/// [`Timestamp`] and serialized back in normalized form, so
/// `"2019-01-09T00:00:00.000Z"` comes back as `"2019-01-09T00:00:00Z"`.
/// A date-only or otherwise malformed `date_time` fails deserialization
/// itself rather than surfacing later as a
/// [`ValidationError`](crate::ValidationError); an absent one is accepted and
/// reported by [`validate_date_time_key`](crate::validate_date_time_key).
///
/// Deserializes from a flat object:
///
/// ```
/// use technical_analysis::{Field, Observation};
///
/// let obs: Observation = serde_json::from_str(
///     r#"{"date_time": "2019-01-09T00:00:00.000Z", "close": 153.31, "volume": 45099081}"#,
/// ).unwrap();
///
/// assert_eq!(obs.number(Field::Close), Some(153.31));
/// assert_eq!(obs.number(Field::High), None);
/// ```
///
/// Or is built directly:
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use technical_analysis::{Field, Observation};
///
/// let obs = Observation::new(Utc.with_ymd_and_hms(2019, 1, 9, 0, 0, 0).unwrap())
///     .with(Field::Close, 153.31)
///     .with(Field::Volume, 45_099_081.0);
///
/// assert_eq!(obs.number(Field::Volume), Some(45_099_081.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<Timestamp>,
    #[serde(flatten)]
    values: BTreeMap<String, Value>,
}

impl Observation {
    /// Creates an empty observation at `date_time`.
    #[must_use]
    pub fn new(date_time: Timestamp) -> Self {
        Self {
            date_time: Some(date_time),
            values: BTreeMap::new(),
        }
    }

    /// Creates an empty observation without a timestamp.
    ///
    /// Every indicator rejects such a record; useful for callers that fill
    /// the timestamp in later, and for exercising validation.
    #[must_use]
    pub fn undated() -> Self {
        Self::default()
    }

    /// Sets a numeric field.
    ///
    /// Non-finite values cannot be represented as JSON numbers and are
    /// stored as `null`, which validation reports as non-numeric.
    #[must_use]
    pub fn with(mut self, field: Field, value: Price) -> Self {
        self.values.insert(field.key().to_owned(), Value::from(value));
        self
    }

    /// Sets an arbitrary value under `key`.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets or clears the timestamp.
    #[must_use]
    pub fn at(mut self, date_time: Option<Timestamp>) -> Self {
        self.date_time = date_time;
        self
    }

    /// Timestamp of the observation, if any.
    #[inline]
    #[must_use]
    pub fn date_time(&self) -> Option<&Timestamp> {
        self.date_time.as_ref()
    }

    /// Raw value stored under `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Numeric value of `field`, or `None` if it is absent or not a number.
    #[inline]
    #[must_use]
    pub fn number(&self, field: Field) -> Option<Price> {
        self.get(field.key()).and_then(Value::as_f64)
    }
}
