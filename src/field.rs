use crate::Price;

use std::fmt::{Debug, Display};

/// Numeric field of an [`Observation`](crate::Observation).
///
/// Each indicator declares which fields it reads; validation checks that
/// every observation carries a number under each of those keys.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Field {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Field {
    /// Key under which the field is stored in an observation.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
///
/// # Example
///
/// ```
/// use technical_analysis::true_range;
///
/// // Gap up: the previous close sits far below today's low.
/// assert_eq!(true_range(30.0, 20.0, 10.0), 20.0);
/// ```
#[inline]
#[must_use]
pub fn true_range(high: Price, low: Price, prev_close: Price) -> Price {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();

    hl.max(hc).max(lc)
}
