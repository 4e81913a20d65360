//! Notification records for downstream signal generators.
//!
//! Indicators only compute values. Code that turns those values into alerts
//! (crossovers, breakouts) reports them with a [`Notification`], so every
//! consumer sees the same record shape.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Kind of trading signal.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Price closed outside a Bollinger band.
    BollingerBreakout,
    /// Two moving averages crossed.
    MaCrossover,
    /// Price crossed a moving average.
    MaPriceCrossover,
    /// Price broke away from a moving average.
    MaBreakout,
}

impl Signal {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BollingerBreakout => "bollinger_breakout",
            Self::MaCrossover => "ma_crossover",
            Self::MaPriceCrossover => "ma_price_crossover",
            Self::MaBreakout => "ma_breakout",
        }
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a signal.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// A signal raised by a caller-identified check.
///
/// Serializes as `{calling_id, signal, direction, notes}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub calling_id: String,
    pub signal: Signal,
    pub direction: Direction,
    pub notes: String,
}

impl Notification {
    /// Builds a notification. Blank or absent notes become an empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use technical_analysis::{Direction, Notification, Signal};
    ///
    /// let n = Notification::generate(Signal::MaCrossover, Direction::Up, "sma-50-200", None);
    /// assert_eq!(
    ///     serde_json::to_string(&n).unwrap(),
    ///     r#"{"calling_id":"sma-50-200","signal":"ma_crossover","direction":"up","notes":""}"#,
    /// );
    /// ```
    #[must_use]
    pub fn generate(
        signal: Signal,
        direction: Direction,
        calling_id: impl Into<String>,
        notes: Option<&str>,
    ) -> Self {
        Self {
            calling_id: calling_id.into(),
            signal,
            direction,
            notes: notes
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_default()
                .to_owned(),
        }
    }
}
