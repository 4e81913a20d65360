use std::{fmt::Display, num::NonZero};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::{
    Dated, Field, Indicator, IndicatorConfig, IndicatorConfigBuilder, Observation,
    OptionDescriptor, Options, Price, Result, Timestamp, ValidationError,
    field::true_range,
    options::option_names,
    ordering::{ascending_indexed, descending},
    validation::{self, validate_date_time_key, validate_length, validate_numeric_data},
    window::TrailingWindow,
};

/// Configuration for the Weighted Average True Range ([`Watr`]) indicator.
///
/// The WATR blend weight is `1 / (period - 2)`, so periods below 3 are
/// rejected.
///
/// # Example
///
/// ```
/// use technical_analysis::{IndicatorConfig, ValidationError, WatrConfig};
/// use std::num::NonZero;
///
/// let config = WatrConfig::with_period(NonZero::new(20).unwrap())?;
/// assert_eq!(config.period(), 20);
/// assert_eq!(WatrConfig::default().period(), 14);
///
/// assert!(matches!(
///     WatrConfig::with_period(NonZero::new(2).unwrap()),
///     Err(ValidationError::InvalidOptionValue { option: "period", .. }),
/// ));
/// # Ok::<(), ValidationError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct WatrConfig {
    period: usize,
}

impl WatrConfig {
    const PERIOD: OptionDescriptor = OptionDescriptor {
        name: "period",
        description: "true range window and ATR smoothing length",
        default: 14,
        minimum: 3,
    };

    /// WATR over `period` true ranges.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidOptionValue`] if `period < 3`.
    pub fn with_period(period: NonZero<usize>) -> Result<Self> {
        Self::builder().period(period).build()
    }
}

impl Default for WatrConfig {
    fn default() -> Self {
        Self {
            period: Self::PERIOD.default,
        }
    }
}

impl IndicatorConfig for WatrConfig {
    type Builder = WatrConfigBuilder;

    const OPTIONS: &'static [OptionDescriptor] = &[Self::PERIOD];

    #[inline]
    fn builder() -> Self::Builder {
        WatrConfigBuilder::new()
    }

    fn from_options(options: &Options) -> Result<Self> {
        validation::validate_options(options, &option_names(Self::OPTIONS))?;

        Ok(Self {
            period: Self::PERIOD.resolve(options)?,
        })
    }

    #[inline]
    fn period(&self) -> usize {
        self.period
    }
}

impl Display for WatrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WatrConfig({})", self.period)
    }
}

/// Builder for [`WatrConfig`].
///
/// Defaults: period = 14.
pub struct WatrConfigBuilder {
    period: usize,
}

impl WatrConfigBuilder {
    fn new() -> Self {
        Self {
            period: WatrConfig::PERIOD.default,
        }
    }
}

impl IndicatorConfigBuilder<WatrConfig> for WatrConfigBuilder {
    #[inline]
    fn period(mut self, period: NonZero<usize>) -> Self {
        self.period = period.get();
        self
    }

    #[inline]
    fn build(self) -> Result<WatrConfig> {
        Ok(WatrConfig {
            period: WatrConfig::PERIOD.check(self.period)?,
        })
    }
}

/// One Weighted Average True Range output record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WatrValue {
    date_time: Timestamp,
    atr: Price,
    watr: Option<Price>,
}

impl WatrValue {
    /// Timestamp of the observation closing the window.
    #[inline]
    #[must_use]
    pub fn date_time(&self) -> Timestamp {
        self.date_time
    }

    /// Wilder-smoothed average true range.
    #[inline]
    #[must_use]
    pub fn atr(&self) -> Price {
        self.atr
    }

    /// ATR blended with the previous record's ATR.
    ///
    /// `None` for the chronologically first record, which has no
    /// predecessor to blend with.
    #[inline]
    #[must_use]
    pub fn watr(&self) -> Option<Price> {
        self.watr
    }
}

impl Dated for WatrValue {
    #[inline]
    fn date_time(&self) -> Option<&Timestamp> {
        Some(&self.date_time)
    }
}

impl Display for WatrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.watr {
            Some(watr) => write!(
                f,
                "WATR({}: atr {}, watr {watr})",
                self.date_time.to_rfc3339(),
                self.atr
            ),
            None => write!(f, "WATR({}: atr {})", self.date_time.to_rfc3339(), self.atr),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum WatrPhase {
    /// Collecting the first `period` true ranges.
    Seeding,
    /// ATR of the previously emitted record.
    Active { prev_atr: Price },
}

/// Weighted Average True Range (WATR).
///
/// True range per observation is measured against the previous close. The
/// first `period` true ranges seed the ATR with their arithmetic mean; after
/// that ATR follows Wilder's smoothing and WATR blends each new ATR with the
/// previous one:
///
/// ```text
/// tr        = max(high − low, |high − prev_close|, |low − prev_close|)
/// ATR_0     = mean(tr_1 … tr_period)
/// ATR_t     = (ATR_{t−1} × (period − 1) + tr_t) / period
/// weighting = 1 / (period − 2)
/// WATR_t    = weighting × ATR_t + (1 − weighting) × ATR_{t−1}
/// ```
///
/// The oldest record has no WATR. Output has `len(data) - period` records,
/// sorted **most recent first**.
///
/// Required fields: `date_time`, `high`, `low`, `close`.
///
/// <https://en.wikipedia.org/wiki/Average_true_range>
///
/// # Example
///
/// ```
/// use chrono::{Days, TimeZone, Utc};
/// use technical_analysis::{Field, Observation, Watr, WatrConfig};
/// use std::num::NonZero;
///
/// let start = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
/// let bar = |day: u64, high: f64, low: f64, close: f64| {
///     Observation::new(start + Days::new(day))
///         .with(Field::High, high)
///         .with(Field::Low, low)
///         .with(Field::Close, close)
/// };
///
/// let data = vec![
///     bar(0, 10.0, 8.0, 9.0),
///     bar(1, 11.0, 9.0, 10.0),  // tr 2
///     bar(2, 12.0, 10.0, 11.0), // tr 2
///     bar(3, 15.0, 11.0, 14.0), // tr 4 → ATR seed 8/3
///     bar(4, 14.0, 13.0, 13.5), // tr 1 → ATR (8/3 × 2 + 1) / 3
/// ];
///
/// let config = WatrConfig::with_period(NonZero::new(3).unwrap())?;
/// let output = Watr::calculate(&data, &config)?;
///
/// assert_eq!(output.len(), 2);
/// assert_eq!(output[0].date_time(), start + Days::new(4));
/// assert!(output[0].watr().is_some());
/// assert_eq!(output[1].watr(), None);
/// # Ok::<(), technical_analysis::ValidationError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Watr;

impl Watr {
    const FIELDS: [Field; 3] = [Field::High, Field::Low, Field::Close];
}

impl Indicator for Watr {
    type Config = WatrConfig;
    type Output = WatrValue;

    const SYMBOL: &'static str = "watr";
    const NAME: &'static str = "Weighted Average True Range";

    #[inline]
    fn min_data_size(config: &Self::Config) -> usize {
        config.period.saturating_add(1)
    }

    #[instrument(
        level = "debug",
        name = "watr",
        skip_all,
        fields(period = config.period, observations = data.len())
    )]
    fn calculate(data: &[Observation], config: &Self::Config) -> Result<Vec<WatrValue>> {
        validate_numeric_data(data, &Self::FIELDS)?;
        validate_length(data, <Self as Indicator>::min_data_size(config))?;
        validate_date_time_key(data)?;

        #[allow(clippy::cast_precision_loss)]
        let period = config.period as f64;
        let period_minus_one = period - 1.0;
        let weighting = 1.0 / (period - 2.0);
        let remainder = 1.0 - weighting;

        let ordered = ascending_indexed(data);
        let Some(((first_index, first), rest)) = ordered.split_first() else {
            return Err(ValidationError::InsufficientData {
                required: <Self as Indicator>::min_data_size(config),
                actual: 0,
            });
        };

        let mut prev_close = validation::number(first, Field::Close, *first_index)?;
        let mut true_ranges = TrailingWindow::new(config.period);
        let mut phase = WatrPhase::Seeding;
        let mut output = Vec::with_capacity(data.len() - config.period);

        for &(index, observation) in rest {
            let high = validation::number(observation, Field::High, index)?;
            let low = validation::number(observation, Field::Low, index)?;

            let tr = true_range(high, low, prev_close);
            trace!(index, high, low, prev_close, tr, "true range");

            let record = match phase {
                WatrPhase::Seeding => {
                    true_ranges.push(tr);
                    true_ranges.mean().map(|seed| (seed, None))
                }
                WatrPhase::Active { prev_atr } => {
                    let atr = (prev_atr * period_minus_one + tr) / period;
                    Some((atr, Some(weighting * atr + remainder * prev_atr)))
                }
            };

            if let Some((atr, watr)) = record {
                let date_time = *observation
                    .date_time()
                    .ok_or(ValidationError::MissingField {
                        field: "date_time",
                        index,
                    })?;

                output.push(WatrValue {
                    date_time,
                    atr,
                    watr,
                });
                phase = WatrPhase::Active { prev_atr: atr };
            }

            prev_close = validation::number(observation, Field::Close, index)?;
        }

        debug!(records = output.len(), "computed WATR");

        Ok(descending(output))
    }
}
