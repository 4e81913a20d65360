use std::{cmp::Ordering, fmt::Display, num::NonZero};

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::{
    Dated, Field, Indicator, IndicatorConfig, IndicatorConfigBuilder, Observation,
    OptionDescriptor, Options, Price, Result, Timestamp, ValidationError,
    options::option_names,
    ordering::ascending_indexed,
    validation::{self, validate_date_time_key, validate_length, validate_numeric_data},
    window::TrailingWindow,
};

/// Configuration for the On-balance Volume Mean ([`ObvMean`]) indicator.
///
/// # Example
///
/// ```rust
/// use technical_analysis::{IndicatorConfig, ObvMeanConfig};
/// use std::num::NonZero;
///
/// let config = ObvMeanConfig::with_period(NonZero::new(20).unwrap());
/// assert_eq!(config.period(), 20);
/// assert_eq!(ObvMeanConfig::default().period(), 10);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct ObvMeanConfig {
    period: usize,
}

impl ObvMeanConfig {
    const PERIOD: OptionDescriptor = OptionDescriptor {
        name: "period",
        description: "number of trailing OBV values averaged",
        default: 10,
        minimum: 1,
    };

    /// OBV mean over `period` trailing OBV values.
    #[must_use]
    pub fn with_period(period: NonZero<usize>) -> Self {
        Self {
            period: period.get(),
        }
    }
}

impl Default for ObvMeanConfig {
    fn default() -> Self {
        Self {
            period: Self::PERIOD.default,
        }
    }
}

impl IndicatorConfig for ObvMeanConfig {
    type Builder = ObvMeanConfigBuilder;

    const OPTIONS: &'static [OptionDescriptor] = &[Self::PERIOD];

    #[inline]
    fn builder() -> Self::Builder {
        ObvMeanConfigBuilder::new()
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

impl Display for ObvMeanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObvMeanConfig({})", self.period)
    }
}

/// Builder for [`ObvMeanConfig`].
///
/// Defaults: period = 10.
pub struct ObvMeanConfigBuilder {
    period: usize,
}

impl ObvMeanConfigBuilder {
    fn new() -> Self {
        Self {
            period: ObvMeanConfig::PERIOD.default,
        }
    }
}

impl IndicatorConfigBuilder<ObvMeanConfig> for ObvMeanConfigBuilder {
    #[inline]
    fn period(mut self, period: NonZero<usize>) -> Self {
        self.period = period.get();
        self
    }

    #[inline]
    fn build(self) -> Result<ObvMeanConfig> {
        Ok(ObvMeanConfig {
            period: ObvMeanConfig::PERIOD.check(self.period)?,
        })
    }
}

/// One On-balance Volume Mean output record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ObvMeanValue {
    date_time: Timestamp,
    value: Price,
}

impl ObvMeanValue {
    /// Timestamp of the observation closing the window.
    #[inline]
    #[must_use]
    pub fn date_time(&self) -> Timestamp {
        self.date_time
    }

    /// Mean of the trailing OBV values.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Price {
        self.value
    }
}

impl Dated for ObvMeanValue {
    #[inline]
    fn date_time(&self) -> Option<&Timestamp> {
        Some(&self.date_time)
    }
}

impl Display for ObvMeanValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OBV mean({}: {})", self.date_time.to_rfc3339(), self.value)
    }
}

/// On-balance Volume Mean.
///
/// On-balance volume (OBV) is a running total of volume: each observation
/// adds its volume when the close rises over the previous close, subtracts
/// it when the close falls, and leaves the total unchanged otherwise. This
/// indicator reports the arithmetic mean of the last `period` OBV values.
///
/// The first observation only provides the reference close, so the output
/// has `len(data) - period` records, in ascending chronological order.
///
/// Required fields: `date_time`, `close`, `volume`.
///
/// <https://en.wikipedia.org/wiki/On-balance_volume>
///
/// # Example
///
/// ```rust
/// use chrono::{Days, TimeZone, Utc};
/// use technical_analysis::{Field, Observation, ObvMean, ObvMeanConfig};
/// use std::num::NonZero;
///
/// let start = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
/// let bar = |day: u64, close: f64, volume: f64| {
///     Observation::new(start + Days::new(day))
///         .with(Field::Close, close)
///         .with(Field::Volume, volume)
/// };
///
/// let data = vec![
///     bar(0, 10.0, 100.0),
///     bar(1, 12.0, 200.0), // +200 → OBV 200
///     bar(2, 11.0, 150.0), // −150 → OBV  50
///     bar(3, 11.0, 50.0),  //  ±0  → OBV  50
/// ];
///
/// let output = ObvMean::calculate(&data, &ObvMeanConfig::with_period(NonZero::new(2).unwrap()))?;
///
/// assert_eq!(output.len(), 2);
/// assert_eq!(output[0].value(), 125.0);
/// assert_eq!(output[1].value(), 50.0);
/// # Ok::<(), technical_analysis::ValidationError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ObvMean;

impl ObvMean {
    const FIELDS: [Field; 2] = [Field::Close, Field::Volume];
}

impl Indicator for ObvMean {
    type Config = ObvMeanConfig;
    type Output = ObvMeanValue;

    const SYMBOL: &'static str = "obv_mean";
    const NAME: &'static str = "On-balance Volume Mean";

    #[inline]
    fn min_data_size(config: &Self::Config) -> usize {
        config.period.saturating_add(1)
    }

    #[instrument(
        level = "debug",
        name = "obv_mean",
        skip_all,
        fields(period = config.period, observations = data.len())
    )]
    fn calculate(data: &[Observation], config: &Self::Config) -> Result<Vec<ObvMeanValue>> {
        validate_numeric_data(data, &Self::FIELDS)?;
        validate_length(data, <Self as Indicator>::min_data_size(config))?;
        validate_date_time_key(data)?;

        let mut obvs = TrailingWindow::new(config.period);
        let mut output = Vec::with_capacity(data.len() - config.period);
        let mut current_obv: Price = 0.0;
        let mut prior_close: Option<Price> = None;

        for (index, observation) in ascending_indexed(data) {
            let close = validation::number(observation, Field::Close, index)?;
            let volume = validation::number(observation, Field::Volume, index)?;

            if let Some(prior_close) = prior_close {
                match close.partial_cmp(&prior_close) {
                    Some(Ordering::Greater) => current_obv += volume,
                    Some(Ordering::Less) => current_obv -= volume,
                    _ => {}
                }
                obvs.push(current_obv);
                trace!(index, close, volume, obv = current_obv, "OBV step");
            }

            prior_close = Some(close);

            if let Some(mean) = obvs.mean() {
                let date_time = *observation
                    .date_time()
                    .ok_or(ValidationError::MissingField {
                        field: "date_time",
                        index,
                    })?;

                output.push(ObvMeanValue {
                    date_time,
                    value: mean,
                });
                obvs.pop_oldest();
            }
        }

        debug!(records = output.len(), "computed OBV mean");

        Ok(output)
    }
}
