use crate::{
    Dated, Observation, OptionDescriptor, Options, Result,
    options::option_names,
    validation,
};

use serde::Serialize;
use std::{
    fmt::{Debug, Display},
    hash::Hash,
    num::NonZero,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters.
/// Configs are value types: cheap to clone, compare, and hash. They can only
/// be obtained through validated paths ([`Default`], the builder, or
/// [`from_options`](IndicatorConfig::from_options)), so a config in hand is
/// always usable.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug + Default {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Option schema: every key accepted by
    /// [`from_options`](IndicatorConfig::from_options), with defaults.
    const OPTIONS: &'static [OptionDescriptor];

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Builds a config from dynamic options.
    ///
    /// # Errors
    ///
    /// [`UnknownOption`](crate::ValidationError::UnknownOption) for keys
    /// outside [`OPTIONS`](IndicatorConfig::OPTIONS);
    /// [`InvalidOptionValue`](crate::ValidationError::InvalidOptionValue)
    /// for unusable values.
    fn from_options(options: &Options) -> Result<Self>;

    /// Trailing window size (number of observations).
    fn period(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the trailing window size.
    #[must_use]
    fn period(self, period: NonZero<usize>) -> Self;

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// [`InvalidOptionValue`](crate::ValidationError::InvalidOptionValue) if
    /// the period is outside the indicator's supported range.
    fn build(self) -> Result<Config>;
}

/// A batch technical indicator.
///
/// Indicators are stateless: every call to
/// [`calculate`](Indicator::calculate) validates and orders the full input
/// and recomputes from scratch. Nothing is cached between calls, so the same
/// indicator can run concurrently on independent data.
///
/// All items are associated (no `self`), which lets generic callers select
/// and configure an indicator by type alone.
///
/// # Example
///
/// ```
/// use chrono::{Days, TimeZone, Utc};
/// use technical_analysis::{Field, Indicator, IndicatorConfig, Observation, ObvMean, ObvMeanConfig};
///
/// let start = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
/// let data: Vec<_> = [10.0, 11.0, 12.0, 11.0]
///     .into_iter()
///     .enumerate()
///     .map(|(i, close)| {
///         Observation::new(start + Days::new(i as u64))
///             .with(Field::Close, close)
///             .with(Field::Volume, 100.0)
///     })
///     .collect();
///
/// let config = ObvMeanConfig::from_options(&serde_json::from_str(r#"{"period": 2}"#)?)?;
/// let output = <ObvMean as Indicator>::calculate(&data, &config)?;
///
/// // OBV: 100, 200, 100 → means of trailing pairs
/// assert_eq!(output.len(), 2);
/// assert_eq!(output[0].value(), 150.0);
/// assert_eq!(output[1].value(), 150.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Indicator {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed record type, one per qualifying window.
    type Output: Dated + Clone + PartialEq + Serialize + Send + Sync + Display + Debug;

    /// Symbolic name used for dispatch, e.g. `"watr"`.
    const SYMBOL: &'static str;

    /// Human-readable name, e.g. `"Weighted Average True Range"`.
    const NAME: &'static str;

    /// Keys accepted in [`Options`].
    #[must_use]
    fn valid_options() -> Vec<&'static str> {
        option_names(Self::option_descriptors())
    }

    /// Option schema with defaults.
    #[must_use]
    fn option_descriptors() -> &'static [OptionDescriptor] {
        <Self::Config as IndicatorConfig>::OPTIONS
    }

    /// Checks `options` against [`valid_options`](Indicator::valid_options).
    ///
    /// # Errors
    ///
    /// [`UnknownOption`](crate::ValidationError::UnknownOption) for any key
    /// outside the allow-list.
    fn validate_options(options: &Options) -> Result<()> {
        validation::validate_options(options, &Self::valid_options())
    }

    /// Minimum number of observations needed for one output record.
    #[must_use]
    fn min_data_size(config: &Self::Config) -> usize;

    /// Computes the indicator over `data`, supplied in any order.
    ///
    /// # Errors
    ///
    /// Any [`ValidationError`](crate::ValidationError) from input checks; no
    /// partial output is returned.
    fn calculate(data: &[Observation], config: &Self::Config) -> Result<Vec<Self::Output>>;

    /// Validates `options`, resolves the config, and computes.
    ///
    /// # Errors
    ///
    /// Option errors first, then input errors as for
    /// [`calculate`](Indicator::calculate).
    fn calculate_with_options(data: &[Observation], options: &Options) -> Result<Vec<Self::Output>> {
        let config = Self::Config::from_options(options)?;
        Self::calculate(data, &config)
    }
}
