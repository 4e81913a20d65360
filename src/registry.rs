//! Lookup and dispatch of indicators by symbol.
//!
//! Generic callers (command lines, request handlers, signal generators) pick
//! an indicator from a string and pass dynamic [`Options`]. The set of
//! indicators is closed and known at compile time.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::{
    Dated, Indicator, IndicatorConfig, Observation, ObvMean, ObvMeanValue, OptionDescriptor,
    Options, Result, Timestamp, ValidationError, Watr, WatrValue,
};

/// Every indicator the crate implements.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum IndicatorKind {
    /// [`ObvMean`]
    ObvMean,
    /// [`Watr`]
    Watr,
}

/// Output record of any indicator.
///
/// Serializes as the wrapped record, without a tag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    ObvMean(ObvMeanValue),
    Watr(WatrValue),
}

impl Dated for IndicatorValue {
    fn date_time(&self) -> Option<&Timestamp> {
        match self {
            Self::ObvMean(v) => Dated::date_time(v),
            Self::Watr(v) => Dated::date_time(v),
        }
    }
}

impl Display for IndicatorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ObvMean(v) => Display::fmt(v, f),
            Self::Watr(v) => Display::fmt(v, f),
        }
    }
}

impl From<ObvMeanValue> for IndicatorValue {
    fn from(value: ObvMeanValue) -> Self {
        Self::ObvMean(value)
    }
}

impl From<WatrValue> for IndicatorValue {
    fn from(value: WatrValue) -> Self {
        Self::Watr(value)
    }
}

macro_rules! dispatch {
    ($kind:expr, $ind:ident => $body:expr) => {
        match $kind {
            IndicatorKind::ObvMean => {
                type $ind = ObvMean;
                $body
            }
            IndicatorKind::Watr => {
                type $ind = Watr;
                $body
            }
        }
    };
}

impl IndicatorKind {
    /// All indicators, in symbol order.
    pub const ALL: [IndicatorKind; 2] = [IndicatorKind::ObvMean, IndicatorKind::Watr];

    /// Looks up an indicator by its symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Symbolic name, e.g. `"watr"`.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        dispatch!(self, I => I::SYMBOL)
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        dispatch!(self, I => I::NAME)
    }

    /// Keys accepted in [`Options`].
    #[must_use]
    pub fn valid_options(self) -> Vec<&'static str> {
        dispatch!(self, I => <I as Indicator>::valid_options())
    }

    /// Option schema with defaults.
    #[must_use]
    pub fn option_descriptors(self) -> &'static [OptionDescriptor] {
        dispatch!(self, I => <I as Indicator>::option_descriptors())
    }

    /// Checks `options` against the indicator's allow-list.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownOption`] for any key outside the allow-list.
    pub fn validate_options(self, options: &Options) -> Result<()> {
        dispatch!(self, I => <I as Indicator>::validate_options(options))
    }

    /// Minimum number of observations for one output record under `options`.
    ///
    /// # Errors
    ///
    /// Option errors as for [`IndicatorConfig::from_options`].
    pub fn min_data_size(self, options: &Options) -> Result<usize> {
        dispatch!(self, I => {
            let config = <I as Indicator>::Config::from_options(options)?;
            Ok(<I as Indicator>::min_data_size(&config))
        })
    }

    /// Validates `options` and computes the indicator over `data`.
    ///
    /// # Errors
    ///
    /// Option errors first, then any input [`ValidationError`].
    pub fn calculate(self, data: &[Observation], options: &Options) -> Result<Vec<IndicatorValue>> {
        dispatch!(self, I => Ok(<I as Indicator>::calculate_with_options(data, options)?
            .into_iter()
            .map(IndicatorValue::from)
            .collect()))
    }
}

impl FromStr for IndicatorKind {
    type Err = ValidationError;

    fn from_str(symbol: &str) -> Result<Self> {
        Self::from_symbol(symbol).ok_or_else(|| ValidationError::UnknownIndicator(symbol.to_owned()))
    }
}

impl Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
