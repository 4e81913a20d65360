//! Batch technical analysis indicators for Rust.
//!
//! Indicators take a slice of dated [`Observation`]s in any order, validate
//! it, sort it chronologically, and return one typed record per qualifying
//! window. Every call recomputes from the full input; nothing is kept
//! between calls.
//!
//! Each indicator type ([`ObvMean`], [`Watr`]) exposes
//! [`calculate`](Watr::calculate), [`symbol`](Watr::symbol),
//! [`name`](Watr::name), [`valid_options`](Watr::valid_options),
//! [`validate_options`](Watr::validate_options) and
//! [`min_data_size`](Watr::min_data_size) as inherent functions, so no trait
//! import is needed. Import [`Indicator`] only for generic code, or use
//! [`IndicatorKind`] to select an indicator by symbol at runtime.
//!
//! Invalid input is reported as a [`ValidationError`]; no partial output is
//! ever returned.

mod error;
mod field;
mod indicator;
mod obv_mean;
mod observation;
mod options;
mod ordering;
mod registry;
mod signal;
mod validation;
mod watr;
mod window;

pub use crate::error::{Result, ValidationError};
pub use crate::field::{Field, true_range};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::observation::{Observation, Price, Timestamp};
pub use crate::options::{OptionDescriptor, Options};
pub use crate::ordering::{Dated, ascending, descending};
pub use crate::registry::{IndicatorKind, IndicatorValue};
pub use crate::signal::{Direction, Notification, Signal};
pub use crate::validation::{
    validate_date_time_key, validate_length, validate_numeric_data, validate_options,
};

pub use crate::obv_mean::{ObvMean, ObvMeanConfig, ObvMeanConfigBuilder, ObvMeanValue};
pub use crate::watr::{Watr, WatrConfig, WatrConfigBuilder, WatrValue};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::SYMBOL`].
            #[must_use]
            pub fn symbol() -> &'static str {
                <Self as Indicator>::SYMBOL
            }

            /// See [`Indicator::NAME`].
            #[must_use]
            pub fn name() -> &'static str {
                <Self as Indicator>::NAME
            }

            /// See [`Indicator::valid_options`].
            #[must_use]
            pub fn valid_options() -> Vec<&'static str> {
                <Self as Indicator>::valid_options()
            }

            /// See [`Indicator::validate_options`].
            ///
            /// # Errors
            ///
            /// [`ValidationError::UnknownOption`] for keys outside the
            /// allow-list.
            pub fn validate_options(options: &Options) -> Result<()> {
                <Self as Indicator>::validate_options(options)
            }

            /// See [`Indicator::min_data_size`].
            #[must_use]
            pub fn min_data_size(config: &$config) -> usize {
                <Self as Indicator>::min_data_size(config)
            }

            /// See [`Indicator::calculate`].
            ///
            /// # Errors
            ///
            /// Any [`ValidationError`] from input checks.
            pub fn calculate(data: &[Observation], config: &$config) -> Result<Vec<$output>> {
                <Self as Indicator>::calculate(data, config)
            }

            /// See [`Indicator::calculate_with_options`].
            ///
            /// # Errors
            ///
            /// Option errors, then input errors.
            pub fn calculate_with_options(
                data: &[Observation],
                options: &Options,
            ) -> Result<Vec<$output>> {
                <Self as Indicator>::calculate_with_options(data, options)
            }
        }
    };
}

impl_indicator_methods!(ObvMean, ObvMeanConfig, ObvMeanValue);
impl_indicator_methods!(Watr, WatrConfig, WatrValue);

#[cfg(test)]
mod test_util;
