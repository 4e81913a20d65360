use crate::{Result, ValidationError};

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Named indicator parameters supplied by a generic caller.
///
/// Keys are option names (e.g. `"period"`); values are whatever the caller
/// parsed from its own input (CLI flags, JSON request bodies, config files).
/// Indicators check keys against their allow-list and resolve values against
/// their [`OptionDescriptor`]s.
pub type Options = BTreeMap<String, Value>;

/// Schema entry for one integer option.
///
/// Each indicator declares a fixed slice of descriptors; generic callers use
/// it to list, document and default the indicator's parameters.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct OptionDescriptor {
    /// Option key.
    pub name: &'static str,
    /// One-line description for help output.
    pub description: &'static str,
    /// Value used when the option is absent.
    pub default: usize,
    /// Smallest accepted value.
    pub minimum: usize,
}

impl OptionDescriptor {
    /// Resolves this option from `options`, falling back to the default.
    ///
    /// Accepts JSON integers and integral floats (`14` or `14.0`).
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidOptionValue`] if the value is not a
    /// non-negative integer or is below [`minimum`](Self::minimum).
    pub fn resolve(&self, options: &Options) -> Result<usize> {
        let Some(value) = options.get(self.name) else {
            return Ok(self.default);
        };

        let resolved = Self::as_integer(value).ok_or_else(|| {
            debug!(option = self.name, %value, "option is not a non-negative integer");
            ValidationError::InvalidOptionValue {
                option: self.name,
                reason: format!("expected a non-negative integer, got {value}"),
            }
        })?;

        self.check(resolved)
    }

    /// Checks a typed value against [`minimum`](Self::minimum).
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidOptionValue`] if `value < minimum`.
    pub fn check(&self, value: usize) -> Result<usize> {
        if value < self.minimum {
            debug!(option = self.name, value, minimum = self.minimum, "option below minimum");
            return Err(ValidationError::InvalidOptionValue {
                option: self.name,
                reason: format!("must be at least {}, got {value}", self.minimum),
            });
        }

        Ok(value)
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    fn as_integer(value: &Value) -> Option<usize> {
        if let Some(n) = value.as_u64() {
            return usize::try_from(n).ok();
        }

        let f = value.as_f64()?;
        (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX.into()).then(|| f as usize)
    }
}

/// Names of `descriptors`, in declaration order.
#[must_use]
pub fn option_names(descriptors: &[OptionDescriptor]) -> Vec<&'static str> {
    descriptors.iter().map(|d| d.name).collect()
}
