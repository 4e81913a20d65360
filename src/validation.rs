//! Input checks run before any indicator computation.
//!
//! Each check is side-effect-free and all-or-nothing: it either accepts the
//! whole input or returns the first [`ValidationError`] it finds.

use crate::{Field, Observation, Options, Result, ValidationError};

use tracing::debug;

/// Checks that every observation holds a number under each of `fields`.
///
/// # Errors
///
/// [`ValidationError::MissingField`] if an observation lacks a field, or
/// [`ValidationError::NonNumericValue`] if the stored value is not a number.
/// The reported index is the position in `data` as supplied.
pub fn validate_numeric_data(data: &[Observation], fields: &[Field]) -> Result<()> {
    for (index, observation) in data.iter().enumerate() {
        for &field in fields {
            match observation.get(field.key()) {
                None => {
                    debug!(%field, index, "observation is missing a required field");
                    return Err(ValidationError::MissingField {
                        field: field.key(),
                        index,
                    });
                }
                Some(value) if !value.is_number() => {
                    debug!(%field, index, %value, "observation holds a non-numeric value");
                    return Err(ValidationError::NonNumericValue {
                        field: field.key(),
                        index,
                        value: value.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

/// Checks that `data` holds at least `minimum` observations.
///
/// # Errors
///
/// [`ValidationError::InsufficientData`] if `data.len() < minimum`.
pub fn validate_length(data: &[Observation], minimum: usize) -> Result<()> {
    if data.len() < minimum {
        debug!(
            required = minimum,
            actual = data.len(),
            "not enough observations"
        );
        return Err(ValidationError::InsufficientData {
            required: minimum,
            actual: data.len(),
        });
    }

    Ok(())
}

/// Checks that every observation has a timestamp.
///
/// # Errors
///
/// [`ValidationError::MissingField`] with field `date_time` for the first
/// undated observation.
pub fn validate_date_time_key(data: &[Observation]) -> Result<()> {
    match data.iter().position(|o| o.date_time().is_none()) {
        Some(index) => {
            debug!(index, "observation has no date_time");
            Err(ValidationError::MissingField {
                field: "date_time",
                index,
            })
        }
        None => Ok(()),
    }
}

/// Checks that `options` only uses keys from `allowed_keys`.
///
/// # Errors
///
/// [`ValidationError::UnknownOption`] naming the first key outside the
/// allow-list.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use technical_analysis::{Options, ValidationError, validate_options};
///
/// let options: Options = serde_json::from_value(json!({ "period": 22 })).unwrap();
/// assert!(validate_options(&options, &["period"]).is_ok());
///
/// let options: Options = serde_json::from_value(json!({ "bogus": 1 })).unwrap();
/// assert_eq!(
///     validate_options(&options, &["period"]),
///     Err(ValidationError::UnknownOption("bogus".to_owned())),
/// );
/// ```
pub fn validate_options(options: &Options, allowed_keys: &[&str]) -> Result<()> {
    match options
        .keys()
        .find(|key| !allowed_keys.contains(&key.as_str()))
    {
        Some(key) => {
            debug!(option = %key, ?allowed_keys, "unknown option");
            Err(ValidationError::UnknownOption(key.clone()))
        }
        None => Ok(()),
    }
}

/// Numeric value of `field`, reported as a validation error when absent.
///
/// Kernels call this after [`validate_numeric_data`], so the error path only
/// guards against inconsistent callers.
#[inline]
pub(crate) fn number(observation: &Observation, field: Field, index: usize) -> Result<f64> {
    observation
        .number(field)
        .ok_or_else(|| match observation.get(field.key()) {
            None => ValidationError::MissingField {
                field: field.key(),
                index,
            },
            Some(value) => ValidationError::NonNumericValue {
                field: field.key(),
                index,
                value: value.to_string(),
            },
        })
}
