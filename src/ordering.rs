use crate::{Observation, Timestamp};

/// A record with an optional timestamp.
///
/// Implemented by [`Observation`] and by every indicator's output record so
/// the same ordering rules apply to input and output.
pub trait Dated {
    /// Timestamp of the record. Undated records sort first.
    fn date_time(&self) -> Option<&Timestamp>;
}

impl Dated for Observation {
    #[inline]
    fn date_time(&self) -> Option<&Timestamp> {
        Observation::date_time(self)
    }
}

/// Returns the records of `data` in ascending chronological order.
///
/// The sort is stable: records sharing a timestamp keep their relative input
/// order. `data` itself is left untouched; the result is a fresh sequence of
/// references into it.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use technical_analysis::{Observation, ascending};
///
/// let later = Observation::new(Utc.with_ymd_and_hms(2019, 1, 3, 0, 0, 0).unwrap());
/// let earlier = Observation::new(Utc.with_ymd_and_hms(2019, 1, 2, 0, 0, 0).unwrap());
/// let data = vec![later.clone(), earlier.clone()];
///
/// assert_eq!(ascending(&data), vec![&earlier, &later]);
/// assert_eq!(data, vec![later, earlier]);
/// ```
#[must_use]
pub fn ascending<T: Dated>(data: &[T]) -> Vec<&T> {
    ascending_indexed(data)
        .into_iter()
        .map(|(_, record)| record)
        .collect()
}

/// Like [`ascending`], paired with each record's position in `data`.
pub(crate) fn ascending_indexed<T: Dated>(data: &[T]) -> Vec<(usize, &T)> {
    let mut ordered: Vec<(usize, &T)> = data.iter().enumerate().collect();
    ordered.sort_by(|(_, a), (_, b)| a.date_time().cmp(&b.date_time()));
    ordered
}

/// Sorts owned records most-recent-first.
///
/// Records are stable-sorted ascending and then reversed, so records sharing a
/// timestamp come out in reverse of their emission order.
#[must_use]
pub fn descending<T: Dated>(mut records: Vec<T>) -> Vec<T> {
    records.sort_by(|a, b| a.date_time().cmp(&b.date_time()));
    records.reverse();
    records
}
