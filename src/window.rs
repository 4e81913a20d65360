use crate::Price;
use std::collections::VecDeque;

/// Fixed-size trailing window of values.
///
/// Values enter at the back; once the window holds `size` values the oldest
/// one is evicted on every push. The mean is summed from the buffered values
/// on each call, so a rounding loss never outlives the values that caused it.
#[derive(Clone, Debug)]
pub(crate) struct TrailingWindow {
    size: usize,
    window: VecDeque<Price>,
}

impl TrailingWindow {
    pub fn new(size: usize) -> Self {
        debug_assert!(size > 0, "window size must be positive");

        Self {
            size,
            window: VecDeque::with_capacity(size),
        }
    }

    /// Appends `value`, returning the evicted oldest value once full.
    #[inline]
    pub fn push(&mut self, value: Price) -> Option<Price> {
        let evicted = if self.is_full() {
            self.window.pop_front()
        } else {
            None
        };

        self.window.push_back(value);

        evicted
    }

    /// Drops the oldest value without adding a new one.
    #[inline]
    pub fn pop_oldest(&mut self) -> Option<Price> {
        self.window.pop_front()
    }

    /// Arithmetic mean, available only while the window is exactly full.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Option<Price> {
        self.is_full()
            .then(|| self.window.iter().sum::<Price>() / self.size as f64)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.window.len() == self.size
    }
}
