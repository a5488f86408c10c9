// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::Display;
use std::num::NonZeroU32;

/// A single attempt made by the [`Retry`][super::Retry] middleware.
///
/// Attempts are indexed from zero. The attempt whose index is `max_attempts - 1` is the last
/// one: if it fails, its response is returned to the caller as is.
///
/// # Examples
///
/// ```
/// use strata_client::retry::Attempt;
///
/// let attempt = Attempt::new(1, true);
///
/// assert_eq!(attempt.index(), 1);
/// assert!(!attempt.is_first());
/// assert!(attempt.is_last());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    index: u32,
    is_last: bool,
}

impl Attempt {
    /// Creates an attempt with the given 0-based index.
    #[must_use]
    pub fn new(index: u32, is_last: bool) -> Self {
        Self { index, is_last }
    }

    pub(crate) fn first(max_attempts: NonZeroU32) -> Self {
        Self::new(0, max_attempts.get() == 1)
    }

    /// Returns the attempt following this one, or `None` once `max_attempts` are used up.
    pub(crate) fn next(self, max_attempts: NonZeroU32) -> Option<Self> {
        let next = self.index.saturating_add(1);

        if next >= max_attempts.get() {
            return None;
        }

        Some(Self::new(next, next == max_attempts.get().saturating_sub(1)))
    }

    /// Returns the 0-based index of this attempt.
    #[must_use]
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns `true` for the original call.
    #[must_use]
    pub fn is_first(self) -> bool {
        self.index == 0
    }

    /// Returns `true` if no further attempt is allowed after this one.
    #[must_use]
    pub fn is_last(self) -> bool {
        self.is_last
    }
}

impl Display for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.index.fmt(f)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    fn max(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn single_attempt_is_first_and_last() {
        let attempt = Attempt::first(max(1));

        assert!(attempt.is_first());
        assert!(attempt.is_last());
        assert_eq!(attempt.next(max(1)), None);
    }

    #[test]
    fn next_walks_to_last_attempt() {
        let first = Attempt::first(max(3));
        assert!(!first.is_last());

        let second = first.next(max(3)).unwrap();
        assert_eq!(second, Attempt::new(1, false));

        let third = second.next(max(3)).unwrap();
        assert_eq!(third, Attempt::new(2, true));

        assert_eq!(third.next(max(3)), None);
    }

    #[test]
    fn next_saturates_at_u32_max() {
        let attempt = Attempt::new(u32::MAX, false);

        assert_eq!(attempt.next(max(u32::MAX)), None);
    }

    #[test]
    fn display_shows_index() {
        assert_eq!(Attempt::new(42, false).to_string(), "42");
    }
}
