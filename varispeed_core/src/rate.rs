// Copyright 2026 the Varispeed Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Playback-rate multipliers and the fixed table of selectable rates.
//!
//! [`PlaybackRate`] is a positive multiplier applied to a video's normal
//! playback speed (1 = normal). [`RateSet`] is the ordered, immutable
//! sequence the selector offers; [`RateSet::standard`] is the eight-entry
//! table the host control ships with.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// A playback-speed multiplier (1.0 = normal speed).
///
/// Always positive. Displayed in the host's `"x" + rate` idiom with no
/// trailing zeros: `x1`, `x0.25`, `x1.5`.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Creates a rate from a raw multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not finite and positive.
    #[inline]
    #[must_use]
    pub fn new(multiplier: f64) -> Self {
        assert!(
            multiplier.is_finite() && multiplier > 0.0,
            "playback rate must be finite and positive"
        );
        Self(multiplier)
    }

    /// Returns the raw multiplier.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the menu/button label for this rate, e.g. `"x1.5"`.
    #[must_use]
    pub fn label(self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 Display drops the fractional part of whole numbers, which is
        // exactly the host's label form ("x1", not "x1.0").
        write!(f, "x{}", self.0)
    }
}

impl fmt::Debug for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaybackRate({})", self.0)
    }
}

/// The raw multipliers of [`RateSet::standard`], in ascending order.
pub const STANDARD_RATES: [f64; 8] = [0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// An ordered, immutable sequence of selectable playback rates.
///
/// Invariant: strictly increasing and all positive, checked at construction.
/// Fixed for the life of the selector; one menu item is built per entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RateSet {
    rates: Vec<PlaybackRate>,
}

impl RateSet {
    /// Creates a rate set from the given multipliers.
    ///
    /// # Panics
    ///
    /// Panics if `rates` is empty or not strictly increasing. Positivity is
    /// enforced by [`PlaybackRate::new`].
    #[must_use]
    pub fn new(rates: Vec<PlaybackRate>) -> Self {
        assert!(!rates.is_empty(), "rate set must not be empty");
        assert!(
            rates.windows(2).all(|pair| pair[0].value() < pair[1].value()),
            "rate set must be strictly increasing"
        );
        Self { rates }
    }

    /// The eight-rate table offered by the speed control:
    /// 0.25 through 2 in quarter steps.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_RATES.iter().map(|&r| PlaybackRate::new(r)).collect())
    }

    /// Number of rates in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns `true` if the set is empty (never true for a constructed set).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Returns the rate at `index`, if in range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<PlaybackRate> {
        self.rates.get(index).copied()
    }

    /// Iterates the rates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PlaybackRate> + '_ {
        self.rates.iter().copied()
    }

    /// Index of normal speed (multiplier 1), the assumed initial playback
    /// rate of the host video. Falls back to the first entry for sets that
    /// do not contain 1.
    #[must_use]
    pub fn default_index(&self) -> usize {
        self.rates
            .iter()
            .position(|r| r.value() == 1.0)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn labels_drop_trailing_zeros() {
        assert_eq!(PlaybackRate::new(1.0).label(), "x1");
        assert_eq!(PlaybackRate::new(0.25).label(), "x0.25");
        assert_eq!(PlaybackRate::new(1.5).label(), "x1.5");
        assert_eq!(PlaybackRate::new(2.0).label(), "x2");
    }

    #[test]
    fn standard_set_is_the_eight_quarter_steps() {
        let set = RateSet::standard();
        assert_eq!(set.len(), 8);
        let values: Vec<f64> = set.iter().map(PlaybackRate::value).collect();
        assert_eq!(values, STANDARD_RATES.to_vec());
    }

    #[test]
    fn standard_set_defaults_to_normal_speed() {
        let set = RateSet::standard();
        assert_eq!(set.default_index(), 3);
        assert_eq!(set.get(3).unwrap().value(), 1.0);
    }

    #[test]
    fn default_index_falls_back_to_first_entry() {
        let set = RateSet::new(vec![PlaybackRate::new(0.5), PlaybackRate::new(2.0)]);
        assert_eq!(set.default_index(), 0);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn unordered_set_is_rejected() {
        let _ = RateSet::new(vec![PlaybackRate::new(1.0), PlaybackRate::new(0.5)]);
    }

    #[test]
    #[should_panic(expected = "finite and positive")]
    fn non_positive_rate_is_rejected() {
        let _ = PlaybackRate::new(0.0);
    }
}
