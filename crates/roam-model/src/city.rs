// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # City Index
//!
//! A strongly-typed wrapper around a `usize` identifying a city.
//!
//! All tables in this crate (distances, wait schedules, destination lists)
//! are indexed by `CityIndex`. The wrapper exists to keep raw positional
//! integers from leaking into the solver and being confused with day counts.

use std::fmt::Display;

/// A strongly-typed index identifying a city.
///
/// Cities are numbered `0..num_cities` in the order the distance table
/// declares them. The index carries no name; name resolution lives on
/// [`DistanceTable`](crate::distance::DistanceTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CityIndex(usize);

impl CityIndex {
    /// Creates a new `CityIndex` from a raw positional index.
    #[inline(always)]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying `usize` value.
    #[inline(always)]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for CityIndex {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<CityIndex> for usize {
    #[inline(always)]
    fn from(index: CityIndex) -> Self {
        index.get()
    }
}

impl Display for CityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CityIndex({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_get_round_trip() {
        let city = CityIndex::new(7);
        assert_eq!(city.get(), 7);
    }

    #[test]
    fn test_conversions() {
        let city: CityIndex = 3usize.into();
        assert_eq!(usize::from(city), 3);
    }

    #[test]
    fn test_ordering_follows_raw_index() {
        assert!(CityIndex::new(1) < CityIndex::new(2));
        assert_eq!(CityIndex::new(4), CityIndex::new(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(CityIndex::new(5).to_string(), "CityIndex(5)");
    }
}
