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

//! # Wait Schedules
//!
//! Per-city, per-day availability data.
//!
//! Two distinct "absent" cases exist and must never be conflated:
//!
//! * **Closed**: the city has a schedule entry for the day, but it marks the
//!   city unavailable. Encoded in-band as a negative [`WaitTime`] sentinel so
//!   the hot search loop stays branch-cheap. A closed day makes a candidate
//!   infeasible and is pruned silently.
//! * **Beyond the horizon**: the day is past the end of the city's schedule
//!   row. This is missing configuration, not unavailability, and surfaces as
//!   `None` from [`WaitSchedule::wait_on`] so the caller can fail loudly.

use crate::city::CityIndex;
use num_traits::{PrimInt, Signed};
use std::fmt::Display;

/// A wait time in days, with an in-band "closed" sentinel.
///
/// This is a single-word alternative to `Option<T>`: any negative value
/// means the city is closed on that day, and non-negative values are the
/// wait in days until the visit can take place. The niche keeps schedule
/// rows flat in memory and comparisons branch-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaitTime<T>(T);

impl<T> WaitTime<T>
where
    T: PrimInt + Signed,
{
    /// Creates a `WaitTime` representing an open day with the given wait.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `days` is negative.
    #[inline(always)]
    #[must_use]
    pub fn some(days: T) -> Self {
        debug_assert!(
            days >= T::zero(),
            "called `WaitTime::some` with a negative wait"
        );
        Self(days)
    }

    /// Creates the "closed" sentinel.
    #[inline(always)]
    #[must_use]
    pub fn none() -> Self {
        Self(-T::one())
    }

    /// Creates a `WaitTime` from an `Option`, mapping `None` to the sentinel.
    #[inline(always)]
    #[must_use]
    pub fn from_option(days: Option<T>) -> Self {
        match days {
            Some(d) => Self::some(d),
            None => Self::none(),
        }
    }

    /// Returns `true` if this value is the "closed" sentinel.
    #[inline(always)]
    #[must_use]
    pub fn is_none(self) -> bool {
        self.0 < T::zero()
    }

    /// Returns `true` if the day is open.
    #[inline(always)]
    #[must_use]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Converts back into an `Option`, mapping the sentinel to `None`.
    #[inline(always)]
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        if self.is_none() {
            None
        } else {
            Some(self.0)
        }
    }

    /// Returns the wait in days, or `default` if the day is closed.
    #[inline(always)]
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        if self.is_none() {
            default
        } else {
            self.0
        }
    }
}

impl<T> From<Option<T>> for WaitTime<T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from(days: Option<T>) -> Self {
        Self::from_option(days)
    }
}

impl<T> From<WaitTime<T>> for Option<T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn from(wait: WaitTime<T>) -> Self {
        wait.into_option()
    }
}

impl<T> Display for WaitTime<T>
where
    T: PrimInt + Signed + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "closed")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Per-city availability rows indexed by absolute day.
///
/// Row `c` covers days `0..horizon(c)` for city `c`. Rows may have different
/// lengths; a lookup past the end of a row returns `None`, which callers
/// treat as a configuration error rather than a closed day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSchedule<T> {
    /// `rows[c][d]` is the wait for city `c` on absolute day `d`.
    rows: Vec<Vec<WaitTime<T>>>,

    /// Human-readable label of day 0, as declared by the schedule source.
    first_day_label: String,
}

impl<T> WaitSchedule<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a schedule from per-city rows and the label of day 0.
    #[must_use]
    pub fn new(rows: Vec<Vec<WaitTime<T>>>, first_day_label: String) -> Self {
        Self {
            rows,
            first_day_label,
        }
    }

    /// Returns the number of cities covered by the schedule.
    #[inline]
    #[must_use]
    pub fn num_cities(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of days covered for the given city.
    #[inline]
    #[must_use]
    pub fn horizon(&self, city: CityIndex) -> usize {
        self.rows[city.get()].len()
    }

    /// Returns the wait for `city` on absolute `day`.
    ///
    /// `None` means the day lies beyond the city's schedule horizon. A
    /// closed day is `Some(WaitTime)` with [`WaitTime::is_none`] set.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `city` is out of bounds.
    #[inline]
    #[must_use]
    pub fn wait_on(&self, city: CityIndex, day: usize) -> Option<WaitTime<T>> {
        debug_assert!(
            city.get() < self.rows.len(),
            "called `WaitSchedule::wait_on` with out-of-bounds city: city = {}, num_cities = {}",
            city.get(),
            self.rows.len()
        );
        self.rows[city.get()].get(day).copied()
    }

    /// Returns the label of day 0.
    #[inline]
    #[must_use]
    pub fn first_day_label(&self) -> &str {
        &self.first_day_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_time_sentinel_round_trip() {
        let open: WaitTime<i64> = WaitTime::some(3);
        let closed: WaitTime<i64> = WaitTime::none();
        assert!(open.is_some());
        assert!(closed.is_none());
        assert_eq!(open.into_option(), Some(3));
        assert_eq!(closed.into_option(), None);
        assert_eq!(closed.unwrap_or(9), 9);
    }

    #[test]
    fn test_wait_time_from_option() {
        assert_eq!(WaitTime::from_option(Some(0i32)).into_option(), Some(0));
        assert!(WaitTime::<i32>::from_option(None).is_none());
    }

    #[test]
    fn test_wait_time_display() {
        assert_eq!(WaitTime::some(2i64).to_string(), "2");
        assert_eq!(WaitTime::<i64>::none().to_string(), "closed");
    }

    #[test]
    fn test_horizon_is_distinct_from_closed() {
        let schedule: WaitSchedule<i64> = WaitSchedule::new(
            vec![vec![WaitTime::some(0), WaitTime::none()]],
            "day zero".to_string(),
        );
        let city = CityIndex::new(0);
        assert_eq!(schedule.horizon(city), 2);
        // Day 1 exists but is closed.
        assert!(schedule.wait_on(city, 1).is_some());
        assert!(schedule.wait_on(city, 1).unwrap().is_none());
        // Day 2 is past the horizon entirely.
        assert_eq!(schedule.wait_on(city, 2), None);
    }

    #[test]
    fn test_first_day_label() {
        let schedule: WaitSchedule<i32> = WaitSchedule::new(vec![], "06/01".to_string());
        assert_eq!(schedule.first_day_label(), "06/01");
    }
}
