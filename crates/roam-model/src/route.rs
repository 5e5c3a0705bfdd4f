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

//! # Routes and Itineraries
//!
//! The output side of the model: a [`RouteStep`] is one visited leg of a
//! tour (travel days plus wait days at the destination), and an
//! [`Itinerary`] is a complete closed tour with its total duration.

use crate::city::CityIndex;
use num_traits::{PrimInt, Signed};
use std::cmp::Ordering;
use std::fmt::Display;

/// One leg of a tour: travel to `city`, then wait until it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteStep<T> {
    /// The visited city.
    city: CityIndex,

    /// Travel lead time to reach the city, in days.
    travel_days: T,

    /// Days spent waiting at the city before the visit.
    wait_days: T,
}

impl<T> RouteStep<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new step.
    #[inline]
    #[must_use]
    pub fn new(city: CityIndex, travel_days: T, wait_days: T) -> Self {
        Self {
            city,
            travel_days,
            wait_days,
        }
    }

    /// The visited city.
    #[inline(always)]
    #[must_use]
    pub fn city(&self) -> CityIndex {
        self.city
    }

    /// The travel lead time of this leg, in days.
    #[inline(always)]
    #[must_use]
    pub fn travel_days(&self) -> T {
        self.travel_days
    }

    /// The wait at the destination, in days.
    #[inline(always)]
    #[must_use]
    pub fn wait_days(&self) -> T {
        self.wait_days
    }

    /// The combined cost of this leg in days.
    #[inline(always)]
    #[must_use]
    pub fn total_days(&self) -> T {
        self.travel_days + self.wait_days
    }
}

// Ordered by combined leg cost, tie-broken by city index so that sorting
// candidate lists is deterministic across runs.
impl<T> Ord for RouteStep<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_days()
            .cmp(&other.total_days())
            .then_with(|| self.city.cmp(&other.city))
    }
}

impl<T> PartialOrd for RouteStep<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Display for RouteStep<T>
where
    T: PrimInt + Signed + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (travel {}, wait {})",
            self.city, self.travel_days, self.wait_days
        )
    }
}

/// A complete closed tour.
///
/// `steps` lists every visited destination in order, exactly once each. The
/// return leg to the home city is not a step; its travel time is stored
/// separately in `return_travel_days`. `total_days` is the absolute day on
/// which the tour arrives back home, counted on the same axis the wait
/// schedule uses (the tour departs on `start_day`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary<T> {
    /// Absolute day on which the tour is back at the home city.
    total_days: T,

    /// Absolute day on which the tour departs.
    start_day: T,

    /// Visited destinations, in order.
    steps: Vec<RouteStep<T>>,

    /// Travel lead time of the final leg back home.
    return_travel_days: T,
}

impl<T> Itinerary<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new itinerary.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the leg costs do not add up to
    /// `total_days - start_day`.
    #[must_use]
    pub fn new(total_days: T, start_day: T, steps: Vec<RouteStep<T>>, return_travel_days: T) -> Self {
        debug_assert!(
            {
                let legs = steps
                    .iter()
                    .fold(T::zero(), |acc, step| acc + step.total_days());
                legs + return_travel_days == total_days - start_day
            },
            "called `Itinerary::new` with inconsistent leg costs"
        );
        Self {
            total_days,
            start_day,
            steps,
            return_travel_days,
        }
    }

    /// Absolute day on which the tour is back home.
    #[inline(always)]
    #[must_use]
    pub fn total_days(&self) -> T {
        self.total_days
    }

    /// Absolute departure day.
    #[inline(always)]
    #[must_use]
    pub fn start_day(&self) -> T {
        self.start_day
    }

    /// Elapsed duration of the tour in days.
    #[inline]
    #[must_use]
    pub fn elapsed_days(&self) -> T {
        self.total_days - self.start_day
    }

    /// The visited destinations, in order.
    #[inline(always)]
    #[must_use]
    pub fn steps(&self) -> &[RouteStep<T>] {
        &self.steps
    }

    /// Travel lead time of the final leg back home.
    #[inline(always)]
    #[must_use]
    pub fn return_travel_days(&self) -> T {
        self.return_travel_days
    }

    /// Number of destinations visited.
    #[inline]
    #[must_use]
    pub fn num_visits(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the tour visits no destinations.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T> Display for Itinerary<T>
where
    T: PrimInt + Signed + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Itinerary (start day {}, home on day {})",
            self.start_day, self.total_days
        )?;
        writeln!(f, "{:>6} | {:>8} | {:>6} | {:>6}", "Leg", "City", "Travel", "Wait")?;
        writeln!(f, "{:->6}-+-{:->8}-+-{:->6}-+-{:->6}", "", "", "", "")?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(
                f,
                "{:>6} | {:>8} | {:>6} | {:>6}",
                i,
                step.city().get(),
                step.travel_days(),
                step.wait_days()
            )?;
        }
        writeln!(
            f,
            "{:>6} | {:>8} | {:>6} | {:>6}",
            "home", "-", self.return_travel_days, 0
        )
    }
}
