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

//! # Trip Instance
//!
//! The immutable problem instance handed to the solving engine: the
//! distance table, the wait schedule, the home city, the destination set
//! and the departure day.
//!
//! Construction goes through [`TripBuilder`], which validates the pieces
//! against each other once, up front. The engine can then index freely
//! without re-checking.

use crate::city::CityIndex;
use crate::distance::DistanceTable;
use crate::schedule::WaitSchedule;
use num_traits::{PrimInt, Signed};
use std::fmt::Display;

/// An error produced while assembling a [`Trip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripBuildError {
    /// The distance table and the wait schedule cover different city counts.
    CityCountMismatch { distances: usize, schedule: usize },
    /// The home city index is out of bounds.
    HomeOutOfBounds { home: usize, num_cities: usize },
    /// A destination index is out of bounds.
    DestinationOutOfBounds { destination: usize, num_cities: usize },
    /// The same destination was listed twice.
    DuplicateDestination { destination: usize },
    /// The home city was listed as a destination.
    HomeListedAsDestination { home: usize },
}

impl Display for TripBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripBuildError::CityCountMismatch {
                distances,
                schedule,
            } => write!(
                f,
                "distance table covers {} cities but wait schedule covers {}",
                distances, schedule
            ),
            TripBuildError::HomeOutOfBounds { home, num_cities } => {
                write!(f, "home city {} out of bounds ({} cities)", home, num_cities)
            }
            TripBuildError::DestinationOutOfBounds {
                destination,
                num_cities,
            } => write!(
                f,
                "destination {} out of bounds ({} cities)",
                destination, num_cities
            ),
            TripBuildError::DuplicateDestination { destination } => {
                write!(f, "destination {} listed more than once", destination)
            }
            TripBuildError::HomeListedAsDestination { home } => {
                write!(f, "home city {} cannot also be a destination", home)
            }
        }
    }
}

impl std::error::Error for TripBuildError {}

/// The immutable problem instance for one solve.
#[derive(Debug, Clone)]
pub struct Trip<T> {
    distances: DistanceTable<T>,
    schedule: WaitSchedule<T>,
    home: CityIndex,
    destinations: Vec<CityIndex>,
    start_day: T,
}

impl<T> Trip<T>
where
    T: PrimInt + Signed,
{
    /// Starts building a trip from its two data tables.
    #[must_use]
    pub fn builder(distances: DistanceTable<T>, schedule: WaitSchedule<T>) -> TripBuilder<T> {
        TripBuilder {
            distances,
            schedule,
            home: CityIndex::new(0),
            destinations: Vec::new(),
            start_day: T::zero(),
        }
    }

    /// The distance table.
    #[inline(always)]
    #[must_use]
    pub fn distances(&self) -> &DistanceTable<T> {
        &self.distances
    }

    /// The wait schedule.
    #[inline(always)]
    #[must_use]
    pub fn schedule(&self) -> &WaitSchedule<T> {
        &self.schedule
    }

    /// The home city the tour starts and ends at.
    #[inline(always)]
    #[must_use]
    pub fn home(&self) -> CityIndex {
        self.home
    }

    /// The destinations to visit, each exactly once.
    #[inline(always)]
    #[must_use]
    pub fn destinations(&self) -> &[CityIndex] {
        &self.destinations
    }

    /// The absolute day the tour departs.
    #[inline(always)]
    #[must_use]
    pub fn start_day(&self) -> T {
        self.start_day
    }

    /// Number of destinations to visit.
    #[inline]
    #[must_use]
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }
}

/// Mutable configuration stage for a [`Trip`].
#[derive(Debug, Clone)]
pub struct TripBuilder<T> {
    distances: DistanceTable<T>,
    schedule: WaitSchedule<T>,
    home: CityIndex,
    destinations: Vec<CityIndex>,
    start_day: T,
}

impl<T> TripBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Sets the home city.
    #[must_use]
    pub fn home(mut self, home: CityIndex) -> Self {
        self.home = home;
        self
    }

    /// Adds one destination.
    #[must_use]
    pub fn destination(mut self, destination: CityIndex) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Adds several destinations.
    #[must_use]
    pub fn destinations<I>(mut self, destinations: I) -> Self
    where
        I: IntoIterator<Item = CityIndex>,
    {
        self.destinations.extend(destinations);
        self
    }

    /// Sets the absolute departure day.
    #[must_use]
    pub fn start_day(mut self, start_day: T) -> Self {
        self.start_day = start_day;
        self
    }

    /// Validates the configuration and produces the immutable [`Trip`].
    pub fn build(self) -> Result<Trip<T>, TripBuildError> {
        let num_cities = self.distances.num_cities();
        if self.schedule.num_cities() != num_cities {
            return Err(TripBuildError::CityCountMismatch {
                distances: num_cities,
                schedule: self.schedule.num_cities(),
            });
        }
        if self.home.get() >= num_cities {
            return Err(TripBuildError::HomeOutOfBounds {
                home: self.home.get(),
                num_cities,
            });
        }
        let mut seen = vec![false; num_cities];
        for &destination in &self.destinations {
            if destination.get() >= num_cities {
                return Err(TripBuildError::DestinationOutOfBounds {
                    destination: destination.get(),
                    num_cities,
                });
            }
            if destination == self.home {
                return Err(TripBuildError::HomeListedAsDestination {
                    home: self.home.get(),
                });
            }
            if seen[destination.get()] {
                return Err(TripBuildError::DuplicateDestination {
                    destination: destination.get(),
                });
            }
            seen[destination.get()] = true;
        }
        Ok(Trip {
            distances: self.distances,
            schedule: self.schedule,
            home: self.home,
            destinations: self.destinations,
            start_day: self.start_day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::WaitTime;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("city{}", i)).collect()
    }

    fn open_schedule(num_cities: usize, horizon: usize) -> WaitSchedule<i64> {
        WaitSchedule::new(
            vec![vec![WaitTime::some(0); horizon]; num_cities],
            "day zero".to_string(),
        )
    }

    #[test]
    fn test_build_happy_path() {
        let trip = Trip::builder(DistanceTable::uniform(names(3), 1i64), open_schedule(3, 10))
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2)])
            .start_day(2)
            .build()
            .unwrap();
        assert_eq!(trip.home(), CityIndex::new(0));
        assert_eq!(trip.num_destinations(), 2);
        assert_eq!(trip.start_day(), 2);
    }

    #[test]
    fn test_build_rejects_city_count_mismatch() {
        let result = Trip::builder(DistanceTable::uniform(names(3), 1i64), open_schedule(2, 10))
            .build();
        assert_eq!(
            result.map(|_| ()),
            Err(TripBuildError::CityCountMismatch {
                distances: 3,
                schedule: 2
            })
        );
    }

    #[test]
    fn test_build_rejects_out_of_bounds() {
        let result = Trip::builder(DistanceTable::uniform(names(2), 1i64), open_schedule(2, 10))
            .home(CityIndex::new(5))
            .build();
        assert!(matches!(result, Err(TripBuildError::HomeOutOfBounds { .. })));

        let result = Trip::builder(DistanceTable::uniform(names(2), 1i64), open_schedule(2, 10))
            .destination(CityIndex::new(9))
            .build();
        assert!(matches!(
            result,
            Err(TripBuildError::DestinationOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_build_rejects_duplicates_and_home() {
        let result = Trip::builder(DistanceTable::uniform(names(3), 1i64), open_schedule(3, 10))
            .destinations([CityIndex::new(1), CityIndex::new(1)])
            .build();
        assert!(matches!(
            result,
            Err(TripBuildError::DuplicateDestination { .. })
        ));

        let result = Trip::builder(DistanceTable::uniform(names(3), 1i64), open_schedule(3, 10))
            .home(CityIndex::new(1))
            .destination(CityIndex::new(1))
            .build();
        assert!(matches!(
            result,
            Err(TripBuildError::HomeListedAsDestination { .. })
        ));
    }
}
