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

//! # Trip Planner
//!
//! The high-level entry point: resolve city names, assemble the instance,
//! run the engine, hand back the outcome. Everything below this layer
//! works in indices; this is where the name-based surface ends.

use roam_bnb::engine::TourSolver;
use roam_bnb::expand::SearchError;
use roam_bnb::monitor::search_monitor::SearchMonitor;
use roam_bnb::result::TourSolverOutcome;
use roam_bnb::strategy::TraversalStrategy;
use roam_model::distance::DistanceTable;
use roam_model::schedule::WaitSchedule;
use roam_model::trip::{Trip, TripBuildError};
use roam_search::num::SolverNumeric;
use std::fmt::Display;

/// An error produced while planning a trip.
#[derive(Debug)]
pub enum PlanError {
    /// A city name could not be resolved against the distance table.
    UnknownCity(String),
    /// The instance pieces do not fit together.
    Build(TripBuildError),
    /// The search itself failed.
    Search(SearchError),
}

impl Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::UnknownCity(name) => write!(f, "unknown city {:?}", name),
            PlanError::Build(err) => write!(f, "{}", err),
            PlanError::Search(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::UnknownCity(_) => None,
            PlanError::Build(err) => Some(err),
            PlanError::Search(err) => Some(err),
        }
    }
}

impl From<TripBuildError> for PlanError {
    fn from(err: TripBuildError) -> Self {
        PlanError::Build(err)
    }
}

impl From<SearchError> for PlanError {
    fn from(err: SearchError) -> Self {
        PlanError::Search(err)
    }
}

/// Plans minimum-duration closed tours with a fixed strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TripPlanner {
    strategy: TraversalStrategy,
}

impl TripPlanner {
    /// Creates a planner using the given traversal strategy.
    #[must_use]
    pub fn new(strategy: TraversalStrategy) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    #[must_use]
    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    /// Solves an already-assembled instance.
    pub fn plan<T, M>(
        &self,
        trip: &Trip<T>,
        monitor: M,
    ) -> Result<TourSolverOutcome<T>, PlanError>
    where
        T: SolverNumeric,
        M: SearchMonitor<T>,
    {
        Ok(TourSolver::new().solve(trip, self.strategy, monitor)?)
    }
}

/// Plans a tour from name-based inputs.
///
/// Resolves `home` and `destinations` against the distance table's name
/// space, builds the instance, and runs the engine. The outcome carries
/// the best itinerary together with the traversal and comparison counts.
pub fn run<T, M, S>(
    distances: DistanceTable<T>,
    schedule: WaitSchedule<T>,
    home: &str,
    destinations: &[S],
    start_day: T,
    strategy: TraversalStrategy,
    monitor: M,
) -> Result<TourSolverOutcome<T>, PlanError>
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
    S: AsRef<str>,
{
    let home_index = distances
        .index_of(home)
        .ok_or_else(|| PlanError::UnknownCity(home.to_string()))?;
    let mut destination_indices = Vec::with_capacity(destinations.len());
    for name in destinations {
        let name = name.as_ref();
        let index = distances
            .index_of(name)
            .ok_or_else(|| PlanError::UnknownCity(name.to_string()))?;
        destination_indices.push(index);
    }

    let trip = Trip::builder(distances, schedule)
        .home(home_index)
        .destinations(destination_indices)
        .start_day(start_day)
        .build()?;

    TripPlanner::new(strategy).plan(&trip, monitor)
}
