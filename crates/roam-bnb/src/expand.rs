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

//! # Node Expansion
//!
//! Candidate generation for one search node, shared by every traversal
//! strategy.
//!
//! Remaining destinations are scanned in ascending city order. A running
//! sum, seeded with the node's elapsed time, accumulates each candidate's
//! travel distance as the scan proceeds; a candidate whose running sum has
//! reached the incumbent bound is skipped. The sum keeps accumulating over
//! skipped candidates, so which candidates survive depends on scan order.
//! That asymmetry is part of the engine's defined behavior and all
//! strategies share it by sharing this code.
//!
//! Feasibility at a candidate distinguishes three cases:
//!
//! * arrival day before day 0: not reachable this season, pruned quietly.
//! * schedule says closed (`x`): pruned quietly.
//! * arrival day past the schedule horizon: missing configuration, the
//!   whole search fails with [`SearchError::ScheduleHorizon`].

use crate::stats::TourSolverStatistics;
use fixedbitset::FixedBitSet;
use roam_model::city::CityIndex;
use roam_model::route::RouteStep;
use roam_model::trip::Trip;
use roam_search::num::SolverNumeric;
use smallvec::SmallVec;
use std::fmt::Display;

/// A fatal error raised during search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A reachable arrival day lies beyond a city's schedule horizon.
    ///
    /// This means the schedule data does not cover the season the search
    /// is exploring. It is a configuration defect, deliberately distinct
    /// from the in-band "closed" sentinel.
    ScheduleHorizon {
        city: String,
        day: usize,
        horizon: usize,
    },
}

impl Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::ScheduleHorizon {
                city,
                day,
                horizon,
            } => write!(
                f,
                "schedule for city {:?} ends on day {} but day {} is reachable",
                city, horizon, day
            ),
        }
    }
}

impl std::error::Error for SearchError {}

/// One feasible extension of a partial tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<T> {
    /// The leg: destination, travel days, wait days.
    pub step: RouteStep<T>,

    /// Absolute elapsed time after taking the leg, wait included.
    pub arrival_total: T,
}

/// Inline capacity for candidate buffers; instances rarely have more
/// remaining destinations than this.
pub(crate) type CandidateBuffer<T> = SmallVec<[Candidate<T>; 16]>;

/// Generates the feasible candidate legs out of a node.
///
/// `best_days` is the incumbent bound used by the cumulative-distance
/// prune. Candidates are emitted in ascending city order; sorting is the
/// caller's concern.
pub(crate) fn generate_candidates<T>(
    trip: &Trip<T>,
    from: CityIndex,
    remaining: &FixedBitSet,
    time_so_far: T,
    best_days: T,
    stats: &mut TourSolverStatistics,
) -> Result<CandidateBuffer<T>, SearchError>
where
    T: SolverNumeric,
{
    let mut candidates = CandidateBuffer::new();
    let mut running = time_so_far;

    for raw in remaining.ones() {
        let city = CityIndex::new(raw);
        let travel = trip.distances().days(from, city);
        running = running + travel;

        stats.on_comparison();
        if running >= best_days {
            stats.on_pruning_bound();
            continue;
        }

        let arrival = time_so_far + travel;
        if arrival < T::zero() {
            // The season has not started yet on this arrival day.
            stats.on_pruning_infeasible();
            continue;
        }
        let day = match arrival.to_usize() {
            Some(day) => day,
            None => {
                return Err(SearchError::ScheduleHorizon {
                    city: trip.distances().city_name(city).to_string(),
                    day: usize::MAX,
                    horizon: trip.schedule().horizon(city),
                })
            }
        };

        let wait = trip.schedule().wait_on(city, day).ok_or_else(|| {
            SearchError::ScheduleHorizon {
                city: trip.distances().city_name(city).to_string(),
                day,
                horizon: trip.schedule().horizon(city),
            }
        })?;

        stats.on_comparison();
        let Some(wait_days) = wait.into_option() else {
            stats.on_pruning_infeasible();
            continue;
        };

        stats.on_candidate_generated();
        candidates.push(Candidate {
            step: RouteStep::new(city, travel, wait_days),
            arrival_total: arrival + wait_days,
        });
    }

    Ok(candidates)
}
