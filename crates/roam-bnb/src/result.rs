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

//! # Engine Outcome
//!
//! What one engine run produced: the result, why the search stopped, and
//! the statistics collected along the way.

use crate::stats::TourSolverStatistics;
use roam_model::route::Itinerary;
use roam_search::num::SolverNumeric;
use roam_search::result::{SolverResult, TerminationReason};
use std::fmt::Display;

/// The complete outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: TourSolverStatistics,
}

impl<T> TourSolverOutcome<T>
where
    T: SolverNumeric,
{
    /// An exhausted search that found a tour: the tour is optimal.
    #[must_use]
    pub fn optimal(itinerary: Itinerary<T>, statistics: TourSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(itinerary),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// An exhausted search that found nothing: no tour exists.
    #[must_use]
    pub fn infeasible(statistics: TourSolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// A search that dropped frontier nodes: whatever was found is only
    /// known to be feasible.
    #[must_use]
    pub fn saturated(
        best: Option<Itinerary<T>>,
        statistics: TourSolverStatistics,
    ) -> Self {
        let result = match best {
            Some(itinerary) => SolverResult::Feasible(itinerary),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::FrontierSaturated,
            statistics,
        }
    }

    /// A search stopped early by a monitor.
    #[must_use]
    pub fn aborted(
        reason: String,
        best: Option<Itinerary<T>>,
        statistics: TourSolverStatistics,
    ) -> Self {
        let result = match best {
            Some(itinerary) => SolverResult::Feasible(itinerary),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason),
            statistics,
        }
    }

    /// The result of the run.
    #[inline]
    #[must_use]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Why the run stopped.
    #[inline]
    #[must_use]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// The counters collected during the run.
    #[inline]
    #[must_use]
    pub fn statistics(&self) -> &TourSolverStatistics {
        &self.statistics
    }

    /// The best itinerary found, if any.
    #[inline]
    #[must_use]
    pub fn best_itinerary(&self) -> Option<&Itinerary<T>> {
        self.result.itinerary()
    }

    /// The best total found, if any.
    #[inline]
    #[must_use]
    pub fn best_total(&self) -> Option<T> {
        self.best_itinerary().map(Itinerary::total_days)
    }
}

impl<T> Display for TourSolverOutcome<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({})", self.result, self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}
