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

//! # Search Results
//!
//! The outcome vocabulary shared by all engines: what was found
//! ([`SolverResult`]) and why the search stopped ([`TerminationReason`]).
//! The two are deliberately separate; a `Feasible` result with
//! `FrontierSaturated` tells a different story than the same result with
//! `Aborted`.

use crate::num::SolverNumeric;
use roam_model::route::Itinerary;
use std::fmt::Display;

/// What the search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The itinerary is proven to be a minimum-duration tour.
    Optimal(Itinerary<T>),
    /// A valid tour was found, but optimality could not be proven.
    Feasible(Itinerary<T>),
    /// No valid tour exists for the instance.
    Infeasible,
    /// Nothing was found and infeasibility could not be proven either.
    Unknown,
}

impl<T> SolverResult<T>
where
    T: SolverNumeric,
{
    /// Returns the itinerary, if one was found.
    #[inline]
    #[must_use]
    pub fn itinerary(&self) -> Option<&Itinerary<T>> {
        match self {
            SolverResult::Optimal(itinerary) | SolverResult::Feasible(itinerary) => {
                Some(itinerary)
            }
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Returns `true` if the result carries a proven-optimal itinerary.
    #[inline]
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }
}

impl<T> Display for SolverResult<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(itinerary) => {
                write!(f, "optimal, home on day {}", itinerary.total_days())
            }
            SolverResult::Feasible(itinerary) => {
                write!(f, "feasible, home on day {}", itinerary.total_days())
            }
            SolverResult::Infeasible => write!(f, "no solution found"),
            SolverResult::Unknown => write!(f, "unknown"),
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted and a tour was found.
    OptimalityProven,
    /// The search space was exhausted and no tour exists.
    InfeasibilityProven,
    /// The bounded frontier dropped nodes, so exhaustion does not imply
    /// optimality or infeasibility.
    FrontierSaturated,
    /// A monitor requested termination.
    Aborted(String),
}

impl Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "optimality proven"),
            TerminationReason::InfeasibilityProven => write!(f, "infeasibility proven"),
            TerminationReason::FrontierSaturated => write!(f, "frontier saturated"),
            TerminationReason::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_model::route::Itinerary;

    fn itinerary(total: i64) -> Itinerary<i64> {
        Itinerary::new(total, total, Vec::new(), 0)
    }

    #[test]
    fn test_itinerary_accessor() {
        assert_eq!(
            SolverResult::Optimal(itinerary(5)).itinerary().unwrap().total_days(),
            5
        );
        assert!(SolverResult::<i64>::Infeasible.itinerary().is_none());
        assert!(SolverResult::<i64>::Unknown.itinerary().is_none());
    }

    #[test]
    fn test_is_optimal() {
        assert!(SolverResult::Optimal(itinerary(1)).is_optimal());
        assert!(!SolverResult::Feasible(itinerary(1)).is_optimal());
    }

    #[test]
    fn test_display() {
        assert_eq!(SolverResult::<i64>::Infeasible.to_string(), "no solution found");
        assert_eq!(
            TerminationReason::Aborted("time limit".to_string()).to_string(),
            "aborted: time limit"
        );
        assert_eq!(
            TerminationReason::FrontierSaturated.to_string(),
            "frontier saturated"
        );
    }
}
