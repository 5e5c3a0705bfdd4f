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

//! # Search Statistics
//!
//! Diagnostic counters collected during a tour search. The counters are
//! observational only; no pruning or termination decision ever reads them.
//!
//! `traversals` counts expanded nodes and `comparisons` counts bound and
//! ordering checks, matching the counters the engine reports through its
//! outcome.

use std::fmt::Display;
use std::time::Duration;

/// Counters describing one engine run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourSolverStatistics {
    /// Number of nodes expanded.
    pub traversals: u64,

    /// Number of bound and ordering comparisons performed.
    pub comparisons: u64,

    /// Number of feasible candidate legs generated.
    pub candidates_generated: u64,

    /// Candidates or nodes cut off by a bound.
    pub prunings_bound: u64,

    /// Candidates cut off because the destination was closed or the
    /// arrival day was not reachable.
    pub prunings_infeasible: u64,

    /// Number of strictly improving itineraries recorded.
    pub solutions_found: u64,

    /// Frontier nodes discarded due to backpressure.
    pub nodes_dropped: u64,

    /// Deepest route prefix reached.
    pub max_depth: u64,

    /// Wall-clock time of the run.
    pub time_total: Duration,
}

impl TourSolverStatistics {
    /// Creates zeroed statistics.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn on_node_explored(&mut self) {
        self.traversals += 1;
    }

    #[inline(always)]
    pub fn on_comparison(&mut self) {
        self.comparisons += 1;
    }

    #[inline(always)]
    pub fn on_candidate_generated(&mut self) {
        self.candidates_generated += 1;
    }

    #[inline(always)]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound += 1;
    }

    #[inline(always)]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible += 1;
    }

    #[inline(always)]
    pub fn on_solution_found(&mut self) {
        self.solutions_found += 1;
    }

    #[inline(always)]
    pub fn on_node_dropped(&mut self) {
        self.nodes_dropped += 1;
    }

    #[inline(always)]
    pub fn on_depth_reached(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth as u64);
    }

    /// Folds another run's counters into this one.
    ///
    /// Used by the parallel driver to combine per-worker statistics;
    /// counters add, depth takes the maximum, time takes the maximum (the
    /// workers ran concurrently).
    pub fn merge(&mut self, other: &TourSolverStatistics) {
        self.traversals += other.traversals;
        self.comparisons += other.comparisons;
        self.candidates_generated += other.candidates_generated;
        self.prunings_bound += other.prunings_bound;
        self.prunings_infeasible += other.prunings_infeasible;
        self.solutions_found += other.solutions_found;
        self.nodes_dropped += other.nodes_dropped;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_total = self.time_total.max(other.time_total);
    }
}

impl Display for TourSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour Solver Statistics")?;
        writeln!(f, "{:-<40}", "")?;
        writeln!(f, "{:<28} {:>10}", "Traversals:", self.traversals)?;
        writeln!(f, "{:<28} {:>10}", "Comparisons:", self.comparisons)?;
        writeln!(
            f,
            "{:<28} {:>10}",
            "Candidates generated:", self.candidates_generated
        )?;
        writeln!(f, "{:<28} {:>10}", "Prunings (bound):", self.prunings_bound)?;
        writeln!(
            f,
            "{:<28} {:>10}",
            "Prunings (infeasible):", self.prunings_infeasible
        )?;
        writeln!(f, "{:<28} {:>10}", "Solutions found:", self.solutions_found)?;
        writeln!(f, "{:<28} {:>10}", "Nodes dropped:", self.nodes_dropped)?;
        writeln!(f, "{:<28} {:>10}", "Max depth:", self.max_depth)?;
        writeln!(f, "{:<28} {:>10?}", "Total time:", self.time_total)
    }
}
