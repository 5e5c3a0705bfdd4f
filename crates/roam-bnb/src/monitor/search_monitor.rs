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

//! # Search Monitor
//!
//! The observation and control seam of the engine. A monitor is notified
//! when a search starts, every time a strictly improving itinerary is
//! recorded, and when the search ends; it can also ask the engine to stop
//! via [`SearchCommand`].
//!
//! Improvement notifications are delivered in discovery order with
//! strictly decreasing totals, in every strategy including the parallel
//! one.

use crate::stats::TourSolverStatistics;
use roam_model::route::Itinerary;
use roam_model::trip::Trip;
use roam_search::num::SolverNumeric;

/// The monitor's verdict when polled by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommand {
    /// Keep searching.
    Continue,
    /// Stop the search; the reason ends up in the outcome.
    Terminate(String),
}

/// Observes and optionally steers a running search.
///
/// All methods have no-op defaults so implementations only override what
/// they care about. Monitors must be `Send`; the parallel strategy calls
/// them from worker threads (serialized, never concurrently).
pub trait SearchMonitor<T>: Send
where
    T: SolverNumeric,
{
    /// Human-readable monitor name, used in diagnostics.
    fn name(&self) -> &str;

    /// Called once before the first node is expanded.
    fn on_enter_search(&mut self, trip: &Trip<T>) {
        let _ = trip;
    }

    /// Called for every strictly improving itinerary, in discovery order.
    ///
    /// In the single-threaded strategies `stats` carries the run's counters
    /// at the moment of discovery. In the parallel strategy each worker
    /// keeps private counters, so `stats` covers only the discovering
    /// worker; the merged totals arrive with
    /// [`on_exit_search`](Self::on_exit_search).
    fn on_solution(&mut self, itinerary: &Itinerary<T>, stats: &TourSolverStatistics) {
        let _ = itinerary;
        let _ = stats;
    }

    /// Called once after the search has ended, however it ended.
    fn on_exit_search(&mut self, stats: &TourSolverStatistics) {
        let _ = stats;
    }

    /// Polled at every node expansion.
    fn search_command(&mut self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, trip: &Trip<T>) {
        (**self).on_enter_search(trip);
    }

    fn on_solution(&mut self, itinerary: &Itinerary<T>, stats: &TourSolverStatistics) {
        (**self).on_solution(itinerary, stats);
    }

    fn on_exit_search(&mut self, stats: &TourSolverStatistics) {
        (**self).on_exit_search(stats);
    }

    fn search_command(&mut self) -> SearchCommand {
        (**self).search_command()
    }
}
