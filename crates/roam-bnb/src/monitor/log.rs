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

//! A monitor that prints search progress to stdout.
//!
//! Each improving itinerary is printed with the traversal and comparison
//! counters at the moment of discovery, and the full statistics table is
//! printed when the search ends. This is the default reporting sink for
//! interactive use.

use crate::monitor::search_monitor::SearchMonitor;
use crate::stats::TourSolverStatistics;
use roam_model::route::Itinerary;
use roam_model::trip::Trip;
use roam_search::num::SolverNumeric;
use std::time::Instant;

/// Prints every improving itinerary and the final statistics.
#[derive(Debug)]
pub struct LogMonitor {
    started: Instant,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LogMonitor {
    /// Creates a new log monitor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl<T> SearchMonitor<T> for LogMonitor
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, trip: &Trip<T>) {
        self.started = Instant::now();
        println!(
            "searching tour of {} destinations from {} (start day {})",
            trip.num_destinations(),
            trip.distances().city_name(trip.home()),
            trip.start_day()
        );
    }

    fn on_solution(&mut self, itinerary: &Itinerary<T>, stats: &TourSolverStatistics) {
        println!(
            "[{:>10.3?}] home on day {} after {} traversals, {} comparisons",
            self.started.elapsed(),
            itinerary.total_days(),
            stats.traversals,
            stats.comparisons
        );
        println!("{}", itinerary);
    }

    fn on_exit_search(&mut self, stats: &TourSolverStatistics) {
        println!("{}", stats);
    }
}
