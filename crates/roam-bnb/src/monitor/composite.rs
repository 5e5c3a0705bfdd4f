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

//! A monitor that fans out to several child monitors.
//!
//! Notifications go to every child in insertion order. The first child
//! that asks for termination wins; later children are not polled.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::TourSolverStatistics;
use roam_model::route::Itinerary;
use roam_model::trip::Trip;
use roam_search::num::SolverNumeric;

/// Fans out monitor callbacks to a list of children.
pub struct CompositeMonitor<T> {
    children: Vec<Box<dyn SearchMonitor<T>>>,
}

impl<T> Default for CompositeMonitor<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<T> CompositeMonitor<T>
where
    T: SolverNumeric,
{
    /// Creates an empty composite.
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Adds a child monitor.
    #[must_use]
    pub fn with(mut self, child: Box<dyn SearchMonitor<T>>) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a child monitor in place.
    pub fn push(&mut self, child: Box<dyn SearchMonitor<T>>) {
        self.children.push(child);
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T> SearchMonitor<T> for CompositeMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, trip: &Trip<T>) {
        for child in &mut self.children {
            child.on_enter_search(trip);
        }
    }

    fn on_solution(&mut self, itinerary: &Itinerary<T>, stats: &TourSolverStatistics) {
        for child in &mut self.children {
            child.on_solution(itinerary, stats);
        }
    }

    fn on_exit_search(&mut self, stats: &TourSolverStatistics) {
        for child in &mut self.children {
            child.on_exit_search(stats);
        }
    }

    fn search_command(&mut self) -> SearchCommand {
        for child in &mut self.children {
            if let SearchCommand::Terminate(reason) = child.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}
