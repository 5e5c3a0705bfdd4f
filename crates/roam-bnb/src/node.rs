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

//! # Frontier Nodes
//!
//! A [`FrontierNode`] is one partial tour in the best-first strategies: the
//! current position, the set of destinations still to visit, the elapsed
//! time, and the route prefix that led here.
//!
//! Nodes order by elapsed time ascending, then by fewest remaining
//! destinations, then by city index as a deterministic tie-break. The
//! priority frontiers wrap nodes in `std::cmp::Reverse` to turn the
//! standard max-heap into a min-heap.

use crate::expand::Candidate;
use fixedbitset::FixedBitSet;
use roam_model::city::CityIndex;
use roam_model::route::RouteStep;
use roam_search::num::SolverNumeric;
use std::cmp::Ordering;

/// One partial tour awaiting expansion.
#[derive(Debug, Clone)]
pub struct FrontierNode<T> {
    /// Where the partial tour currently stands.
    city: CityIndex,

    /// Destinations not yet visited, indexed by raw city index.
    remaining: FixedBitSet,

    /// Cached `remaining.count_ones(..)`; kept in sync by construction.
    remaining_count: usize,

    /// Absolute elapsed time at `city`, wait included.
    time_so_far: T,

    /// The legs taken so far, in order.
    route: Vec<RouteStep<T>>,
}

impl<T> FrontierNode<T>
where
    T: SolverNumeric,
{
    /// Creates the root node at the home city.
    #[must_use]
    pub fn root(home: CityIndex, destinations: &[CityIndex], num_cities: usize, start_day: T) -> Self {
        let mut remaining = FixedBitSet::with_capacity(num_cities);
        for &destination in destinations {
            remaining.insert(destination.get());
        }
        Self {
            city: home,
            remaining,
            remaining_count: destinations.len(),
            time_so_far: start_day,
            route: Vec::new(),
        }
    }

    /// Creates the child node reached by taking `candidate` from this node.
    #[must_use]
    pub fn child(&self, candidate: &Candidate<T>) -> Self {
        let mut remaining = self.remaining.clone();
        remaining.set(candidate.step.city().get(), false);
        let mut route = Vec::with_capacity(self.route.len() + 1);
        route.extend_from_slice(&self.route);
        route.push(candidate.step);
        Self {
            city: candidate.step.city(),
            remaining,
            remaining_count: self.remaining_count - 1,
            time_so_far: candidate.arrival_total,
            route,
        }
    }

    /// The node's current city.
    #[inline(always)]
    #[must_use]
    pub fn city(&self) -> CityIndex {
        self.city
    }

    /// Destinations still to visit.
    #[inline(always)]
    #[must_use]
    pub fn remaining(&self) -> &FixedBitSet {
        &self.remaining
    }

    /// Number of destinations still to visit.
    #[inline(always)]
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.remaining_count
    }

    /// Absolute elapsed time at the current city.
    #[inline(always)]
    #[must_use]
    pub fn time_so_far(&self) -> T {
        self.time_so_far
    }

    /// The legs taken so far.
    #[inline(always)]
    #[must_use]
    pub fn route(&self) -> &[RouteStep<T>] {
        &self.route
    }

    /// Depth of the node, i.e. the number of legs taken.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.route.len()
    }
}

impl<T> Ord for FrontierNode<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_so_far
            .cmp(&other.time_so_far)
            .then_with(|| self.remaining_count.cmp(&other.remaining_count))
            .then_with(|| self.city.cmp(&other.city))
    }
}

impl<T> PartialOrd for FrontierNode<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for FrontierNode<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierNode<T> where T: SolverNumeric {}
