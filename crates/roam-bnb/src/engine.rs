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

//! # Tour Solver Engine
//!
//! The exact branch-and-bound engine. One [`TourSolver`] solves one
//! [`Trip`] at a time under a chosen [`TraversalStrategy`]; all strategies
//! share the same node expansion and bounds and therefore return the same
//! optimal total.
//!
//! ## Bounds
//!
//! * The initial upper bound is trivial but valid: the home city's
//!   schedule horizon. Any tour must be back before the schedule data
//!   runs out, or the search fails loudly anyway.
//! * At node entry, the cardinality bound prunes nodes that cannot beat
//!   the incumbent even if every remaining leg took a single day.
//! * Candidate generation applies the cumulative-distance prune (see
//!   [`crate::expand`]).
//! * Before a candidate is accepted or extended, the final-leg bound adds
//!   the direct travel home; a candidate that cannot return under the
//!   incumbent is cut.
//!
//! Every improving itinerary flows through a [`SharedIncumbent`], so
//! multiple engine runs may share one register and tighten each other.

use crate::expand::{generate_candidates, SearchError};
use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::node::FrontierNode;
use crate::parallel;
use crate::result::TourSolverOutcome;
use crate::stats::TourSolverStatistics;
use crate::strategy::TraversalStrategy;
use fixedbitset::FixedBitSet;
use roam_model::route::{Itinerary, RouteStep};
use roam_model::trip::Trip;
use roam_search::incumbent::SharedIncumbent;
use roam_search::num::SolverNumeric;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::marker::PhantomData;
use std::time::Instant;

/// Returns the instance's trivial upper bound: the home schedule horizon.
pub(crate) fn trivial_upper_bound<T>(trip: &Trip<T>) -> T
where
    T: SolverNumeric,
{
    T::from_usize(trip.schedule().horizon(trip.home())).unwrap_or_else(T::max_value)
}

/// The exact tour search engine.
#[derive(Debug, Clone)]
pub struct TourSolver<T> {
    /// The node-entry cardinality bound. On by default; the switch exists
    /// so the bound's soundness can be checked against an unbounded run.
    cardinality_bound: bool,
    _marker: PhantomData<T>,
}

impl<T> Default for TourSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TourSolver<T>
where
    T: SolverNumeric,
{
    /// Creates an engine with all bounds enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cardinality_bound: true,
            _marker: PhantomData,
        }
    }

    /// Enables or disables the node-entry cardinality bound.
    #[must_use]
    pub fn with_cardinality_bound(mut self, enabled: bool) -> Self {
        self.cardinality_bound = enabled;
        self
    }

    /// Solves `trip` with a private incumbent register.
    pub fn solve<M>(
        &self,
        trip: &Trip<T>,
        strategy: TraversalStrategy,
        monitor: M,
    ) -> Result<TourSolverOutcome<T>, SearchError>
    where
        M: SearchMonitor<T>,
    {
        let incumbent = SharedIncumbent::new();
        self.solve_shared(trip, strategy, &incumbent, monitor)
    }

    /// Solves `trip` against a caller-provided incumbent register.
    ///
    /// The register may already hold a bound from another run; this run
    /// will only report itineraries that beat it.
    pub fn solve_shared<M>(
        &self,
        trip: &Trip<T>,
        strategy: TraversalStrategy,
        incumbent: &SharedIncumbent<T>,
        mut monitor: M,
    ) -> Result<TourSolverOutcome<T>, SearchError>
    where
        M: SearchMonitor<T>,
    {
        if trip.num_destinations() == 0 {
            return Ok(Self::solve_trivial(trip, incumbent, &mut monitor));
        }
        match strategy {
            TraversalStrategy::Depth => {
                SearchSession::new(trip, incumbent, monitor, self.cardinality_bound, false)
                    .run_depth()
            }
            TraversalStrategy::SortedDepth => {
                SearchSession::new(trip, incumbent, monitor, self.cardinality_bound, true)
                    .run_depth()
            }
            TraversalStrategy::Breadth => {
                SearchSession::new(trip, incumbent, monitor, self.cardinality_bound, false)
                    .run_breadth()
            }
            TraversalStrategy::Parallel(config) => parallel::run_parallel(
                trip,
                config,
                incumbent,
                monitor,
                self.cardinality_bound,
            ),
        }
    }

    /// An empty destination set: the tour is already closed on the start
    /// day.
    fn solve_trivial<M>(
        trip: &Trip<T>,
        incumbent: &SharedIncumbent<T>,
        monitor: &mut M,
    ) -> TourSolverOutcome<T>
    where
        M: SearchMonitor<T>,
    {
        let started = Instant::now();
        monitor.on_enter_search(trip);
        let mut stats = TourSolverStatistics::new();
        let itinerary = Itinerary::new(trip.start_day(), trip.start_day(), Vec::new(), T::zero());
        if incumbent.try_install(&itinerary) {
            stats.on_solution_found();
            monitor.on_solution(&itinerary, &stats);
        }
        stats.time_total = started.elapsed();
        monitor.on_exit_search(&stats);
        TourSolverOutcome::optimal(itinerary, stats)
    }
}

/// State for one single-threaded search run.
struct SearchSession<'a, T, M> {
    trip: &'a Trip<T>,
    incumbent: &'a SharedIncumbent<T>,
    monitor: M,
    stats: TourSolverStatistics,
    /// Local copy of the incumbent bound, refreshed at every node.
    best_days: T,
    aborted: Option<String>,
    cardinality_bound: bool,
    sorted: bool,
}

impl<'a, T, M> SearchSession<'a, T, M>
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    fn new(
        trip: &'a Trip<T>,
        incumbent: &'a SharedIncumbent<T>,
        monitor: M,
        cardinality_bound: bool,
        sorted: bool,
    ) -> Self {
        let best_days = incumbent.tighten(trivial_upper_bound(trip));
        Self {
            trip,
            incumbent,
            monitor,
            stats: TourSolverStatistics::new(),
            best_days,
            aborted: None,
            cardinality_bound,
            sorted,
        }
    }

    fn run_depth(mut self) -> Result<TourSolverOutcome<T>, SearchError> {
        let started = Instant::now();
        self.monitor.on_enter_search(self.trip);

        let root = FrontierNode::root(
            self.trip.home(),
            self.trip.destinations(),
            self.trip.distances().num_cities(),
            self.trip.start_day(),
        );
        let mut route = Vec::with_capacity(self.trip.num_destinations());
        self.traverse(
            root.city(),
            root.remaining(),
            root.remaining_count(),
            root.time_so_far(),
            &mut route,
        )?;

        Ok(self.finalize(started))
    }

    fn traverse(
        &mut self,
        city: roam_model::city::CityIndex,
        remaining: &FixedBitSet,
        remaining_count: usize,
        time_so_far: T,
        route: &mut Vec<RouteStep<T>>,
    ) -> Result<(), SearchError> {
        self.stats.on_node_explored();
        self.stats.on_depth_reached(route.len());
        if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
            self.aborted = Some(reason);
            return Ok(());
        }
        self.best_days = self.incumbent.tighten(self.best_days);

        if self.prune_by_cardinality(time_so_far, remaining_count) {
            return Ok(());
        }

        let mut candidates = generate_candidates(
            self.trip,
            city,
            remaining,
            time_so_far,
            self.best_days,
            &mut self.stats,
        )?;
        if self.sorted {
            let mut comparisons = 0u64;
            candidates.sort_by(|a, b| {
                comparisons += 1;
                a.step.cmp(&b.step)
            });
            self.stats.comparisons += comparisons;
        }

        for candidate in candidates {
            let home_leg = self
                .trip
                .distances()
                .days(candidate.step.city(), self.trip.home());
            let total_with_return = candidate.arrival_total + home_leg;
            self.stats.on_comparison();
            if total_with_return >= self.best_days {
                self.stats.on_pruning_bound();
                continue;
            }

            route.push(candidate.step);
            if remaining_count == 1 {
                self.record_solution(total_with_return, route.clone(), home_leg);
            } else {
                let mut child_remaining = remaining.clone();
                child_remaining.set(candidate.step.city().get(), false);
                self.traverse(
                    candidate.step.city(),
                    &child_remaining,
                    remaining_count - 1,
                    candidate.arrival_total,
                    route,
                )?;
            }
            route.pop();

            if self.aborted.is_some() {
                break;
            }
        }
        Ok(())
    }

    fn run_breadth(mut self) -> Result<TourSolverOutcome<T>, SearchError> {
        let started = Instant::now();
        self.monitor.on_enter_search(self.trip);

        let mut heap: BinaryHeap<Reverse<FrontierNode<T>>> = BinaryHeap::new();
        heap.push(Reverse(FrontierNode::root(
            self.trip.home(),
            self.trip.destinations(),
            self.trip.distances().num_cities(),
            self.trip.start_day(),
        )));

        while let Some(Reverse(node)) = heap.pop() {
            self.stats.on_node_explored();
            self.stats.on_depth_reached(node.depth());
            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                self.aborted = Some(reason);
                break;
            }
            self.best_days = self.incumbent.tighten(self.best_days);

            // Nodes queued before the incumbent improved may be stale.
            self.stats.on_comparison();
            if node.time_so_far() >= self.best_days {
                self.stats.on_pruning_bound();
                continue;
            }
            if self.prune_by_cardinality(node.time_so_far(), node.remaining_count()) {
                continue;
            }

            let candidates = generate_candidates(
                self.trip,
                node.city(),
                node.remaining(),
                node.time_so_far(),
                self.best_days,
                &mut self.stats,
            )?;

            for candidate in candidates {
                let home_leg = self
                    .trip
                    .distances()
                    .days(candidate.step.city(), self.trip.home());
                let total_with_return = candidate.arrival_total + home_leg;
                self.stats.on_comparison();
                if total_with_return >= self.best_days {
                    self.stats.on_pruning_bound();
                    continue;
                }

                if node.remaining_count() == 1 {
                    let mut steps = node.route().to_vec();
                    steps.push(candidate.step);
                    self.record_solution(total_with_return, steps, home_leg);
                } else {
                    heap.push(Reverse(node.child(&candidate)));
                }
            }
        }

        Ok(self.finalize(started))
    }

    /// Node-entry bound: even one day per remaining destination cannot
    /// beat the incumbent.
    fn prune_by_cardinality(&mut self, time_so_far: T, remaining_count: usize) -> bool {
        if !self.cardinality_bound {
            return false;
        }
        self.stats.on_comparison();
        let floor = time_so_far
            .saturating_add(T::from_usize(remaining_count).unwrap_or_else(T::max_value));
        if floor >= self.best_days {
            self.stats.on_pruning_bound();
            return true;
        }
        false
    }

    fn record_solution(&mut self, total_days: T, steps: Vec<RouteStep<T>>, return_leg: T) {
        if total_days >= self.best_days {
            self.stats.on_pruning_bound();
            return;
        }
        let itinerary = Itinerary::new(total_days, self.trip.start_day(), steps, return_leg);
        self.best_days = total_days;
        self.stats.on_solution_found();
        self.incumbent.try_install(&itinerary);
        self.monitor.on_solution(&itinerary, &self.stats);
    }

    fn finalize(mut self, started: Instant) -> TourSolverOutcome<T> {
        self.stats.time_total = started.elapsed();
        self.monitor.on_exit_search(&self.stats);
        // The register is the source of truth, not the session-local best:
        // with a caller-seeded register this run may have found no
        // improvement even though the register holds a tour.
        let best = self.incumbent.snapshot();
        match self.aborted {
            Some(reason) => TourSolverOutcome::aborted(reason, best, self.stats),
            None => match best {
                Some(itinerary) => TourSolverOutcome::optimal(itinerary, self.stats),
                None => TourSolverOutcome::infeasible(self.stats),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use crate::strategy::ParallelConfig;
    use roam_model::city::CityIndex;
    use roam_model::distance::DistanceTable;
    use roam_model::schedule::{WaitSchedule, WaitTime};
    use roam_search::result::{SolverResult, TerminationReason};

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("city{}", i)).collect()
    }

    fn open_schedule(num_cities: usize, horizon: usize) -> WaitSchedule<i64> {
        WaitSchedule::new(
            vec![vec![WaitTime::some(0); horizon]; num_cities],
            "day zero".to_string(),
        )
    }

    fn ring_trip() -> Trip<i64> {
        // 4 cities, every leg 1 day, everything open: optimum is 4.
        Trip::builder(DistanceTable::uniform(names(4), 1), open_schedule(4, 32))
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2), CityIndex::new(3)])
            .build()
            .unwrap()
    }

    fn asymmetric_trip() -> Trip<i64> {
        // Optimal order matters: 0 -> 2 -> 1 -> 3 -> 0 costs 1+1+1+1 = 4,
        // anything else costs more.
        let rows = vec![
            vec![0, 4, 1, 5],
            vec![4, 0, 9, 1],
            vec![1, 1, 0, 9],
            vec![1, 9, 9, 0],
        ];
        let table = DistanceTable::from_rows(names(4), rows).unwrap();
        Trip::builder(table, open_schedule(4, 64))
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2), CityIndex::new(3)])
            .build()
            .unwrap()
    }

    fn wait_trip() -> Trip<i64> {
        // Waits shift the trade-off: arriving at city 1 early costs extra
        // days of waiting, so visiting city 2 first is cheaper overall.
        let mut rows = vec![vec![WaitTime::some(0); 64]; 3];
        rows[1][1] = WaitTime::some(2);
        rows[1][2] = WaitTime::some(1);
        let schedule = WaitSchedule::new(rows, "day zero".to_string());
        Trip::builder(DistanceTable::uniform(names(3), 1), schedule)
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2)])
            .build()
            .unwrap()
    }

    fn all_strategies() -> Vec<TraversalStrategy> {
        vec![
            TraversalStrategy::Depth,
            TraversalStrategy::SortedDepth,
            TraversalStrategy::Breadth,
            TraversalStrategy::Parallel(ParallelConfig {
                queue_capacity: 1 << 16,
                workers: 4,
            }),
        ]
    }

    fn solve(trip: &Trip<i64>, strategy: TraversalStrategy) -> TourSolverOutcome<i64> {
        TourSolver::new()
            .solve(trip, strategy, NoOperationMonitor::new())
            .unwrap()
    }

    #[test]
    fn test_ring_optimum_is_four() {
        for strategy in all_strategies() {
            let outcome = solve(&ring_trip(), strategy);
            assert_eq!(outcome.best_total(), Some(4), "strategy {}", strategy);
            assert!(outcome.result().is_optimal(), "strategy {}", strategy);
        }
    }

    #[test]
    fn test_strategies_agree_on_asymmetric_instance() {
        let trip = asymmetric_trip();
        let reference = solve(&trip, TraversalStrategy::Depth).best_total();
        assert!(reference.is_some());
        for strategy in all_strategies() {
            assert_eq!(
                solve(&trip, strategy).best_total(),
                reference,
                "strategy {}",
                strategy
            );
        }
    }

    #[test]
    fn test_strategies_agree_with_waits() {
        let trip = wait_trip();
        let reference = solve(&trip, TraversalStrategy::Depth).best_total();
        for strategy in all_strategies() {
            assert_eq!(
                solve(&trip, strategy).best_total(),
                reference,
                "strategy {}",
                strategy
            );
        }
    }

    #[test]
    fn test_route_visits_every_destination_once() {
        for strategy in all_strategies() {
            let trip = asymmetric_trip();
            let outcome = solve(&trip, strategy);
            let itinerary = outcome.best_itinerary().unwrap();
            assert_eq!(itinerary.num_visits(), trip.num_destinations());
            let mut visited: Vec<usize> =
                itinerary.steps().iter().map(|s| s.city().get()).collect();
            visited.sort_unstable();
            assert_eq!(visited, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_leg_costs_add_up() {
        let trip = wait_trip();
        let outcome = solve(&trip, TraversalStrategy::SortedDepth);
        let itinerary = outcome.best_itinerary().unwrap();
        let legs: i64 = itinerary.steps().iter().map(|s| s.total_days()).sum();
        assert_eq!(
            legs + itinerary.return_travel_days(),
            itinerary.elapsed_days()
        );
    }

    #[test]
    fn test_start_day_shifts_total() {
        let base = solve(&ring_trip(), TraversalStrategy::Depth)
            .best_total()
            .unwrap();
        let shifted_trip =
            Trip::builder(DistanceTable::uniform(names(4), 1), open_schedule(4, 32))
                .home(CityIndex::new(0))
                .destinations([CityIndex::new(1), CityIndex::new(2), CityIndex::new(3)])
                .start_day(5)
                .build()
                .unwrap();
        let shifted = solve(&shifted_trip, TraversalStrategy::Depth)
            .best_total()
            .unwrap();
        assert_eq!(shifted, base + 5);
    }

    #[test]
    fn test_cardinality_bound_does_not_change_optimum() {
        let trip = asymmetric_trip();
        for strategy in all_strategies() {
            let with_bound = TourSolver::new()
                .solve(&trip, strategy, NoOperationMonitor::new())
                .unwrap();
            let without_bound = TourSolver::new()
                .with_cardinality_bound(false)
                .solve(&trip, strategy, NoOperationMonitor::new())
                .unwrap();
            assert_eq!(
                with_bound.best_total(),
                without_bound.best_total(),
                "strategy {}",
                strategy
            );
        }
    }

    #[test]
    fn test_always_closed_destination_is_infeasible() {
        let mut rows = vec![vec![WaitTime::some(0); 32]; 3];
        rows[2] = vec![WaitTime::none(); 32];
        let schedule = WaitSchedule::new(rows, "day zero".to_string());
        let trip = Trip::builder(DistanceTable::uniform(names(3), 1), schedule)
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2)])
            .build()
            .unwrap();
        for strategy in all_strategies() {
            let outcome = solve(&trip, strategy);
            assert_eq!(outcome.result(), &SolverResult::Infeasible, "strategy {}", strategy);
            assert!(
                matches!(
                    outcome.termination_reason(),
                    TerminationReason::InfeasibilityProven
                ),
                "strategy {}",
                strategy
            );
        }
    }

    #[test]
    fn test_horizon_overflow_fails_loudly() {
        // City 2 only has data for day 0; reaching it takes at least one
        // day, so the search must error rather than treat it as closed.
        let rows = vec![
            vec![WaitTime::some(0); 32],
            vec![WaitTime::some(0); 32],
            vec![WaitTime::some(0); 1],
        ];
        let schedule = WaitSchedule::new(rows, "day zero".to_string());
        let trip = Trip::builder(DistanceTable::uniform(names(3), 1), schedule)
            .home(CityIndex::new(0))
            .destinations([CityIndex::new(1), CityIndex::new(2)])
            .build()
            .unwrap();
        let result = TourSolver::new().solve(&trip, TraversalStrategy::Depth, NoOperationMonitor::new());
        assert!(matches!(result, Err(SearchError::ScheduleHorizon { .. })));
    }

    #[test]
    fn test_empty_destination_set_is_trivially_optimal() {
        let trip = Trip::builder(DistanceTable::uniform(names(2), 1), open_schedule(2, 8))
            .home(CityIndex::new(0))
            .start_day(3)
            .build()
            .unwrap();
        let outcome = solve(&trip, TraversalStrategy::Breadth);
        assert_eq!(outcome.best_total(), Some(3));
        let itinerary = outcome.best_itinerary().unwrap();
        assert!(itinerary.is_empty());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let trip = asymmetric_trip();
        let first = solve(&trip, TraversalStrategy::SortedDepth);
        let second = solve(&trip, TraversalStrategy::SortedDepth);
        assert_eq!(first.best_total(), second.best_total());
        assert_eq!(first.best_itinerary(), second.best_itinerary());
        assert_eq!(
            first.statistics().traversals,
            second.statistics().traversals
        );
        assert_eq!(
            first.statistics().comparisons,
            second.statistics().comparisons
        );
    }

    #[test]
    fn test_improvements_strictly_decrease() {
        struct Recorder {
            totals: Vec<i64>,
        }
        impl SearchMonitor<i64> for Recorder {
            fn name(&self) -> &str {
                "Recorder"
            }
            fn on_solution(
                &mut self,
                itinerary: &Itinerary<i64>,
                _stats: &TourSolverStatistics,
            ) {
                self.totals.push(itinerary.total_days());
            }
        }

        let trip = asymmetric_trip();
        let mut recorder = Recorder { totals: Vec::new() };
        TourSolver::new()
            .solve(&trip, TraversalStrategy::Depth, &mut recorder)
            .unwrap();
        assert!(!recorder.totals.is_empty());
        assert!(recorder.totals.windows(2).all(|pair| pair[1] < pair[0]));
    }

    #[test]
    fn test_interrupt_aborts_cleanly() {
        use crate::monitor::interrupt::InterruptMonitor;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(true));
        let outcome = TourSolver::new()
            .solve(
                &asymmetric_trip(),
                TraversalStrategy::Depth,
                InterruptMonitor::new(Arc::clone(&flag)),
            )
            .unwrap();
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        flag.store(false, Ordering::Relaxed);
    }

    #[test]
    fn test_shared_incumbent_tightens_second_run() {
        let trip = asymmetric_trip();
        let incumbent = SharedIncumbent::new();
        let first = TourSolver::new()
            .solve_shared(
                &trip,
                TraversalStrategy::Depth,
                &incumbent,
                NoOperationMonitor::new(),
            )
            .unwrap();
        let optimum: i64 = first.best_total().unwrap().into();
        assert_eq!(incumbent.upper_bound(), optimum);

        // A second run against the same register cannot improve on the
        // optimum, so it records no solutions of its own.
        let second = TourSolver::new()
            .solve_shared(
                &trip,
                TraversalStrategy::SortedDepth,
                &incumbent,
                NoOperationMonitor::new(),
            )
            .unwrap();
        assert_eq!(second.statistics().solutions_found, 0);
    }

    #[test]
    fn test_seeded_register_outcome_agrees_across_strategies() {
        // A run that cannot improve on an already-seeded register must
        // still report the register's tour, in every strategy.
        let trip = asymmetric_trip();
        let incumbent = SharedIncumbent::new();
        let first = TourSolver::new()
            .solve_shared(
                &trip,
                TraversalStrategy::Depth,
                &incumbent,
                NoOperationMonitor::new(),
            )
            .unwrap();
        let optimum = first.best_total();
        assert!(optimum.is_some());

        for strategy in all_strategies() {
            let rerun = TourSolver::new()
                .solve_shared(&trip, strategy, &incumbent, NoOperationMonitor::new())
                .unwrap();
            assert!(rerun.result().is_optimal(), "strategy {}", strategy);
            assert_eq!(rerun.best_total(), optimum, "strategy {}", strategy);
        }
    }

    #[test]
    fn test_tiny_parallel_queue_terminates_and_counts_drops() {
        // 5 destinations with a single-slot queue: the frontier must
        // saturate, and the run must still terminate with the drop
        // counter visible in the statistics.
        let trip = Trip::builder(DistanceTable::uniform(names(6), 1), open_schedule(6, 64))
            .home(CityIndex::new(0))
            .destinations((1..6).map(CityIndex::new))
            .build()
            .unwrap();
        let outcome = solve(
            &trip,
            TraversalStrategy::Parallel(ParallelConfig {
                queue_capacity: 1,
                workers: 3,
            }),
        );
        assert!(outcome.statistics().nodes_dropped > 0);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::FrontierSaturated
        );
        assert!(!outcome.result().is_optimal());
    }

    #[test]
    fn test_parallel_ample_queue_is_optimal() {
        let trip = Trip::builder(DistanceTable::uniform(names(6), 1), open_schedule(6, 64))
            .home(CityIndex::new(0))
            .destinations((1..6).map(CityIndex::new))
            .build()
            .unwrap();
        let reference = solve(&trip, TraversalStrategy::Depth).best_total();
        let outcome = solve(
            &trip,
            TraversalStrategy::Parallel(ParallelConfig {
                queue_capacity: 1 << 16,
                workers: 4,
            }),
        );
        assert_eq!(outcome.statistics().nodes_dropped, 0);
        assert!(outcome.result().is_optimal());
        assert_eq!(outcome.best_total(), reference);
    }
}
