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

//! # Parallel Frontier Search
//!
//! The parallel strategy: a fixed pool of scoped worker threads draining
//! one [`BoundedFrontier`]. Workers pop the globally best node, expand it
//! against the shared incumbent, push children back, and exit together
//! when the frontier goes quiescent.
//!
//! The caller's monitor sits behind a `Mutex`; improvement callbacks run
//! inside the incumbent's commit, so even with several workers racing,
//! reported totals are strictly decreasing and in commit order. The
//! statistics passed to those callbacks are the discovering worker's own
//! counters; merged run totals are only available at exit. A fatal
//! expansion error or a terminate command stops the frontier; in-flight
//! nodes are discarded and the first error wins.

use crate::expand::{generate_candidates, SearchError};
use crate::frontier::BoundedFrontier;
use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::node::FrontierNode;
use crate::result::TourSolverOutcome;
use crate::stats::TourSolverStatistics;
use crate::strategy::ParallelConfig;
use roam_model::route::Itinerary;
use roam_model::trip::Trip;
use roam_search::incumbent::SharedIncumbent;
use roam_search::num::SolverNumeric;
use std::sync::Mutex;
use std::time::Instant;

/// Shared mutable pieces the workers coordinate through.
struct PoolContext<'a, T, M> {
    trip: &'a Trip<T>,
    frontier: &'a BoundedFrontier<T>,
    incumbent: &'a SharedIncumbent<T>,
    monitor: Mutex<&'a mut M>,
    first_error: Mutex<Option<SearchError>>,
    abort_reason: Mutex<Option<String>>,
    trivial_bound: T,
    cardinality_bound: bool,
}

pub(crate) fn run_parallel<T, M>(
    trip: &Trip<T>,
    config: ParallelConfig,
    incumbent: &SharedIncumbent<T>,
    mut monitor: M,
    cardinality_bound: bool,
) -> Result<TourSolverOutcome<T>, SearchError>
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    let started = Instant::now();
    monitor.on_enter_search(trip);

    let frontier = BoundedFrontier::new(config.queue_capacity.max(1));
    frontier.push(FrontierNode::root(
        trip.home(),
        trip.destinations(),
        trip.distances().num_cities(),
        trip.start_day(),
    ));

    let context = PoolContext {
        trip,
        frontier: &frontier,
        incumbent,
        monitor: Mutex::new(&mut monitor),
        first_error: Mutex::new(None),
        abort_reason: Mutex::new(None),
        trivial_bound: crate::engine::trivial_upper_bound(trip),
        cardinality_bound,
    };

    let workers = config.workers.max(1);
    let mut stats = TourSolverStatistics::new();
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            handles.push(scope.spawn(|| worker_loop(&context)));
        }
        for handle in handles {
            stats.merge(&handle.join().unwrap());
        }
    });

    stats.nodes_dropped = frontier.dropped();
    stats.time_total = started.elapsed();

    // Releases the monitor borrow held by the pool context.
    let PoolContext {
        monitor: monitor_cell,
        first_error,
        abort_reason,
        ..
    } = context;
    drop(monitor_cell);

    if let Some(error) = first_error.into_inner().unwrap() {
        return Err(error);
    }
    let abort_reason = abort_reason.into_inner().unwrap();

    monitor.on_exit_search(&stats);

    let best = incumbent.snapshot();
    let outcome = match abort_reason {
        Some(reason) => TourSolverOutcome::aborted(reason, best, stats),
        None if stats.nodes_dropped > 0 => TourSolverOutcome::saturated(best, stats),
        None => match best {
            Some(itinerary) => TourSolverOutcome::optimal(itinerary, stats),
            None => TourSolverOutcome::infeasible(stats),
        },
    };
    Ok(outcome)
}

fn worker_loop<T, M>(context: &PoolContext<'_, T, M>) -> TourSolverStatistics
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    let mut stats = TourSolverStatistics::new();
    while let Some(node) = context.frontier.pop() {
        let keep_going = expand_node(context, &node, &mut stats);
        context.frontier.task_done();
        match keep_going {
            Ok(true) => {}
            Ok(false) => context.frontier.stop(),
            Err(error) => {
                let mut slot = context.first_error.lock().unwrap();
                if slot.is_none() {
                    *slot = Some(error);
                }
                drop(slot);
                context.frontier.stop();
            }
        }
    }
    stats
}

fn expand_node<T, M>(
    context: &PoolContext<'_, T, M>,
    node: &FrontierNode<T>,
    stats: &mut TourSolverStatistics,
) -> Result<bool, SearchError>
where
    T: SolverNumeric,
    M: SearchMonitor<T>,
{
    stats.on_node_explored();
    stats.on_depth_reached(node.depth());

    {
        let mut monitor = context.monitor.lock().unwrap();
        if let SearchCommand::Terminate(reason) = monitor.search_command() {
            let mut slot = context.abort_reason.lock().unwrap();
            if slot.is_none() {
                *slot = Some(reason);
            }
            return Ok(false);
        }
    }

    let best = context.incumbent.tighten(context.trivial_bound);

    // Nodes queued before the incumbent improved may be stale.
    stats.on_comparison();
    if node.time_so_far() >= best {
        stats.on_pruning_bound();
        return Ok(true);
    }
    if context.cardinality_bound {
        stats.on_comparison();
        let floor = node
            .time_so_far()
            .saturating_add(T::from_usize(node.remaining_count()).unwrap_or_else(T::max_value));
        if floor >= best {
            stats.on_pruning_bound();
            return Ok(true);
        }
    }

    let candidates = generate_candidates(
        context.trip,
        node.city(),
        node.remaining(),
        node.time_so_far(),
        best,
        stats,
    )?;

    for candidate in candidates {
        let home_leg = context
            .trip
            .distances()
            .days(candidate.step.city(), context.trip.home());
        let total_with_return = candidate.arrival_total + home_leg;

        stats.on_comparison();
        if total_with_return >= context.incumbent.tighten(context.trivial_bound) {
            stats.on_pruning_bound();
            continue;
        }

        if node.remaining_count() == 1 {
            let mut steps = node.route().to_vec();
            steps.push(candidate.step);
            let itinerary = Itinerary::new(
                total_with_return,
                context.trip.start_day(),
                steps,
                home_leg,
            );
            let installed = context.incumbent.try_install_with(&itinerary, |committed| {
                let mut monitor = context.monitor.lock().unwrap();
                monitor.on_solution(committed, &*stats);
            });
            if installed {
                stats.on_solution_found();
            }
        } else {
            // Push failure is backpressure; the frontier counts the drop.
            context.frontier.push(node.child(&candidate));
        }
    }

    Ok(true)
}
