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

//! # Bounded Concurrent Frontier
//!
//! A blocking min-priority queue of [`FrontierNode`]s shared by the
//! parallel strategy's workers.
//!
//! ## Backpressure
//!
//! Capacity is a hard bound on held nodes. A push against a full queue
//! **drops** the node and increments a counter instead of blocking; with
//! every worker both producing and consuming, a blocking push can deadlock
//! the pool. The drop count is observable so the driver can downgrade an
//! exhausted search from "optimal" to "feasible".
//!
//! ## Termination
//!
//! Workers pop in a loop and call [`task_done`](BoundedFrontier::task_done)
//! after expanding each node. A pop blocks while the queue is empty but
//! some worker is still busy, because that worker may still push new
//! nodes. Once the queue is empty and no worker is busy, the frontier is
//! quiescent: every blocked pop returns `None` and the pool winds down.
//! This is a barrier over queue and busy count, not a timeout.

use crate::node::FrontierNode;
use roam_search::num::SolverNumeric;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Condvar, Mutex};

#[derive(Debug)]
struct FrontierState<T> {
    heap: BinaryHeap<Reverse<FrontierNode<T>>>,
    /// Workers currently expanding a popped node.
    busy: usize,
    /// Nodes discarded because the queue was full.
    dropped: u64,
    stopped: bool,
}

/// A bounded, blocking min-priority frontier.
#[derive(Debug)]
pub struct BoundedFrontier<T> {
    state: Mutex<FrontierState<T>>,
    available: Condvar,
    capacity: usize,
}

impl<T> BoundedFrontier<T>
where
    T: SolverNumeric,
{
    /// Creates a frontier holding at most `capacity` nodes.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(
            capacity > 0,
            "called `BoundedFrontier::new` with zero capacity"
        );
        Self {
            state: Mutex::new(FrontierState {
                heap: BinaryHeap::with_capacity(capacity.min(1024)),
                busy: 0,
                dropped: 0,
                stopped: false,
            }),
            available: Condvar::new(),
            capacity,
        }
    }

    /// Offers a node to the frontier.
    ///
    /// Returns `false` if the node was discarded because the queue was
    /// full (counted) or the frontier was stopped (not counted).
    pub fn push(&self, node: FrontierNode<T>) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.stopped {
            return false;
        }
        if state.heap.len() >= self.capacity {
            state.dropped += 1;
            return false;
        }
        state.heap.push(Reverse(node));
        drop(state);
        self.available.notify_one();
        true
    }

    /// Takes the best node, blocking while more work may still appear.
    ///
    /// Returns `None` once the frontier is quiescent or stopped. A
    /// successful pop marks the caller busy; it must call
    /// [`task_done`](Self::task_done) when it finishes expanding the node.
    pub fn pop(&self) -> Option<FrontierNode<T>> {
        let mut state = self.state.lock().unwrap();
        loop {
            if state.stopped {
                return None;
            }
            if let Some(Reverse(node)) = state.heap.pop() {
                state.busy += 1;
                return Some(node);
            }
            if state.busy == 0 {
                return None;
            }
            state = self.available.wait(state).unwrap();
        }
    }

    /// Marks one popped node as fully expanded.
    pub fn task_done(&self) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(
            state.busy > 0,
            "called `BoundedFrontier::task_done` without a matching pop"
        );
        state.busy -= 1;
        if state.busy == 0 && state.heap.is_empty() {
            drop(state);
            // Quiescent: wake every blocked popper so the pool can exit.
            self.available.notify_all();
        }
    }

    /// Stops the frontier: all pending and future pops return `None`.
    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.stopped = true;
        drop(state);
        self.available.notify_all();
    }

    /// Number of nodes discarded due to a full queue.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.state.lock().unwrap().dropped
    }

    /// Number of nodes currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().heap.len()
    }

    /// Returns `true` if no nodes are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_model::city::CityIndex;

    fn node(time: i64, remaining: &[usize]) -> FrontierNode<i64> {
        let destinations: Vec<CityIndex> = remaining.iter().copied().map(CityIndex::new).collect();
        FrontierNode::root(CityIndex::new(0), &destinations, 8, time)
    }

    #[test]
    fn test_pop_returns_min_time_first() {
        let frontier: BoundedFrontier<i64> = BoundedFrontier::new(16);
        frontier.push(node(5, &[1]));
        frontier.push(node(1, &[1]));
        frontier.push(node(3, &[1]));
        let mut order = Vec::new();
        for _ in 0..3 {
            let popped = frontier.pop().unwrap();
            order.push(popped.time_so_far());
            frontier.task_done();
        }
        assert_eq!(order, vec![1, 3, 5]);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_ties_break_on_fewer_remaining() {
        let frontier: BoundedFrontier<i64> = BoundedFrontier::new(16);
        frontier.push(node(2, &[1, 2, 3]));
        frontier.push(node(2, &[1]));
        let first = frontier.pop().unwrap();
        assert_eq!(first.remaining_count(), 1);
        frontier.task_done();
    }

    #[test]
    fn test_full_queue_drops_and_counts() {
        let frontier: BoundedFrontier<i64> = BoundedFrontier::new(1);
        assert!(frontier.push(node(1, &[1])));
        assert!(!frontier.push(node(2, &[1])));
        assert!(!frontier.push(node(3, &[1])));
        assert_eq!(frontier.dropped(), 2);
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_empty_idle_frontier_pops_none_without_blocking() {
        let frontier: BoundedFrontier<i64> = BoundedFrontier::new(4);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_stop_unblocks_poppers() {
        use std::sync::Arc;

        let frontier: Arc<BoundedFrontier<i64>> = Arc::new(BoundedFrontier::new(4));
        // Hold a busy slot so a popper would block instead of seeing
        // quiescence.
        frontier.push(node(1, &[1]));
        let held = frontier.pop().unwrap();
        let popper = {
            let frontier = Arc::clone(&frontier);
            std::thread::spawn(move || frontier.pop())
        };
        std::thread::sleep(std::time::Duration::from_millis(20));
        frontier.stop();
        assert!(popper.join().unwrap().is_none());
        drop(held);
    }

    #[test]
    fn test_workers_drain_to_quiescence() {
        use std::sync::Arc;

        let frontier: Arc<BoundedFrontier<i64>> = Arc::new(BoundedFrontier::new(64));
        for i in 0..8 {
            frontier.push(node(i, &[1]));
        }
        let mut handles = Vec::new();
        for _ in 0..3 {
            let frontier = Arc::clone(&frontier);
            handles.push(std::thread::spawn(move || {
                let mut popped = 0u32;
                while frontier.pop().is_some() {
                    popped += 1;
                    frontier.task_done();
                }
                popped
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 8);
        assert!(frontier.is_empty());
    }
}
