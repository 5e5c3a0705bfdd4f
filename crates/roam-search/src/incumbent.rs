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

//! # Shared Incumbent (Best Itinerary Register)
//!
//! A concurrent container for the best itinerary discovered so far during
//! search. It exposes a fast, lock-free upper bound via an atomic and
//! stores the actual [`Itinerary`] behind a `Mutex` as the source of truth.
//!
//! ## Motivation
//!
//! - Fast heuristic checks: a cheap atomic upper bound short-circuits
//!   attempts to install obviously worse candidates without locking.
//! - Correctness by locking: the authoritative itinerary is protected by a
//!   `Mutex`, and strict improvement is re-checked under the lock, so a
//!   commit can never overwrite an equal or better itinerary even under
//!   contention.
//! - Seedable: the bound can start below `i64::MAX` when a trivial upper
//!   bound for the instance is known; installs must then beat the seed.
//!
//! ## Reporting order
//!
//! [`try_install_with`](SharedIncumbent::try_install_with) runs a caller
//! callback while still holding the lock after a successful commit. Since
//! commits are strictly improving and serialized by the mutex, callbacks
//! observe a strictly decreasing sequence of totals in commit order. This
//! is what makes multi-threaded improvement reporting well-ordered.

use crate::num::SolverNumeric;
use roam_model::route::Itinerary;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

/// A concurrent register for the best (incumbent) itinerary found so far.
///
/// The atomic upper bound is read and written with `Ordering::Relaxed`:
/// it is only a heuristic to avoid locking, and every correctness-relevant
/// decision is re-made under the mutex. Writers always update the atomic
/// while holding the lock, so reads under the lock are consistent.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Fast-path upper bound. `i64::MAX` means "no bound yet".
    upper_bound: AtomicI64,

    /// The incumbent itinerary. Source of truth.
    best: Mutex<Option<Itinerary<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new register with no itinerary and no bound.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicI64::new(i64::MAX),
            best: Mutex::new(None),
        }
    }

    /// Returns the current upper bound.
    #[inline]
    #[must_use]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }
}

impl<T> SharedIncumbent<T>
where
    T: SolverNumeric,
{
    /// Creates a register seeded with a known trivial upper bound.
    ///
    /// No itinerary is installed; candidates must still strictly beat the
    /// seed to be committed.
    #[inline]
    #[must_use]
    pub fn with_upper_bound(bound: T) -> Self {
        Self {
            upper_bound: AtomicI64::new(bound.into()),
            best: Mutex::new(None),
        }
    }

    /// Returns the smaller of `current` and the register's bound, converted
    /// into `T`. A bound that does not fit `T` leaves `current` unchanged.
    #[inline]
    #[must_use]
    pub fn tighten(&self, current: T) -> T {
        match T::from_i64(self.upper_bound()) {
            Some(bound) if bound < current => bound,
            _ => current,
        }
    }

    /// Returns a cloned snapshot of the incumbent itinerary, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Itinerary<T>> {
        self.best.lock().unwrap().clone()
    }

    /// Attempts to install `candidate` as the new incumbent.
    ///
    /// Returns `true` iff the candidate is strictly better than both the
    /// current bound and the stored itinerary.
    pub fn try_install(&self, candidate: &Itinerary<T>) -> bool {
        self.try_install_with(candidate, |_| {})
    }

    /// Like [`try_install`](Self::try_install), but runs `on_commit` under
    /// the lock after a successful commit.
    ///
    /// Keep the callback short; every other installer is blocked while it
    /// runs.
    pub fn try_install_with<F>(&self, candidate: &Itinerary<T>, on_commit: F) -> bool
    where
        F: FnOnce(&Itinerary<T>),
    {
        let candidate_bound: i64 = candidate.total_days().into();

        // Fast path: obviously not an improvement, skip the lock.
        if candidate_bound >= self.upper_bound.load(Ordering::Relaxed) {
            return false;
        }

        let mut guard = self.best.lock().unwrap();

        // Re-check under the lock; another thread may have committed since
        // the atomic read.
        if candidate_bound >= self.upper_bound.load(Ordering::Relaxed) {
            return false;
        }
        if let Some(best) = guard.as_ref() {
            if candidate.total_days() >= best.total_days() {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound.store(candidate_bound, Ordering::Relaxed);
        on_commit(guard.as_ref().unwrap());
        true
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_model::city::CityIndex;
    use roam_model::route::RouteStep;

    fn itinerary(total: i64) -> Itinerary<i64> {
        Itinerary::new(total, 0, vec![RouteStep::new(CityIndex::new(1), total, 0)], 0)
    }

    #[test]
    fn test_install_improves_bound() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::new();
        assert_eq!(incumbent.upper_bound(), i64::MAX);
        assert!(incumbent.try_install(&itinerary(100)));
        assert_eq!(incumbent.upper_bound(), 100);
        assert_eq!(incumbent.snapshot().unwrap().total_days(), 100);
    }

    #[test]
    fn test_equal_or_worse_rejected() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::new();
        assert!(incumbent.try_install(&itinerary(50)));
        assert!(!incumbent.try_install(&itinerary(50)));
        assert!(!incumbent.try_install(&itinerary(90)));
        assert_eq!(incumbent.upper_bound(), 50);
    }

    #[test]
    fn test_seeded_bound_must_be_beaten() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::with_upper_bound(30);
        assert!(!incumbent.try_install(&itinerary(30)));
        assert!(incumbent.snapshot().is_none());
        assert!(incumbent.try_install(&itinerary(29)));
        assert_eq!(incumbent.upper_bound(), 29);
    }

    #[test]
    fn test_tighten() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::with_upper_bound(40);
        assert_eq!(incumbent.tighten(100), 40);
        assert_eq!(incumbent.tighten(10), 10);
    }

    #[test]
    fn test_callback_runs_only_on_commit() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::new();
        let mut seen = Vec::new();
        incumbent.try_install_with(&itinerary(10), |it| seen.push(it.total_days()));
        incumbent.try_install_with(&itinerary(20), |it| seen.push(it.total_days()));
        incumbent.try_install_with(&itinerary(5), |it| seen.push(it.total_days()));
        assert_eq!(seen, vec![10, 5]);
    }

    #[test]
    fn test_concurrent_installs_minimum_wins() {
        use std::sync::Arc;

        let incumbent: Arc<SharedIncumbent<i64>> = Arc::new(SharedIncumbent::new());
        let mut handles = Vec::new();
        for total in [90, 70, 85, 60, 75, 65, 80, 95] {
            let incumbent = Arc::clone(&incumbent);
            handles.push(std::thread::spawn(move || {
                incumbent.try_install(&itinerary(total));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(incumbent.upper_bound(), 60);
        assert_eq!(incumbent.snapshot().unwrap().total_days(), 60);
    }

    #[test]
    fn test_concurrent_callbacks_strictly_decreasing() {
        use std::sync::{Arc, Mutex};

        let incumbent: Arc<SharedIncumbent<i64>> = Arc::new(SharedIncumbent::new());
        let reported: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles = Vec::new();
        for total in [50, 40, 45, 30, 35, 20] {
            let incumbent = Arc::clone(&incumbent);
            let reported = Arc::clone(&reported);
            handles.push(std::thread::spawn(move || {
                incumbent.try_install_with(&itinerary(total), |it| {
                    reported.lock().unwrap().push(it.total_days());
                });
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let reported = reported.lock().unwrap();
        assert!(reported.windows(2).all(|pair| pair[1] < pair[0]));
        assert_eq!(*reported.last().unwrap(), 20);
    }
}
