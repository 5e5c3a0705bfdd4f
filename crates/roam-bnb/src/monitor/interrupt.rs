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

//! A monitor that terminates the search when an external flag is raised.
//!
//! The flag is a shared `AtomicBool`, typically wired to a signal handler
//! or a timeout thread. Read with `Ordering::Relaxed`; termination
//! latency of a few nodes is acceptable.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use roam_search::num::SolverNumeric;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Terminates the search once the shared flag is set.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<T> {
    flag: Arc<AtomicBool>,
    _marker: PhantomData<T>,
}

impl<T> InterruptMonitor<T> {
    /// Creates a monitor watching `flag`.
    #[must_use]
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self {
            flag,
            _marker: PhantomData,
        }
    }
}

impl<T> SearchMonitor<T> for InterruptMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn search_command(&mut self) -> SearchCommand {
        if self.flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate("interrupted".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut monitor: InterruptMonitor<i64> = InterruptMonitor::new(Arc::clone(&flag));
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            monitor.search_command(),
            SearchCommand::Terminate("interrupted".to_string())
        );
    }
}
