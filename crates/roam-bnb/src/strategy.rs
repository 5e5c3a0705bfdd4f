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

//! # Traversal Strategies
//!
//! How the search tree is walked. All strategies explore the same tree
//! under the same bounds and therefore agree on the optimal total; they
//! differ in exploration order, memory footprint, and (for
//! [`TraversalStrategy::Parallel`]) completeness under backpressure.

use std::fmt::Display;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Default bounded frontier capacity for the parallel strategy.
pub const DEFAULT_QUEUE_CAPACITY: usize = 4096;

/// Tuning knobs for the parallel strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Maximum number of nodes the shared frontier holds. Pushes beyond
    /// this are dropped and counted.
    pub queue_capacity: usize,

    /// Number of worker threads.
    pub workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            workers: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

/// The traversal strategy for one solve, selected once up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalStrategy {
    /// Recursive depth-first search, candidates in natural city order.
    #[default]
    Depth,

    /// Recursive depth-first search, candidates sorted ascending by
    /// combined leg cost before descending.
    SortedDepth,

    /// Single-threaded best-first search over a priority frontier ordered
    /// by elapsed time, then by fewest remaining destinations.
    Breadth,

    /// The breadth ordering over a bounded concurrent frontier drained by
    /// a fixed worker pool. When the frontier is full, pushed nodes are
    /// dropped (and counted), trading completeness for bounded memory.
    Parallel(ParallelConfig),
}

impl TraversalStrategy {
    /// A parallel strategy with default knobs.
    #[inline]
    #[must_use]
    pub fn parallel() -> Self {
        TraversalStrategy::Parallel(ParallelConfig::default())
    }

    /// The strategy's selection name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TraversalStrategy::Depth => "depth",
            TraversalStrategy::SortedDepth => "sorted",
            TraversalStrategy::Breadth => "breadth",
            TraversalStrategy::Parallel(_) => "parallel",
        }
    }
}

impl Display for TraversalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalStrategy::Parallel(config) => write!(
                f,
                "parallel (capacity {}, workers {})",
                config.queue_capacity, config.workers
            ),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// An unrecognized strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategyError(pub String);

impl Display for UnknownStrategyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown traversal strategy {:?} (expected depth, sorted, breadth or parallel)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategyError {}

impl FromStr for TraversalStrategy {
    type Err = UnknownStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth" => Ok(TraversalStrategy::Depth),
            "sorted" => Ok(TraversalStrategy::SortedDepth),
            "breadth" => Ok(TraversalStrategy::Breadth),
            "parallel" => Ok(TraversalStrategy::parallel()),
            other => Err(UnknownStrategyError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trip() {
        for name in ["depth", "sorted", "breadth", "parallel"] {
            let strategy: TraversalStrategy = name.parse().unwrap();
            assert_eq!(strategy.name(), name);
        }
        assert!("dijkstra".parse::<TraversalStrategy>().is_err());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(
            "Depth".parse::<TraversalStrategy>().unwrap(),
            TraversalStrategy::Depth
        );
    }

    #[test]
    fn test_parallel_defaults() {
        let config = ParallelConfig::default();
        assert_eq!(config.queue_capacity, DEFAULT_QUEUE_CAPACITY);
        assert!(config.workers >= 1);
    }
}
