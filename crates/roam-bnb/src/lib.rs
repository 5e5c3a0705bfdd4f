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

//! # Roam BnB
//!
//! The exact branch-and-bound tour search engine.
//!
//! One [`engine::TourSolver`] explores the space of visit orders for a
//! [`roam_model::trip::Trip`] under pruning bounds, in one of four
//! traversal strategies ([`strategy::TraversalStrategy`]). Improving
//! itineraries flow through a shared best-solution register and are
//! reported to [`monitor::search_monitor::SearchMonitor`]s in strictly
//! decreasing order.

pub mod engine;
pub mod expand;
pub mod frontier;
pub mod monitor;
pub mod node;
mod parallel;
pub mod result;
pub mod stats;
pub mod strategy;
