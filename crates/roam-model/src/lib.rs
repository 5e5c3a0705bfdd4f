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

//! # Roam Model
//!
//! **The core domain model for the Roam trip planning solver.**
//!
//! This crate defines the data structures that describe a closed-tour trip
//! planning instance and its solutions. It is the data interchange layer
//! between problem definition (loaded from text sources) and the solving
//! engine (`roam_bnb`).
//!
//! ## Architecture
//!
//! * **`city`**: A strongly-typed city index so positional integers cannot
//!   be confused with day counts.
//! * **`distance`**: The dense pairwise travel time matrix plus the city
//!   name space.
//! * **`schedule`**: Per-city per-day availability, with a sentinel-encoded
//!   wait type for performance-critical loops.
//! * **`route`**: Route legs and complete itineraries (the solution type).
//! * **`trip`**: The immutable instance and its validating builder.
//! * **`loading`**: Tab-delimited text loaders, including the raw-distance
//!   quantization rule.

pub mod city;
pub mod distance;
pub mod loading;
pub mod route;
pub mod schedule;
pub mod trip;
