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

//! # Solver Numeric Trait Alias
//!
//! The single bound every day-count type used by the search engines must
//! satisfy. Collecting the requirements in one alias keeps engine
//! signatures readable and guarantees all engines agree on the numeric
//! contract.
//!
//! `Into<i64>` exists so a bound can be mirrored into an `AtomicI64`
//! without widening tricks; any signed primitive up to 64 bits qualifies.

use num_traits::{FromPrimitive, PrimInt, Signed};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait alias for numeric types usable as day counts in the search
/// engines.
///
/// Implemented automatically for every type meeting the bounds; `i32` and
/// `i64` are the intended instantiations.
pub trait SolverNumeric:
    PrimInt + Signed + FromPrimitive + Into<i64> + Hash + Debug + Display + Send + Sync + 'static
{
}

impl<T> SolverNumeric for T where
    T: PrimInt + Signed + FromPrimitive + Into<i64> + Hash + Debug + Display + Send + Sync + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solver_numeric<T: SolverNumeric>() {}

    #[test]
    fn test_expected_primitives_qualify() {
        assert_solver_numeric::<i16>();
        assert_solver_numeric::<i32>();
        assert_solver_numeric::<i64>();
    }
}
