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

//! # Distance Table
//!
//! A dense, row-major matrix of travel lead times (in whole days) between
//! every pair of cities, together with the ordered list of city names that
//! defines the index space.
//!
//! The table is immutable once constructed. All entries are non-negative;
//! the diagonal is never read by the solver (a tour never travels from a
//! city to itself) but is stored for layout uniformity.

use crate::city::CityIndex;
use num_traits::{PrimInt, Signed};
use std::fmt::Display;

/// An error produced while constructing a [`DistanceTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistanceTableError {
    /// The number of rows or the length of a row does not match the
    /// declared number of cities.
    InvalidDimensions {
        expected: usize,
        rows: usize,
        row_len: usize,
    },
    /// A travel time entry was negative.
    NegativeDistance { from: usize, to: usize },
}

impl Display for DistanceTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceTableError::InvalidDimensions {
                expected,
                rows,
                row_len,
            } => write!(
                f,
                "invalid distance matrix dimensions: expected {}x{}, got {} rows with row length {}",
                expected, expected, rows, row_len
            ),
            DistanceTableError::NegativeDistance { from, to } => {
                write!(f, "negative travel time for leg {} -> {}", from, to)
            }
        }
    }
}

impl std::error::Error for DistanceTableError {}

/// A dense matrix of pairwise travel lead times in whole days.
///
/// Storage is row-major: the travel time from city `a` to city `b` lives at
/// `matrix[a * num_cities + b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable<T> {
    /// City names in index order. `names[c]` is the name of city `c`.
    names: Vec<String>,

    /// Row-major travel times, `names.len() * names.len()` entries.
    matrix: Vec<T>,
}

impl<T> DistanceTable<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a table from per-city rows.
    ///
    /// `rows[a][b]` is the travel time from city `a` to city `b`. The row
    /// count and every row length must equal `names.len()`, and every entry
    /// must be non-negative.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<T>>) -> Result<Self, DistanceTableError> {
        let n = names.len();
        if rows.len() != n {
            return Err(DistanceTableError::InvalidDimensions {
                expected: n,
                rows: rows.len(),
                row_len: rows.first().map_or(0, Vec::len),
            });
        }
        let mut matrix = Vec::with_capacity(n * n);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(DistanceTableError::InvalidDimensions {
                    expected: n,
                    rows: n,
                    row_len: row.len(),
                });
            }
            for (to, days) in row.into_iter().enumerate() {
                if days < T::zero() {
                    return Err(DistanceTableError::NegativeDistance { from, to });
                }
                matrix.push(days);
            }
        }
        Ok(Self { names, matrix })
    }

    /// Constructs a table where every off-diagonal leg takes `days`.
    ///
    /// Mostly useful for tests and benchmarks.
    pub fn uniform(names: Vec<String>, days: T) -> Self {
        let n = names.len();
        let mut matrix = vec![days; n * n];
        for c in 0..n {
            matrix[c * n + c] = T::zero();
        }
        Self { names, matrix }
    }

    /// Returns the number of cities in the table.
    #[inline]
    #[must_use]
    pub fn num_cities(&self) -> usize {
        self.names.len()
    }

    /// Returns the travel time in days from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of bounds.
    #[inline]
    #[must_use]
    pub fn days(&self, from: CityIndex, to: CityIndex) -> T {
        let n = self.num_cities();
        debug_assert!(
            from.get() < n && to.get() < n,
            "called `DistanceTable::days` with out-of-bounds indices: from = {}, to = {}, num_cities = {}",
            from.get(),
            to.get(),
            n
        );
        self.matrix[from.get() * n + to.get()]
    }

    /// Returns the name of the given city.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn city_name(&self, city: CityIndex) -> &str {
        &self.names[city.get()]
    }

    /// Returns the ordered list of city names.
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolves a city name to its index, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<CityIndex> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(CityIndex::new)
    }
}

impl<T> Display for DistanceTable<T>
where
    T: PrimInt + Signed + Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DistanceTable ({} cities)", self.num_cities())?;
        for (a, name) in self.names.iter().enumerate() {
            write!(f, "{:>12}:", name)?;
            for b in 0..self.num_cities() {
                write!(f, " {:>4}", self.days(CityIndex::new(a), CityIndex::new(b)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
