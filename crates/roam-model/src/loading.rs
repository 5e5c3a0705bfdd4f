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

//! # Instance Loading
//!
//! Parsers for the three tab-delimited text sources an instance is built
//! from:
//!
//! * **Distances**: a header `N<TAB>name_1 .. name_N`, then one row per
//!   city in the same order. Raw values are continuous measurements that
//!   the loader quantizes into whole travel days; the solver never sees
//!   raw values.
//! * **Schedule**: a header whose second field labels day 0, then one row
//!   per city of per-day wait entries, with `x` marking a closed day.
//! * **Destinations**: one city name per line.
//!
//! All structural problems (row identity mismatches, unknown city names,
//! malformed numbers, truncated files) are configuration errors and fail
//! the load. Blank lines and lines starting with `#` are skipped.

use crate::city::CityIndex;
use crate::distance::{DistanceTable, DistanceTableError};
use crate::schedule::{WaitSchedule, WaitTime};
use num_traits::{FromPrimitive, PrimInt, Signed};
use std::fmt::Display;
use std::io::BufRead;

/// Raw distances at or below this threshold quantize to zero travel days.
const QUANTIZE_OFFSET: f64 = 4.0;

/// Width of one travel day in raw distance units.
const QUANTIZE_DAY_WIDTH: f64 = 8.0;

/// An error produced while parsing a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    /// The offending field text.
    pub field: String,
    /// One-based source line.
    pub line: usize,
    /// What the field was supposed to be.
    pub expected: &'static str,
}

impl Display for ParseFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: cannot parse {:?} as {}",
            self.line, self.field, self.expected
        )
    }
}

impl std::error::Error for ParseFieldError {}

/// An error produced while loading instance data.
#[derive(Debug)]
pub enum InstanceLoaderError {
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// The file ended before the declared data was complete.
    UnexpectedEof,
    /// A field failed to parse.
    Parse(ParseFieldError),
    /// A header line did not have the expected shape.
    MalformedHeader { line: usize },
    /// A data row names a different city than the header order demands.
    RowIdentityMismatch {
        line: usize,
        expected: String,
        found: String,
    },
    /// A row has the wrong number of fields.
    WrongFieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A city name does not appear in the distance table.
    UnknownCity { line: usize, name: String },
    /// The same city appears in two schedule rows.
    DuplicateCity { line: usize, name: String },
    /// A city in the distance table has no schedule row.
    MissingCity { name: String },
    /// The assembled matrix failed validation.
    Distance(DistanceTableError),
}

impl Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceLoaderError::Io(err) => write!(f, "i/o error: {}", err),
            InstanceLoaderError::UnexpectedEof => write!(f, "unexpected end of file"),
            InstanceLoaderError::Parse(err) => write!(f, "{}", err),
            InstanceLoaderError::MalformedHeader { line } => {
                write!(f, "line {}: malformed header", line)
            }
            InstanceLoaderError::RowIdentityMismatch {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: row order mismatch: expected city {:?}, found {:?}",
                line, expected, found
            ),
            InstanceLoaderError::WrongFieldCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} fields, found {}",
                line, expected, found
            ),
            InstanceLoaderError::UnknownCity { line, name } => {
                write!(f, "line {}: unknown city {:?}", line, name)
            }
            InstanceLoaderError::DuplicateCity { line, name } => {
                write!(f, "line {}: duplicate schedule row for city {:?}", line, name)
            }
            InstanceLoaderError::MissingCity { name } => {
                write!(f, "no schedule row for city {:?}", name)
            }
            InstanceLoaderError::Distance(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for InstanceLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstanceLoaderError::Io(err) => Some(err),
            InstanceLoaderError::Parse(err) => Some(err),
            InstanceLoaderError::Distance(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(err: std::io::Error) -> Self {
        InstanceLoaderError::Io(err)
    }
}

impl From<ParseFieldError> for InstanceLoaderError {
    fn from(err: ParseFieldError) -> Self {
        InstanceLoaderError::Parse(err)
    }
}

impl From<DistanceTableError> for InstanceLoaderError {
    fn from(err: DistanceTableError) -> Self {
        InstanceLoaderError::Distance(err)
    }
}

/// Quantizes a raw distance measurement into whole travel days.
///
/// The rule is `ceil((raw - 4) / 8)`, floored at zero: short hops cost no
/// travel day, and each additional 8 raw units costs one more.
#[inline]
#[must_use]
pub fn quantize_distance(raw: f64) -> i64 {
    let days = ((raw - QUANTIZE_OFFSET) / QUANTIZE_DAY_WIDTH).ceil();
    if days > 0.0 {
        days as i64
    } else {
        0
    }
}

/// A minimal line reader that skips blank lines and `#` comments and
/// tracks one-based line numbers for error reporting.
struct LineScanner<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> LineScanner<R> {
    fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Returns the next data line (line number, content), or `None` at EOF.
    fn next_line(&mut self) -> Result<Option<(usize, String)>, InstanceLoaderError> {
        loop {
            let mut buffer = String::new();
            let read = self.reader.read_line(&mut buffer)?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = buffer.trim_end_matches(['\n', '\r']);
            if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
                continue;
            }
            return Ok(Some((self.line, trimmed.to_string())));
        }
    }

    /// Like [`next_line`](Self::next_line), but EOF is an error.
    fn expect_line(&mut self) -> Result<(usize, String), InstanceLoaderError> {
        self.next_line()?.ok_or(InstanceLoaderError::UnexpectedEof)
    }
}

fn parse_field<F: std::str::FromStr>(
    field: &str,
    line: usize,
    expected: &'static str,
) -> Result<F, ParseFieldError> {
    field.trim().parse().map_err(|_| ParseFieldError {
        field: field.to_string(),
        line,
        expected,
    })
}

/// Loads a [`DistanceTable`] from tab-delimited text.
///
/// The header declares the city count and the city names in index order.
/// Every data row must repeat its city name in that same order; a mismatch
/// means the file is internally inconsistent and the load fails.
pub fn load_distances<T, R>(reader: R) -> Result<DistanceTable<T>, InstanceLoaderError>
where
    T: PrimInt + Signed + FromPrimitive,
    R: BufRead,
{
    let mut scanner = LineScanner::new(reader);

    let (header_line, header) = scanner.expect_line()?;
    let mut fields = header.split('\t');
    let count_field = fields
        .next()
        .ok_or(InstanceLoaderError::MalformedHeader { line: header_line })?;
    let num_cities: usize = parse_field(count_field, header_line, "city count")?;
    let names: Vec<String> = fields.map(|name| name.trim().to_string()).collect();
    if names.len() != num_cities {
        return Err(InstanceLoaderError::WrongFieldCount {
            line: header_line,
            expected: num_cities + 1,
            found: names.len() + 1,
        });
    }

    let mut rows: Vec<Vec<T>> = Vec::with_capacity(num_cities);
    for expected_name in &names {
        let (line, row) = scanner.expect_line()?;
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() != num_cities + 1 {
            return Err(InstanceLoaderError::WrongFieldCount {
                line,
                expected: num_cities + 1,
                found: fields.len(),
            });
        }
        let found_name = fields[0].trim();
        if found_name != expected_name {
            return Err(InstanceLoaderError::RowIdentityMismatch {
                line,
                expected: expected_name.clone(),
                found: found_name.to_string(),
            });
        }
        let mut row_days = Vec::with_capacity(num_cities);
        for field in &fields[1..] {
            let raw: f64 = parse_field(field, line, "distance")?;
            let days = T::from_i64(quantize_distance(raw)).ok_or_else(|| ParseFieldError {
                field: field.to_string(),
                line,
                expected: "distance in range",
            })?;
            row_days.push(days);
        }
        rows.push(row_days);
    }

    Ok(DistanceTable::from_rows(names, rows)?)
}

/// Loads a [`WaitSchedule`] from tab-delimited text, resolving city names
/// against an already-loaded distance table.
///
/// The header's second field labels day 0. Each data row is a city name
/// followed by per-day wait entries; `x` marks a closed day. Every city in
/// the distance table must have exactly one row.
pub fn load_schedule<T, R>(
    reader: R,
    distances: &DistanceTable<T>,
) -> Result<WaitSchedule<T>, InstanceLoaderError>
where
    T: PrimInt + Signed + FromPrimitive,
    R: BufRead,
{
    let mut scanner = LineScanner::new(reader);

    let (header_line, header) = scanner.expect_line()?;
    let first_day_label = header
        .split('\t')
        .nth(1)
        .map(|label| label.trim().to_string())
        .ok_or(InstanceLoaderError::MalformedHeader { line: header_line })?;

    let num_cities = distances.num_cities();
    let mut rows: Vec<Option<Vec<WaitTime<T>>>> = vec![None; num_cities];
    while let Some((line, row)) = scanner.next_line()? {
        let mut fields = row.split('\t');
        let name = fields
            .next()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let city = distances
            .index_of(&name)
            .ok_or_else(|| InstanceLoaderError::UnknownCity {
                line,
                name: name.clone(),
            })?;
        if rows[city.get()].is_some() {
            return Err(InstanceLoaderError::DuplicateCity { line, name });
        }
        let mut waits = Vec::new();
        for field in fields {
            let trimmed = field.trim();
            if trimmed.eq_ignore_ascii_case("x") {
                waits.push(WaitTime::none());
            } else {
                let days: i64 = parse_field(trimmed, line, "wait in days")?;
                let days = T::from_i64(days).ok_or_else(|| ParseFieldError {
                    field: trimmed.to_string(),
                    line,
                    expected: "wait in range",
                })?;
                waits.push(WaitTime::some(days));
            }
        }
        rows[city.get()] = Some(waits);
    }

    let mut filled = Vec::with_capacity(num_cities);
    for (index, row) in rows.into_iter().enumerate() {
        match row {
            Some(waits) => filled.push(waits),
            None => {
                return Err(InstanceLoaderError::MissingCity {
                    name: distances.city_name(CityIndex::new(index)).to_string(),
                })
            }
        }
    }

    Ok(WaitSchedule::new(filled, first_day_label))
}

/// Loads a destination list (one city name per line), resolving names
/// against an already-loaded distance table.
pub fn load_destinations<T, R>(
    reader: R,
    distances: &DistanceTable<T>,
) -> Result<Vec<CityIndex>, InstanceLoaderError>
where
    T: PrimInt + Signed,
    R: BufRead,
{
    let mut scanner = LineScanner::new(reader);
    let mut destinations = Vec::new();
    while let Some((line, name)) = scanner.next_line()? {
        let name = name.trim();
        let city = distances
            .index_of(name)
            .ok_or_else(|| InstanceLoaderError::UnknownCity {
                line,
                name: name.to_string(),
            })?;
        destinations.push(city);
    }
    Ok(destinations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DISTANCES: &str = "3\thome\trome\tbern\n\
                             home\t0\t5\t13\n\
                             rome\t5\t0\t4\n\
                             bern\t13\t4\t0\n";

    #[test]
    fn test_quantize_distance_rule() {
        assert_eq!(quantize_distance(0.0), 0);
        assert_eq!(quantize_distance(4.0), 0);
        assert_eq!(quantize_distance(4.1), 1);
        assert_eq!(quantize_distance(12.0), 1);
        assert_eq!(quantize_distance(12.5), 2);
        assert_eq!(quantize_distance(20.0), 2);
        // Never negative, even for tiny raw values.
        assert_eq!(quantize_distance(-100.0), 0);
    }

    #[test]
    fn test_load_distances_quantizes_and_orders() {
        let table: DistanceTable<i64> = load_distances(Cursor::new(DISTANCES)).unwrap();
        assert_eq!(table.num_cities(), 3);
        let home = table.index_of("home").unwrap();
        let rome = table.index_of("rome").unwrap();
        let bern = table.index_of("bern").unwrap();
        // 5 -> ceil(1/8) = 1, 13 -> ceil(9/8) = 2, 4 -> 0.
        assert_eq!(table.days(home, rome), 1);
        assert_eq!(table.days(home, bern), 2);
        assert_eq!(table.days(rome, bern), 0);
    }

    #[test]
    fn test_load_distances_rejects_row_identity_mismatch() {
        let text = "2\thome\trome\n\
                    rome\t0\t5\n\
                    home\t5\t0\n";
        let result: Result<DistanceTable<i64>, _> = load_distances(Cursor::new(text));
        assert!(matches!(
            result,
            Err(InstanceLoaderError::RowIdentityMismatch { expected, found, .. })
                if expected == "home" && found == "rome"
        ));
    }

    #[test]
    fn test_load_distances_rejects_truncated_file() {
        let text = "2\thome\trome\nhome\t0\t5\n";
        let result: Result<DistanceTable<i64>, _> = load_distances(Cursor::new(text));
        assert!(matches!(result, Err(InstanceLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_load_distances_rejects_bad_number() {
        let text = "1\thome\nhome\tabc\n";
        let result: Result<DistanceTable<i64>, _> = load_distances(Cursor::new(text));
        assert!(matches!(result, Err(InstanceLoaderError::Parse(_))));
    }

    #[test]
    fn test_load_distances_skips_comments_and_blanks() {
        let text = "# travel matrix\n\n2\thome\trome\nhome\t0\t5\n\nrome\t5\t0\n";
        let table: DistanceTable<i64> = load_distances(Cursor::new(text)).unwrap();
        assert_eq!(table.num_cities(), 2);
    }

    #[test]
    fn test_load_schedule_with_sentinel() {
        let table: DistanceTable<i64> = load_distances(Cursor::new(DISTANCES)).unwrap();
        let text = "schedule\t06/01\n\
                    home\t0\t0\t0\n\
                    rome\t2\tx\t0\n\
                    bern\tx\tx\tx\n";
        let schedule = load_schedule(Cursor::new(text), &table).unwrap();
        assert_eq!(schedule.first_day_label(), "06/01");
        let rome = table.index_of("rome").unwrap();
        let bern = table.index_of("bern").unwrap();
        assert_eq!(schedule.wait_on(rome, 0).unwrap().into_option(), Some(2));
        assert!(schedule.wait_on(rome, 1).unwrap().is_none());
        assert!(schedule.wait_on(bern, 2).unwrap().is_none());
        assert_eq!(schedule.wait_on(rome, 3), None);
    }

    #[test]
    fn test_load_schedule_rejects_unknown_and_missing_cities() {
        let table: DistanceTable<i64> = load_distances(Cursor::new(DISTANCES)).unwrap();
        let text = "schedule\t06/01\natlantis\t0\n";
        let result = load_schedule(Cursor::new(text), &table);
        assert!(matches!(
            result,
            Err(InstanceLoaderError::UnknownCity { name, .. }) if name == "atlantis"
        ));

        let text = "schedule\t06/01\nhome\t0\nrome\t0\n";
        let result = load_schedule(Cursor::new(text), &table);
        assert!(matches!(
            result,
            Err(InstanceLoaderError::MissingCity { name }) if name == "bern"
        ));
    }

    #[test]
    fn test_load_schedule_rejects_duplicate_rows() {
        let table: DistanceTable<i64> = load_distances(Cursor::new(DISTANCES)).unwrap();
        let text = "schedule\t06/01\nhome\t0\nhome\t0\n";
        let result = load_schedule(Cursor::new(text), &table);
        assert!(matches!(
            result,
            Err(InstanceLoaderError::DuplicateCity { name, .. }) if name == "home"
        ));
    }

    #[test]
    fn test_load_destinations_resolves_names() {
        let table: DistanceTable<i64> = load_distances(Cursor::new(DISTANCES)).unwrap();
        let destinations = load_destinations(Cursor::new("rome\nbern\n"), &table).unwrap();
        assert_eq!(
            destinations,
            vec![
                table.index_of("rome").unwrap(),
                table.index_of("bern").unwrap()
            ]
        );

        let result = load_destinations(Cursor::new("nowhere\n"), &table);
        assert!(matches!(
            result,
            Err(InstanceLoaderError::UnknownCity { .. })
        ));
    }
}
