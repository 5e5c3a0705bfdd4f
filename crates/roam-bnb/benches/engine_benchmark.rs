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

use criterion::{criterion_group, criterion_main, Criterion};
use roam_bnb::engine::TourSolver;
use roam_bnb::monitor::no_op::NoOperationMonitor;
use roam_bnb::strategy::TraversalStrategy;
use roam_model::city::CityIndex;
use roam_model::distance::DistanceTable;
use roam_model::schedule::{WaitSchedule, WaitTime};
use roam_model::trip::Trip;

/// A deterministic pseudo-random instance: distances cycle through a small
/// set of day counts and a sprinkle of waits keeps the bounds honest.
fn synthetic_trip(num_cities: usize) -> Trip<i64> {
    let names: Vec<String> = (0..num_cities).map(|i| format!("city{}", i)).collect();
    let mut rows = vec![vec![0i64; num_cities]; num_cities];
    for (a, row) in rows.iter_mut().enumerate() {
        for (b, days) in row.iter_mut().enumerate() {
            if a != b {
                *days = 1 + ((a * 7 + b * 3) % 4) as i64;
            }
        }
    }
    let distances = DistanceTable::from_rows(names, rows).unwrap();

    let horizon = 512;
    let mut schedule_rows = vec![vec![WaitTime::some(0); horizon]; num_cities];
    for (c, row) in schedule_rows.iter_mut().enumerate() {
        for (d, wait) in row.iter_mut().enumerate() {
            if (c * 13 + d) % 11 == 0 {
                *wait = WaitTime::some(((c + d) % 3) as i64);
            }
        }
    }
    let schedule = WaitSchedule::new(schedule_rows, "day zero".to_string());

    Trip::builder(distances, schedule)
        .home(CityIndex::new(0))
        .destinations((1..num_cities).map(CityIndex::new))
        .build()
        .unwrap()
}

fn bench_strategies(c: &mut Criterion) {
    let trip = synthetic_trip(9);
    let mut group = c.benchmark_group("tour_solver");
    for strategy in [
        TraversalStrategy::Depth,
        TraversalStrategy::SortedDepth,
        TraversalStrategy::Breadth,
    ] {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                TourSolver::new()
                    .solve(&trip, strategy, NoOperationMonitor::new())
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
