use admission_engine::{load_rooms, Request, ReservationEngine, RoomConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Deterministic pseudo-random batch: `rooms` rooms over a 0..1000 day and
/// `requests` short requests scattered across it.
fn synthetic(rooms: usize, requests: usize) -> (Vec<RoomConfig>, Vec<Request>) {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move |bound: i64| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % bound as u64) as i64
    };

    let configs = (0..rooms)
        .map(|i| {
            let start = next(200);
            RoomConfig::new(100 + i as i64, 10 + next(90), start, start + 400 + next(400))
        })
        .collect();
    let reqs = (0..requests)
        .map(|_| {
            let start = next(950);
            Request::new(1 + next(80), start, start + 1 + next(30))
        })
        .collect();
    (configs, reqs)
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    for &(rooms, requests) in &[(10, 1_000), (100, 10_000), (500, 20_000)] {
        let (configs, reqs) = synthetic(rooms, requests);
        group.throughput(Throughput::Elements(requests as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rooms}x{requests}")),
            &(configs, reqs),
            |b, (configs, reqs)| {
                b.iter(|| {
                    let mut engine = ReservationEngine::new(load_rooms(configs).unwrap());
                    engine.run(black_box(reqs)).unwrap();
                    black_box(engine.outcomes().len())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_run);
criterion_main!(benches);
