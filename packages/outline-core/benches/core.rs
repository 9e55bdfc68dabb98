use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use outline_core::{below, replay, IdSupplier, Log, NodeId, SequentialIds};

/// A flat run of `count` rows, every third one nested under its predecessor and every fifth
/// one cut again, so replay exercises all shift paths.
fn workload(count: usize) -> (Log, NodeId) {
    let mut ids = SequentialIds::new("bench");
    let first = ids.row("first");
    let first_id = first.id.clone();
    let mut log = Log::new().add(first);
    let mut last = first_id.clone();
    for i in 1..count {
        let row = ids.row("row");
        let id = row.id.clone();
        log = match i % 5 {
            0 => log.add_above(last.clone(), row).cut(id.clone()),
            _ if i % 3 == 0 => log.add_right(last.clone(), row),
            _ => log.add_below(last.clone(), row),
        };
        if i % 5 != 0 {
            last = id;
        }
    }
    (log, first_id)
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for count in [10usize, 100, 1_000] {
        let (log, _) = workload(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &log, |b, log| {
            b.iter(|| replay(black_box(log)).expect("replay"))
        });
    }
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_below");
    for count in [10usize, 100, 1_000] {
        let (log, first) = workload(count);
        let snapshot = replay(&log).expect("replay");
        group.bench_with_input(BenchmarkId::from_parameter(count), &snapshot, |b, snapshot| {
            b.iter(|| {
                let mut steps = 0usize;
                let mut current = first.clone();
                while let Some(next) = below(snapshot, &current) {
                    current = next.id.clone();
                    steps += 1;
                }
                steps
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replay, bench_walk);
criterion_main!(benches);
