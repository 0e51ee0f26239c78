use chainkit::table::{ChainedTable, DuplicatePolicy};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BUCKETS: usize = 1024;
const OPS: u64 = 4096;

fn filled_table(policy: DuplicatePolicy) -> ChainedTable {
    let mut table = ChainedTable::try_new(BUCKETS, policy).unwrap();
    for value in 0..OPS as i64 {
        table.insert(value);
    }
    table
}

fn bench_insert_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_table");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("insert_distinct", |b| {
        b.iter_batched(
            || ChainedTable::try_new(BUCKETS, DuplicatePolicy::Reject).unwrap(),
            |mut table| {
                for value in 0..OPS as i64 {
                    std::hint::black_box(table.insert(std::hint::black_box(value)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("insert_counted_duplicates", |b| {
        b.iter_batched(
            || filled_table(DuplicatePolicy::Count),
            |mut table| {
                for value in 0..OPS as i64 {
                    std::hint::black_box(table.insert(std::hint::black_box(value)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_table");
    group.throughput(Throughput::Elements(OPS));

    let table = filled_table(DuplicatePolicy::Reject);
    group.bench_function("probe_hit", |b| {
        b.iter(|| {
            for value in 0..OPS as i64 {
                std::hint::black_box(table.occurrences(std::hint::black_box(value)));
            }
        })
    });
    group.bench_function("probe_miss", |b| {
        b.iter(|| {
            for value in 0..OPS as i64 {
                let absent = OPS as i64 + value;
                std::hint::black_box(table.occurrences(std::hint::black_box(absent)));
            }
        })
    });
    group.finish();
}

fn bench_remove_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_table");
    group.throughput(Throughput::Elements(OPS));
    group.bench_function("remove_then_reinsert", |b| {
        b.iter_batched(
            || filled_table(DuplicatePolicy::Reject),
            |mut table| {
                for value in 0..OPS as i64 {
                    std::hint::black_box(table.remove(value));
                    std::hint::black_box(table.insert(value));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_adversarial_single_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_table");
    let chain_len = 512u64;
    group.throughput(Throughput::Elements(chain_len));
    group.bench_function("single_bucket_scan", |b| {
        let mut table = ChainedTable::try_new(1, DuplicatePolicy::Reject).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        while table.len() < chain_len as usize {
            table.insert(rng.gen_range(0..10_000));
        }
        b.iter(|| {
            for value in 0..chain_len as i64 {
                std::hint::black_box(table.occurrences(std::hint::black_box(value)));
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_churn,
    bench_probe,
    bench_remove_reinsert,
    bench_adversarial_single_bucket
);
criterion_main!(benches);
