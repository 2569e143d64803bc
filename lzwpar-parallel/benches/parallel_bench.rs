//! Chunked compression benchmarks.
//!
//! Measures how container compression and decompression scale with the
//! number of workers.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lzwpar_parallel::{ParallelConfig, RunContext, parallel_decode, parallel_encode};
use std::hint::black_box;

const SIZE: usize = 4 * 1024 * 1024;
const WORKERS: [usize; 4] = [1, 2, 4, 8];

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. \
                 Pack my box with five dozen liquor jugs. \
                 How vexingly quick daft zebras jump! ";
    text.iter().copied().cycle().take(size).collect()
}

fn bench_parallel_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_encode");
    let data = text_like(SIZE);

    for workers in WORKERS {
        let ctx = RunContext::new(ParallelConfig::new(workers));
        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(BenchmarkId::from_parameter(workers), &data, |b, data| {
            b.iter(|| black_box(parallel_encode(black_box(data), &ctx).unwrap()))
        });
    }

    group.finish();
}

fn bench_parallel_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_decode");
    let data = text_like(SIZE);

    for workers in WORKERS {
        let ctx = RunContext::new(ParallelConfig::new(workers));
        let container = parallel_encode(&data, &ctx).unwrap().data;
        group.throughput(Throughput::Bytes(SIZE as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &container,
            |b, container| b.iter(|| black_box(parallel_decode(black_box(container), &ctx).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parallel_encode, bench_parallel_decode);
criterion_main!(benches);
