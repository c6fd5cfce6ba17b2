use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use seqpipe::config::{parse_query, run_pipeline};
use seqpipe::generators::range;
use seqpipe::ops::{filter, map, sum};
use seqpipe::{pipeline, DynPipelineBuilder, Stage};

const QUERY: &str = r#"
[input]
range = { start = 0, end = 10000 }

[[stages]]
op = "filter"
predicate = "even"

[[stages]]
op = "map"
mapper = "square"

[[stages]]
op = "sum"
"#;

fn benchmark_static_vs_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_map_sum");

    for size in [100i64, 10_000, 100_000] {
        let input: Vec<i64> = range(0, size);

        let composed = pipeline![
            filter(|n: &i64| n % 2 == 0),
            map(|n: i64| n.wrapping_mul(n)),
            sum()
        ];
        group.bench_with_input(BenchmarkId::new("static", size), &input, |b, input| {
            b.iter(|| black_box(composed.run(black_box(input.clone())).unwrap()))
        });

        let dynamic = DynPipelineBuilder::<Vec<i64>>::new()
            .stage(filter(|n: &i64| n % 2 == 0))
            .and_then(|b| b.stage(map(|n: i64| n.wrapping_mul(n))))
            .and_then(|b| b.stage(sum::<i64>()))
            .and_then(|b| b.build())
            .unwrap();
        group.bench_with_input(BenchmarkId::new("dynamic", size), &input, |b, input| {
            b.iter(|| black_box(dynamic.execute_as::<i64>(black_box(input.clone())).unwrap()))
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &input, |b, input| {
            b.iter(|| {
                black_box(
                    black_box(input.clone())
                        .into_iter()
                        .filter(|n| n % 2 == 0)
                        .map(|n| n.wrapping_mul(n))
                        .fold(0i64, i64::wrapping_add),
                )
            })
        });
    }

    group.finish();
}

fn benchmark_stage_overhead(c: &mut Criterion) {
    let input: Vec<i32> = range(0, 1000);
    let single = filter(|n: &i32| *n > 0);
    c.bench_function("single_filter_stage", |b| {
        b.iter(|| black_box(single.execute(black_box(input.clone())).unwrap()))
    });
}

fn benchmark_query_assembly(c: &mut Criterion) {
    let query = parse_query(QUERY).unwrap();
    c.bench_function("query_build", |b| {
        b.iter(|| black_box(query.build().unwrap()))
    });

    let pipeline = query.build().unwrap();
    let input = query.input.generate();
    c.bench_function("query_run", |b| {
        b.iter(|| black_box(run_pipeline(&pipeline, black_box(input.clone())).unwrap()))
    });
}

criterion_group!(
    benches,
    benchmark_static_vs_dynamic,
    benchmark_stage_overhead,
    benchmark_query_assembly
);
criterion_main!(benches);
