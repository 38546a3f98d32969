//! Benchmarking YUMA parsing & formatting
//! using a complete GPS constellation almanac
extern crate criterion;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use yuma::prelude::AlmanacTable;

const NAVCEN: &str = "data/YUMA/yumaAlmanac_2024-03-01.alm";

fn benchmark(c: &mut Criterion) {
    let content = std::fs::read_to_string(NAVCEN).unwrap();
    let table = AlmanacTable::parse(&content).unwrap();

    let mut parsing_grp = c.benchmark_group("parsing");

    parsing_grp.bench_function("YUMA/file", |b| {
        b.iter(|| {
            let _ = AlmanacTable::from_file(black_box(NAVCEN)).unwrap();
        })
    });

    parsing_grp.bench_function("YUMA/content", |b| {
        b.iter(|| {
            let _ = AlmanacTable::parse(black_box(&content)).unwrap();
        })
    });

    parsing_grp.finish();

    let mut formatting_grp = c.benchmark_group("formatting");

    formatting_grp.bench_function("YUMA/table", |b| {
        b.iter(|| {
            let _ = black_box(&table).to_string();
        })
    });

    formatting_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
