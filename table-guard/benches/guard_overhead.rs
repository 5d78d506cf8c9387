//! Benchmarks for the cost a guard adds to a pipeline stage.

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;
use table_guard::core::{CheckKind, CheckSpec, Guard};
use table_guard::error::GuardError;

fn create_batch(rows: usize) -> RecordBatch {
    let id = Int64Array::from((0..rows as i64).collect::<Vec<_>>());
    let value = Float64Array::from((0..rows).map(|i| (i % 100) as f64 * 1.5).collect::<Vec<_>>());
    let category = StringArray::from(
        (0..rows)
            .map(|i| if i % 10 == 0 { None } else { Some(format!("cat_{}", i % 5)) })
            .collect::<Vec<_>>(),
    );
    RecordBatch::try_from_iter(vec![
        ("id", Arc::new(id) as ArrayRef),
        ("value", Arc::new(value) as ArrayRef),
        ("category", Arc::new(category) as ArrayRef),
    ])
    .unwrap()
}

fn bench_guards(c: &mut Criterion) {
    let mut group = c.benchmark_group("guard_overhead");

    for rows in [1_000, 100_000] {
        let batch = create_batch(rows);

        group.bench_with_input(BenchmarkId::new("unguarded", rows), &batch, |b, batch| {
            let op = |()| Ok::<_, GuardError>(batch.clone());
            b.iter(|| black_box(op(())))
        });

        let disabled = Guard::unique()
            .arg("id")
            .enabled(false)
            .build()
            .unwrap()
            .wrap(|()| Ok::<_, GuardError>(batch.clone()));
        group.bench_with_input(BenchmarkId::new("disabled", rows), &rows, |b, _| {
            b.iter(|| black_box(disabled.call(())))
        });

        let unique = Guard::unique()
            .arg("id")
            .build()
            .unwrap()
            .wrap(|()| Ok::<_, GuardError>(batch.clone()));
        group.bench_with_input(BenchmarkId::new("unique", rows), &rows, |b, _| {
            b.iter(|| black_box(unique.call(())))
        });

        let multi = Guard::multi_check()
            .arg(vec![
                CheckSpec::builder(CheckKind::WithinRange)
                    .arg(json!({"value": [0, 150]}))
                    .build()
                    .unwrap(),
                CheckSpec::builder(CheckKind::WithinNStd).build().unwrap(),
                CheckSpec::builder(CheckKind::IsMonotonic)
                    .param("items", json!({"id": [true, true]}))
                    .build()
                    .unwrap(),
            ])
            .build()
            .unwrap()
            .wrap(|()| Ok::<_, GuardError>(batch.clone()));
        group.bench_with_input(BenchmarkId::new("multi_check", rows), &rows, |b, _| {
            b.iter(|| black_box(multi.call(())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_guards);
criterion_main!(benches);
