//! Validator and mask throughput.
//!
//! Validators run on every keystroke of a form field, so a bulk import of customer
//! records is the realistic worst case.
//!
//! Run with: cargo bench

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use viewkit::format::{apply_mask, apply_monetary_mask};
use viewkit::scheduler::{FramePump, RedrawScheduler};
use viewkit::validate::{is_valid_cnpj, is_valid_cpf, is_valid_email};

const CPFS: [&str; 4] = ["11144477735", "52998224725", "12345678909", "11144477736"];
const CNPJS: [&str; 4] = [
    "11.222.333/0001-81",
    "60698496000140",
    "04.548.972/0001-76",
    "11222333000182",
];

/// Ten thousand customer documents, alternating CPF and CNPJ.
fn import_batch() -> Vec<&'static str> {
    CPFS.iter()
        .zip(CNPJS.iter())
        .flat_map(|(cpf, cnpj)| [*cpf, *cnpj])
        .cycle()
        .take(10_000)
        .collect()
}

fn validator_benchmarks(c: &mut Criterion) {
    c.bench_function("cpf_single", |b| {
        b.iter(|| is_valid_cpf(black_box("52998224725")))
    });

    c.bench_function("cnpj_single_formatted", |b| {
        b.iter(|| is_valid_cnpj(black_box("11.222.333/0001-81")))
    });

    c.bench_function("email_single", |b| {
        b.iter(|| is_valid_email(black_box("ana.souza@example.com.br")))
    });

    let batch = import_batch();
    c.bench_function("document_import_10k", |b| {
        b.iter(|| {
            black_box(&batch)
                .iter()
                .filter(|doc| is_valid_cpf(doc) || is_valid_cnpj(doc))
                .count()
        })
    });
}

fn mask_benchmarks(c: &mut Criterion) {
    c.bench_function("mask_cpf", |b| {
        b.iter(|| apply_mask(black_box("999.999.999-99"), black_box("52998224725")))
    });

    c.bench_function("mask_monetary", |b| {
        b.iter(|| apply_monetary_mask(black_box("1234567890")))
    });
}

fn pump_benchmarks(c: &mut Criterion) {
    c.bench_function("pump_drain_burst_100", |b| {
        b.iter(|| {
            let scheduler = RedrawScheduler::new();
            let mut pump = FramePump::new(scheduler.clone(), || {});
            for _ in 0..100 {
                scheduler.schedule();
            }
            while !scheduler.is_idle() {
                pump.tick();
            }
            black_box(pump.stats())
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = validator_benchmarks, mask_benchmarks, pump_benchmarks
}
criterion_main!(benches);
