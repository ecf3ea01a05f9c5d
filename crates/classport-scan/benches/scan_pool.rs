//! Benchmark – `classport_scan::scan`
#![allow(missing_docs)]

use std::time::Duration;

use bstr::BStr;
use classport_scan::{DiagnosticSink, PoolTag, PoolWriter, ScanOptions, ScanRequest, scan};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Sink that only counts, so the benchmark measures the walk and not the
/// reporting.
#[derive(Default)]
struct CountingSink {
    pairs: usize,
}

impl DiagnosticSink for CountingSink {
    fn annotation_found(&mut self, _: &BStr, _: &BStr, _: &BStr) {}

    fn pair(&mut self, _: &BStr, _: &BStr, _: &BStr, _: &BStr) {
        self.pairs += 1;
    }
}

/// Builds a deterministic pool of roughly `entries` records, mixing the tag
/// kinds a compiled class usually carries. When `annotated` is set the
/// provenance strings sit in the middle of the pool.
fn make_pool(entries: usize, annotated: bool) -> Vec<u8> {
    let options = ScanOptions::default();
    let mut w = PoolWriter::new();
    for i in 0..entries / 2 {
        let idx = u16::try_from(i % 1000).unwrap_or(0);
        let written = match i % 5 {
            0 => w.utf8(format!("com/example/pkg{i}/Type{i}")),
            1 => w.index_ref(PoolTag::Class, idx),
            2 => w.pair_ref(PoolTag::Methodref, idx, idx + 1),
            3 => w.long(i64::try_from(i).unwrap_or(0)),
            _ => w.utf8("(Ljava/lang/String;I)V"),
        };
        written.expect("pool fits");
    }
    if annotated {
        w.utf8(&options.annotation_descriptor).expect("pool fits");
        for (k, v) in [
            ("group", "org.example"),
            ("version", "1.0.0"),
            ("id", "org.example:demo:1.0.0"),
            ("artefact", "demo"),
        ] {
            w.utf8(k).and_then(|w| w.utf8(v)).expect("pool fits");
        }
        w.utf8(&options.attribute_marker).expect("pool fits");
    }
    for i in entries / 2..entries {
        let idx = u16::try_from(i % 1000).unwrap_or(0);
        let written = match i % 3 {
            0 => w.utf8("Code"),
            1 => w.integer(i32::try_from(i).unwrap_or(0)),
            _ => w.pair_ref(PoolTag::NameAndType, idx, idx),
        };
        written.expect("pool fits");
    }
    w.into_bytes()
}

fn bench_scan(c: &mut Criterion) {
    let options = ScanOptions::default();
    let mut group = c.benchmark_group("scan_pool");

    for &entries in &[64usize, 512, 4_096] {
        for annotated in [false, true] {
            let pool = make_pool(entries, annotated);
            let name = if annotated { "annotated" } else { "plain" };
            group.throughput(Throughput::Bytes(pool.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, entries), &pool, |b, pool| {
                b.iter(|| {
                    let mut sink = CountingSink::default();
                    let request = ScanRequest::new(black_box(pool.as_slice()), "LFoo;", "run");
                    let record = scan(&request, &options, &mut sink);
                    black_box((record, sink.pairs));
                });
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_scan }
criterion_main!(benches);
