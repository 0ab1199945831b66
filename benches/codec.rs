use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pghstore::{from_str, to_string, HstoreMap};

fn build_document(pairs: usize) -> HstoreMap {
    (0..pairs)
        .map(|i| {
            let value = if i % 7 == 0 {
                None
            } else {
                Some(format!("value \"{i}\" with \\escapes"))
            };
            (format!("key_{i}"), value)
        })
        .collect()
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let document = build_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }

    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = to_string(&build_document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<HstoreMap>(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_parse_pair_stream(c: &mut Criterion) {
    let text = to_string(&build_document(1000)).unwrap();

    c.bench_function("parse_pair_stream_1000", |b| {
        b.iter(|| {
            let mut count = 0;
            for pair in pghstore::parse(black_box(&text)) {
                let _ = pair.unwrap();
                count += 1;
            }
            count
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize,
    benchmark_parse,
    benchmark_parse_pair_stream
);
criterion_main!(benches);
