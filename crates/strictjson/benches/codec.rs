use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use strictjson::{decode, encode, Map, Value};

/// An array of `n` small records, the shape most API payloads take.
fn records(n: usize) -> Value {
    (0..n)
        .map(|i| {
            let mut row = Map::new();
            row.insert("id".to_string(), Value::Int(i as i64));
            row.insert("name".to_string(), Value::from(format!("user/{i}")));
            row.insert("score".to_string(), Value::Float(i as f64 * 0.25));
            row.insert("active".to_string(), Value::Bool(i % 3 != 0));
            row.insert("note".to_string(), Value::from("line one\nline \"two\""));
            row.insert("tags".to_string(), Value::Array(vec!["a".into(), "b".into()]));
            Value::Object(row)
        })
        .collect()
}

fn nested(depth: usize) -> String {
    format!("{}1{}", "[".repeat(depth), "]".repeat(depth))
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for n in [10, 1_000] {
        let value = records(n);
        let len = encode(&value).unwrap().len();
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("records_{n}"), |b| {
            b.iter(|| black_box(encode(black_box(&value)).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for n in [10, 1_000] {
        let text = encode(&records(n)).unwrap();
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("records_{n}"), |b| {
            b.iter(|| black_box(decode(black_box(&text)).unwrap()))
        });
    }

    let text = nested(500);
    group.bench_function("nested_500", |b| {
        b.iter(|| black_box(decode(black_box(&text)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
