#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use pack::{encoding::ser::SerializerExt, prelude::*};

fn pack_u64_encode(c: &mut Criterion) {
    c.bench_function("pack u64 encode", |b| {
        let v = Value::from(1_000_000u64);
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn pack_u64_ser(c: &mut Criterion) {
    c.bench_function("pack u64 ser", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(128);
            out.put_u64(black_box(1_000_000));
            out
        })
    });
}

fn json_u64_encode(c: &mut Criterion) {
    c.bench_function("JSON u64 encode", |b| {
        let v = Value::from(1_000_000u64);
        b.iter(|| serde_json::to_string(black_box(&v)))
    });
}

fn pack_u64_decode(c: &mut Criterion) {
    c.bench_function("pack u64 decode", |b| {
        let buf = encode_full(&Value::from(1_000_000u64));
        let cfg = DecodeConfig::default();
        b.iter(|| Type::U64.unmarshal_value(black_box(&buf), &cfg))
    });
}

fn json_u64_decode(c: &mut Criterion) {
    c.bench_function("JSON u64 decode", |b| {
        let text = Value::from(1_000_000u64).to_string();
        b.iter(|| Type::U64.unmarshal_value_json(black_box(text.as_bytes())))
    });
}

fn pack_bytes_encode(c: &mut Criterion) {
    c.bench_function("pack bytes encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let v = Value::from(s);
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn json_bytes_encode(c: &mut Criterion) {
    c.bench_function("JSON bytes encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let v = Value::from(s);
        b.iter(|| serde_json::to_string(black_box(&v)))
    });
}

criterion_group!(
    benches,
    pack_u64_encode,
    pack_u64_ser,
    json_u64_encode,
    pack_u64_decode,
    json_u64_decode,
    pack_bytes_encode,
    json_bytes_encode,
);

criterion_main!(benches);
