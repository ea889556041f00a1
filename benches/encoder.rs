#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use pack::prelude::*;

const N_BIG_LIST: usize = 2000;
const N_LIST: usize = 10;
const N_FIELDS: usize = 10;

fn big_list() -> Value {
    let v: Vec<Value> = (0..N_BIG_LIST).map(|i| Value::from(i as u64)).collect();
    Value::from(List::new(v).unwrap())
}

fn big_v() -> Value {
    let row: Vec<Value> = (0..N_LIST).map(|i| Value::from(U256::from(U64::new(i as u64)))).collect();
    let st: Struct = (0..N_FIELDS)
        .map(|i| (format!("field_{}", i), Value::from(List::new(row.clone()).unwrap())))
        .collect();
    let v: Vec<Value> = std::iter::repeat(st).map(Value::from).take(N_LIST).collect();
    Value::from(List::new(v).unwrap())
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!("Creating a value of size {}", encode_full(&big_v()).len()),
        |b| b.iter(|| black_box(big_v())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let big_v = big_v();
    let enc_len = encode_full(&big_v).len();
    c.bench_function(
        &format!("Encoding a value, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_v))),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let big_v = big_v();
    let enc_len = encode_full(&big_v).len();
    c.bench_function(
        &format!(
            "Encoding a value, output size of {} bytes, buffer preallocated",
            enc_len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(enc_len * 2);
                encode(black_box(&big_v), &mut out);
                out
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let big_v = big_v();
    let ty = big_v.ty();
    let enc = encode_full(&big_v);
    let cfg = DecodeConfig::default();
    c.bench_function(
        &format!("Decoding a value, input size of {} bytes", enc.len()),
        move |b| b.iter(|| ty.unmarshal_value(black_box(&enc), &cfg).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_list = big_list();
    let enc_len = encode_full(&big_list).len();
    c.bench_function(
        &format!("Encoding a list, output size of {} bytes", enc_len),
        move |b| b.iter(|| encode_full(black_box(&big_list))),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let big_list = big_list();
    let ty = big_list.ty();
    let enc = encode_full(&big_list);
    let cfg = DecodeConfig::default();
    c.bench_function(
        &format!("Decoding a list of length {}", N_BIG_LIST),
        move |b| b.iter(|| ty.unmarshal_value(black_box(&enc), &cfg).unwrap()),
    );
}

fn bench_typed(c: &mut Criterion) {
    let typed = Typed::new(big_v().as_list().unwrap().get(0).unwrap().as_struct().unwrap().clone());
    let enc = encode_full(&typed);
    let cfg = DecodeConfig::default();
    c.bench_function(
        &format!("Decoding a typed envelope, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode_full::<Typed>(black_box(&enc), &cfg).unwrap()),
    );
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat,
    bench_typed
);
criterion_main!(benches);
