//! Lexer benchmarks.
//!
//! Run with: `cargo bench --package ruleq-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ruleq_lex::Lexer;

fn token_count(source: &str) -> usize {
    Lexer::tokenize(black_box(source)).unwrap().len()
}

fn bench_lexer_short(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_short");

    let source = "user.age gt 18";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("property_comparison", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_compound(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_compound");

    let source = "user.profile.age ge 18 and user.status eq \"active\" and color not in [\"red\",\"green\"]";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("and_or_with_not_in", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| token_count(black_box("email ew \".com\"")))
    });

    group.bench_function("escaped_string", |b| {
        b.iter(|| token_count(black_box(r#"note eq "line one\nline \"two\"""#)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("small_integer", |b| {
        b.iter(|| token_count(black_box("x eq 42")))
    });

    group.bench_function("decimal", |b| {
        b.iter(|| token_count(black_box("x gt 3.14159")))
    });

    group.bench_function("big_integer", |b| {
        b.iter(|| token_count(black_box("x gt 9223372036854775806")))
    });

    group.finish();
}

fn bench_lexer_datetime_rule(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_datetime");

    group.bench_function("dq_comparison", |b| {
        b.iter(|| token_count(black_box("created_at dq \"2024-07-09T19:12:00-03:00\"")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_short,
    bench_lexer_compound,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_datetime_rule
);
criterion_main!(benches);
