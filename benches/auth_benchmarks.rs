use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use armory::auth::{hash_password, token, verify_password};

fn bench_password_hashing(c: &mut Criterion) {
    c.bench_function("bcrypt_hash_cost_10", |b| {
        b.iter(|| hash_password(black_box("correct-horse-battery"), 10).unwrap())
    });

    let hash = hash_password("correct-horse-battery", 10).unwrap();
    c.bench_function("bcrypt_verify_cost_10", |b| {
        b.iter(|| verify_password(black_box("correct-horse-battery"), &hash).unwrap())
    });
}

fn bench_tokens(c: &mut Criterion) {
    let secret = b"bench-secret";

    c.bench_function("token_issue", |b| {
        b.iter(|| token::issue(black_box(42), secret).unwrap())
    });

    let issued = token::issue(42, secret).unwrap();
    c.bench_function("token_validate", |b| {
        b.iter(|| token::validate(black_box(&issued), secret).unwrap())
    });
}

criterion_group!(benches, bench_password_hashing, bench_tokens);
criterion_main!(benches);
