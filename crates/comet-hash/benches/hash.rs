use criterion::{black_box, criterion_group, criterion_main, Criterion};
use comet_hash::{normalize_domain, PasswordHasher};

fn bench_normalize(c: &mut Criterion) {
    let sites = [
        "google.com",
        "accounts.google.com",
        "www.google.com.au",
        "https://user@mail.google.com:443/mail/u/0/",
        "http://[::1]:8080/",
        "localhost",
    ];

    c.bench_function("normalize_domain", |b| {
        b.iter(|| {
            for site in sites {
                black_box(normalize_domain(black_box(site)));
            }
        })
    });
}

fn bench_hash(c: &mut Criterion) {
    let hasher = PasswordHasher::default();

    c.bench_function("hash_default_parameters", |b| {
        b.iter(|| black_box(hasher.hash(black_box("www.google.com.au"), black_box("P@$$W0RD"))))
    });
}

criterion_group!(benches, bench_normalize, bench_hash);
criterion_main!(benches);
