//! Benchmarks for the pure scoring path
//!
//! Run with: cargo bench --package recommender
//!
//! Covers the per-candidate scoring formulas and the taste-profile
//! top-genre cut, the hot loops of a generation cycle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::{content_similarity, predicted_rating, TasteProfile};

fn sample_profile(genres: u32) -> TasteProfile {
    let mut profile = TasteProfile::default();
    for id in 1..=genres {
        profile
            .genre_weights
            .insert(id, f64::from(id % 10) + 1.0);
    }
    profile
}

fn bench_content_similarity(c: &mut Criterion) {
    c.bench_function("content_similarity", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for popularity in 0..100 {
                total += content_similarity(black_box(8.5), black_box(f64::from(popularity)));
            }
            black_box(total)
        })
    });
}

fn bench_predicted_rating(c: &mut Criterion) {
    c.bench_function("predicted_rating", |b| {
        b.iter(|| {
            let mut kept = 0;
            for vote in 0..100 {
                if predicted_rating(black_box(f64::from(vote) / 10.0)) >= 60.0 {
                    kept += 1;
                }
            }
            black_box(kept)
        })
    });
}

fn bench_top_genres(c: &mut Criterion) {
    let profile = sample_profile(50);

    c.bench_function("profile_top_genres", |b| {
        b.iter(|| {
            let top = profile.top_genres(black_box(3));
            black_box(top)
        })
    });
}

criterion_group!(
    benches,
    bench_content_similarity,
    bench_predicted_rating,
    bench_top_genres
);
criterion_main!(benches);
