// Criterion benchmarks for Tomolink ranking

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tomolink::core::{calculate_compatibility, Matcher};
use tomolink::models::{Answers, ScoringWeights, SuggestionFilters, UserProfile};

const GAMES: [&str; 6] = ["Valorant", "Overwatch", "Apex", "League", "Fortnite", "Rocket League"];
const PLATFORMS: [&str; 3] = ["PC", "PS5", "Xbox"];
const REGIONS: [&str; 4] = ["NA", "EU", "ASIA", "OCE"];
const ROLES: [&str; 3] = ["Tank", "DPS", "Support"];

fn create_candidate(id: usize) -> UserProfile {
    let games = (0..3).map(|i| GAMES[(id + i * 2) % GAMES.len()].to_string()).collect();
    let quiz_answers: Answers = (0..8)
        .map(|q| (format!("q{}", q), if (id + q) % 3 == 0 { "A" } else { "B" }.to_string()))
        .collect();

    UserProfile {
        id: id as i64,
        username: format!("player{}", id),
        games,
        platform: Some(PLATFORMS[id % PLATFORMS.len()].to_string()),
        region: Some(REGIONS[id % REGIONS.len()].to_string()),
        quiz_answers,
        feedback_score: Some((id % 120) as i32),
        overwatch_role: Some(ROLES[id % ROLES.len()].to_string()),
        is_private: id % 17 == 0,
    }
}

fn bench_compatibility(c: &mut Criterion) {
    let requester = create_candidate(1);
    let candidate = create_candidate(2);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_compatibility", |b| {
        b.iter(|| calculate_compatibility(black_box(&requester), black_box(&candidate), &weights));
    });
}

fn bench_rank_suggestions(c: &mut Criterion) {
    let matcher = Matcher::default();
    let requester = create_candidate(0);
    let related: HashSet<i64> = (0..50).map(|i| i * 7).collect();
    let filters = SuggestionFilters::default();

    let mut group = c.benchmark_group("rank_suggestions");

    for size in [100, 1000, 10000].iter() {
        let candidates: Vec<UserProfile> = (1..=*size).map(create_candidate).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, candidates| {
            b.iter(|| {
                matcher.rank_suggestions(
                    black_box(&requester),
                    black_box(candidates.clone()),
                    &related,
                    &filters,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compatibility, bench_rank_suggestions);
criterion_main!(benches);
