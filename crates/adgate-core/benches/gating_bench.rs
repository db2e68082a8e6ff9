use criterion::{black_box, criterion_group, criterion_main, Criterion};

use adgate_core::gating::{evaluate, record_shown};
use adgate_core::plans::PlanPolicy;
use adgate_core::routing::RouteClassifier;
use adgate_core::state::SessionAdState;

fn bench_evaluate(c: &mut Criterion) {
    let policy = PlanPolicy::limited(3, 300);
    let state = record_shown(&SessionAdState::ZERO, 1_000);
    c.bench_function("evaluate_rate_limited", |b| {
        b.iter(|| evaluate(black_box(&policy), black_box(&state), black_box(1_100)))
    });
}

fn bench_classify(c: &mut Criterion) {
    let classifier = RouteClassifier::default();
    c.bench_function("classify_localized_path", |b| {
        b.iter(|| classifier.classify(black_box("/pt-BR/dashboard/candidates/42?tab=cv")))
    });
}

criterion_group!(benches, bench_evaluate, bench_classify);
criterion_main!(benches);
