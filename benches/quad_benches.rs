use RustedQuad::numerical::Quadrature::fixed_rules::QuadRule;
use RustedQuad::numerical::Quadrature::integrand::RationalIntegrand;
use RustedQuad::numerical::Quadrature::runge_driver::adaptive_integrate;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_fixed_rules(c: &mut Criterion) {
    let f = RationalIntegrand::new();
    let mut group = c.benchmark_group("fixed rules, n = 1000");
    for rule in [QuadRule::Midpoint, QuadRule::Trapezoid, QuadRule::Simpson] {
        group.bench_function(format!("{}", rule), |b| {
            b.iter(|| rule.integrate(&f, black_box(0.0), black_box(2.0), black_box(1000)))
        });
    }
    group.finish();
}

fn bench_adaptive(c: &mut Criterion) {
    let f = RationalIntegrand::new();
    c.bench_function("adaptive trapezoid eps 1e-8", |b| {
        b.iter(|| adaptive_integrate(&QuadRule::Trapezoid.bind(&f), 0.0, 2.0, black_box(1e-8), 2))
    });
    c.bench_function("adaptive Simpson eps 1e-10", |b| {
        b.iter(|| adaptive_integrate(&QuadRule::Simpson.bind(&f), 0.0, 2.0, black_box(1e-10), 4))
    });
}

criterion_group!(benches, bench_fixed_rules, bench_adaptive);
criterion_main!(benches);
