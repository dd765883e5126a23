/*
properties of the quadrature engine:
zero-width interval and n <= 0 give 0.0
midpoint/trapezoid exact for linear functions, Simpson exact for cubics
error ratio under step halving: 4 for second order, 16 for Simpson
adaptive trapezoid and Simpson on the lab problem
a-priori n for the lab problem
repeated calls are bit-identical
*/
use crate::numerical::Quadrature::error_bound::ErrorBoundPlanner;
use crate::numerical::Quadrature::fixed_rules::{
    QuadRule, midpoint_rule, simpson_rule, trapezoid_rule,
};
use crate::numerical::Quadrature::integrand::{ClosureIntegrand, Integrand, RationalIntegrand};
use crate::numerical::Quadrature::runge_driver::adaptive_integrate;
use approx::assert_relative_eq;
use std::f64::consts::PI;
use strum::IntoEnumIterator;

/// ln(2)/2 + 3π/8
const LAB_EXACT: f64 = 1.5246708353761451;

#[test]
fn test_zero_width_interval() {
    let f = RationalIntegrand::new();
    for rule in QuadRule::iter() {
        for n in [1, 2, 7, 100] {
            assert_eq!(rule.integrate(&f, 1.3, 1.3, n), 0.0, "{} n = {}", rule, n);
        }
    }
}

#[test]
fn test_non_positive_n() {
    let f = RationalIntegrand::new();
    for n in [0, -1, -10] {
        assert_eq!(midpoint_rule(&f, 0.0, 2.0, n), 0.0);
        assert_eq!(trapezoid_rule(&f, 0.0, 2.0, n), 0.0);
        assert_eq!(simpson_rule(&f, 0.0, 2.0, n), 0.0);
    }
}

#[test]
fn test_second_order_rules_exact_for_linear() {
    let f = ClosureIntegrand::new(|x| 3.0 * x - 2.0, "3x - 2");
    let antiderivative = |x: f64| 1.5 * x * x - 2.0 * x;
    for &(a, b) in &[(0.0, 1.0), (-2.0, 5.0), (1.5, 1.75), (-3.0, -1.0)] {
        let exact = antiderivative(b) - antiderivative(a);
        for n in [1, 2, 3, 10, 100] {
            assert_relative_eq!(midpoint_rule(&f, a, b, n), exact, epsilon = 1e-12);
            assert_relative_eq!(trapezoid_rule(&f, a, b, n), exact, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_simpson_exact_for_cubic() {
    let f = ClosureIntegrand::new(|x| x * x * x - 2.0 * x * x + x + 5.0, "x^3 - 2x^2 + x + 5");
    let antiderivative = |x: f64| x.powi(4) / 4.0 - 2.0 * x.powi(3) / 3.0 + x * x / 2.0 + 5.0 * x;
    for &(a, b) in &[(0.0, 1.0), (-1.0, 3.0), (0.5, 0.75)] {
        let exact = antiderivative(b) - antiderivative(a);
        for n in [2, 4, 5, 10] {
            assert_relative_eq!(simpson_rule(&f, a, b, n), exact, epsilon = 1e-12);
        }
    }
}

fn error_ratio<I: Integrand>(rule: QuadRule, f: &I, a: f64, b: f64, exact: f64, n: i64) -> f64 {
    let coarse = (rule.integrate(f, a, b, n) - exact).abs();
    let fine = (rule.integrate(f, a, b, 2 * n) - exact).abs();
    coarse / fine
}

#[test]
fn test_error_ratio_under_step_halving() {
    let f = ClosureIntegrand::new(|x: f64| x.exp(), "exp(x)");
    let exact = 1.0_f64.exp() - 1.0;
    for rule in QuadRule::iter() {
        let expected = 2.0_f64.powi(rule.order() as i32);
        let ratio = error_ratio(rule, &f, 0.0, 1.0, exact, 8);
        assert!(
            (ratio - expected).abs() <= 0.2 * expected,
            "{}: ratio {} expected {}",
            rule,
            ratio,
            expected
        );
    }
    // the lab integrand behaves the same
    let lab = RationalIntegrand::new();
    let exact = lab.exact_integral(0.0, 2.0);
    for rule in QuadRule::iter() {
        let expected = 2.0_f64.powi(rule.order() as i32);
        let ratio = error_ratio(rule, &lab, 0.0, 2.0, exact, 16);
        assert!((ratio - expected).abs() <= 0.2 * expected, "{}: ratio {}", rule, ratio);
    }
}

#[test]
fn test_adaptive_trapezoid_on_lab_problem() {
    let f = RationalIntegrand::new();
    let exact = 0.5 * 2.0_f64.ln() + 3.0 * PI / 8.0;
    assert_relative_eq!(exact, LAB_EXACT, epsilon = 1e-10);
    let outcome = adaptive_integrate(&QuadRule::Trapezoid.bind(&f), 0.0, 2.0, 1e-4, 2);
    assert!(outcome.is_converged());
    assert!((outcome.value() - exact).abs() < 1e-4);
    // n = 2 * 2^k
    let n = outcome.subdivisions();
    assert!(n >= 4 && n % 2 == 0 && (n / 2).count_ones() == 1);
}

#[test]
fn test_adaptive_simpson_on_lab_problem() {
    let f = RationalIntegrand::new();
    let outcome = adaptive_integrate(&QuadRule::Simpson.bind(&f), 0.0, 2.0, 1e-4, 4);
    assert!(outcome.is_converged());
    assert!(outcome.subdivisions() >= 8);
    assert!((outcome.value() - LAB_EXACT).abs() < 1e-4);
}

#[test]
fn test_error_bound_planner_lab_values() {
    let planner = ErrorBoundPlanner::new(0.43156).unwrap();
    assert_eq!(planner.subdivisions(0.0, 2.0, 0.0001, 24.0), 38);
    assert_eq!(planner.subdivisions(0.0, 2.0, 0.0001, 12.0), 54);
    let f = RationalIntegrand::new();
    let exact = f.exact_integral(0.0, 2.0);
    for rule in [QuadRule::Midpoint, QuadRule::Trapezoid] {
        let plan = planner.plan(rule, 0.0, 2.0, 1e-4).unwrap();
        assert!((rule.integrate(&f, 0.0, 2.0, plan.subdivisions) - exact).abs() <= 1e-4);
    }
}

#[test]
fn test_repeated_calls_are_bit_identical() {
    let f = RationalIntegrand::new();
    for rule in QuadRule::iter() {
        let first = rule.integrate(&f, 0.0, 2.0, 37);
        let second = rule.integrate(&f, 0.0, 2.0, 37);
        assert_eq!(first.to_bits(), second.to_bits());
    }
    let first = adaptive_integrate(&QuadRule::Simpson.bind(&f), 0.0, 2.0, 1e-8, 4);
    let second = adaptive_integrate(&QuadRule::Simpson.bind(&f), 0.0, 2.0, 1e-8, 4);
    assert_eq!(first.value().to_bits(), second.value().to_bits());
    assert_eq!(first.subdivisions(), second.subdivisions());
}
