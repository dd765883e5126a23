//! A-priori choice of the number of subintervals from a bound on |f''|.
//!
//! For the midpoint and trapezoid rules |R_n| <= L^3 M2 / (k n^2) with L = b - a,
//! M2 = max |f''| on [a, b] and k = 24 (midpoint) or k = 12 (trapezoid), so the
//! smallest n guaranteeing |R_n| <= eps is n = ceil( sqrt( L^3 M2 / (k eps) ) ).
//! The guarantee holds only as long as the supplied M2 really bounds |f''|.
use crate::numerical::Quadrature::fixed_rules::QuadRule;
use crate::numerical::Quadrature::quad_error::QuadratureError;
use log::info;

/// n = max(1, ceil(sqrt(width^3 * m2 / (k * eps))))
pub fn required_subdivisions(width: f64, m2: f64, eps: f64, k: f64) -> i64 {
    let n = (width.powi(3) * m2 / (k * eps)).sqrt().ceil();
    if n.is_finite() && n >= 1.0 {
        // `as` saturates for values beyond i64::MAX
        n as i64
    } else if n.is_infinite() {
        i64::MAX
    } else {
        1
    }
}

/// theoretical bound width^3 * m2 / (k * n^2) reached with n subintervals
pub fn guaranteed_error(width: f64, m2: f64, k: f64, n: i64) -> f64 {
    if n <= 0 {
        return f64::INFINITY;
    }
    let n = n as f64;
    width.powi(3) * m2 / (k * n * n)
}

/// max |f''| sampled on a uniform grid of `samples` + 1 points.
/// A cheap cross-check of a hand-derived M2, not a rigorous bound.
pub fn sample_second_derivative_bound<D>(second_derivative: D, a: f64, b: f64, samples: usize) -> f64
where
    D: Fn(f64) -> f64,
{
    let samples = samples.max(1);
    let h = (b - a) / samples as f64;
    (0..=samples)
        .map(|i| second_derivative(a + i as f64 * h).abs())
        .fold(0.0, f64::max)
}

/// Subdivision plan for one rule
#[derive(Debug, Clone, PartialEq)]
pub struct SubdivisionPlan {
    pub rule: QuadRule,
    pub subdivisions: i64,
    pub step: f64,
    /// a-priori bound on |error| for the chosen n
    pub error_bound: f64,
}

/// Planner holding the (precomputed) bound M2 = max |f''(x)| over the interval
#[derive(Debug, Clone)]
pub struct ErrorBoundPlanner {
    m2: f64,
}

impl ErrorBoundPlanner {
    pub fn new(m2: f64) -> Result<Self, QuadratureError> {
        if !m2.is_finite() || m2 < 0.0 {
            return Err(QuadratureError::InvalidDerivativeBound(m2));
        }
        Ok(Self { m2 })
    }

    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// minimum n for an explicit method constant k
    pub fn subdivisions(&self, a: f64, b: f64, eps: f64, k: f64) -> i64 {
        required_subdivisions(b - a, self.m2, eps, k)
    }

    /// Plan the number of subintervals for `rule` on [a, b] with target accuracy eps
    pub fn plan(&self, rule: QuadRule, a: f64, b: f64, eps: f64) -> Result<SubdivisionPlan, QuadratureError> {
        if !(a.is_finite() && b.is_finite() && a < b) {
            return Err(QuadratureError::InvalidInterval { lower: a, upper: b });
        }
        if !(eps.is_finite() && eps > 0.0) {
            return Err(QuadratureError::InvalidTolerance(eps));
        }
        let k = rule
            .error_bound_constant()
            .ok_or(QuadratureError::NoDerivativeBound(rule))?;
        let width = b - a;
        let subdivisions = required_subdivisions(width, self.m2, eps, k);
        let plan = SubdivisionPlan {
            rule,
            subdivisions,
            step: width / subdivisions as f64,
            error_bound: guaranteed_error(width, self.m2, k, subdivisions),
        };
        info!(
            "{}: M2 = {}, k = {}, n = {}, h = {}, bound = {:.3e}",
            rule, self.m2, k, plan.subdivisions, plan.step, plan.error_bound
        );
        Ok(plan)
    }
}
