//! Composite Newton-Cotes rules on a uniform grid of n subintervals.
//!
//! | rule      | nodes used | order p | a-priori bound                 |
//! |-----------|------------|---------|--------------------------------|
//! | midpoint  | n          | 2       | (b-a)^3 M2 / (24 n^2)          |
//! | trapezoid | n + 1      | 2       | (b-a)^3 M2 / (12 n^2)          |
//! | Simpson   | n + 1      | 4       | (b-a)^5 M4 / (180 n^4)         |
//!
//! All rules return 0.0 for n <= 0 and for a zero-width interval.
use crate::numerical::Quadrature::integrand::Integrand;
use std::fmt;
use strum_macros::EnumIter;

/// Midpoint (central rectangles) rule: h * sum f(a + (i + 1/2) h), i in [0, n)
pub fn midpoint_rule<I: Integrand + ?Sized>(f: &I, a: f64, b: f64, n: i64) -> f64 {
    if n <= 0 {
        return 0.0;
    }
    let h = (b - a) / n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        sum += f.evaluate(a + (i as f64 + 0.5) * h);
    }
    h * sum
}

/// Trapezoidal rule: h * [ (f(a) + f(b))/2 + sum_{i=1}^{n-1} f(a + i h) ]
pub fn trapezoid_rule<I: Integrand + ?Sized>(f: &I, a: f64, b: f64, n: i64) -> f64 {
    if n <= 0 {
        return 0.0;
    }
    let h = (b - a) / n as f64;
    let mut sum = (f.evaluate(a) + f.evaluate(b)) / 2.0;
    for i in 1..n {
        sum += f.evaluate(a + i as f64 * h);
    }
    h * sum
}

/// Simpson's rule: (h/3) * [ f(a) + f(b) + 4 sum_odd f(x_i) + 2 sum_even f(x_i) ]
/// odd n is rounded up to the next even number
pub fn simpson_rule<I: Integrand + ?Sized>(f: &I, a: f64, b: f64, n: i64) -> f64 {
    if n <= 0 {
        return 0.0;
    }
    let n = simpson_subdivisions(n);
    let h = (b - a) / n as f64;
    let mut sum = f.evaluate(a) + f.evaluate(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        if i % 2 == 1 {
            sum += 4.0 * f.evaluate(x);
        } else {
            sum += 2.0 * f.evaluate(x);
        }
    }
    (h / 3.0) * sum
}

/// number of subintervals Simpson's rule actually uses for a requested n
pub fn simpson_subdivisions(n: i64) -> i64 {
    if n % 2 != 0 { n + 1 } else { n }
}

/// Enum to represent the fixed quadrature formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum QuadRule {
    Midpoint,
    Trapezoid,
    Simpson,
}

impl QuadRule {
    /// order of accuracy p: error ~ h^p
    pub fn order(&self) -> u32 {
        match self {
            QuadRule::Midpoint => 2,
            QuadRule::Trapezoid => 2,
            QuadRule::Simpson => 4,
        }
    }

    /// k in |R_n| <= (b-a)^3 M2 / (k n^2); Simpson's bound needs M4 instead
    pub fn error_bound_constant(&self) -> Option<f64> {
        match self {
            QuadRule::Midpoint => Some(24.0),
            QuadRule::Trapezoid => Some(12.0),
            QuadRule::Simpson => None,
        }
    }

    /// integrand evaluations performed by one call with n subintervals
    pub fn evaluations(&self, n: i64) -> usize {
        if n <= 0 {
            return 0;
        }
        match self {
            QuadRule::Midpoint => n as usize,
            QuadRule::Trapezoid => n as usize + 1,
            QuadRule::Simpson => simpson_subdivisions(n) as usize + 1,
        }
    }

    pub fn integrate<I: Integrand + ?Sized>(&self, f: &I, a: f64, b: f64, n: i64) -> f64 {
        match self {
            QuadRule::Midpoint => midpoint_rule(f, a, b, n),
            QuadRule::Trapezoid => trapezoid_rule(f, a, b, n),
            QuadRule::Simpson => simpson_rule(f, a, b, n),
        }
    }

    /// attach an integrand, producing a formula the adaptive driver can call
    pub fn bind<I: Integrand>(self, f: &I) -> BoundRule<'_, I> {
        BoundRule { rule: self, f }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuadRule::Midpoint => "central rectangles, second order",
            QuadRule::Trapezoid => "trapezoids, second order",
            QuadRule::Simpson => "parabolas on pairs of subintervals, fourth order",
        }
    }
}

impl fmt::Display for QuadRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadRule::Midpoint => write!(f, "Midpoint rule"),
            QuadRule::Trapezoid => write!(f, "Trapezoid rule"),
            QuadRule::Simpson => write!(f, "Simpson rule"),
        }
    }
}

//////////////////////////////////TRAITS AND IMPLEMENTATIONS/////////////////////////////////
/// Anything mapping (a, b, n) to an approximation of the integral over [a, b].
/// The adaptive driver only depends on this capability.
pub trait QuadratureFormula {
    fn evaluate(&self, a: f64, b: f64, n: i64) -> f64;
}

impl<F> QuadratureFormula for F
where
    F: Fn(f64, f64, i64) -> f64,
{
    fn evaluate(&self, a: f64, b: f64, n: i64) -> f64 {
        self(a, b, n)
    }
}

/// A quadrature rule together with the integrand it is applied to
pub struct BoundRule<'a, I: Integrand> {
    rule: QuadRule,
    f: &'a I,
}

impl<'a, I: Integrand> BoundRule<'a, I> {
    pub fn rule(&self) -> QuadRule {
        self.rule
    }
}

impl<'a, I: Integrand> QuadratureFormula for BoundRule<'a, I> {
    fn evaluate(&self, a: f64, b: f64, n: i64) -> f64 {
        self.rule.integrate(self.f, a, b, n)
    }
}
