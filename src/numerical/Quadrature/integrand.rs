//! Integrands: the trait every quadrature rule evaluates, a closure wrapper, the
//! fixed rational integrand of the lab problem and a wrapper counting evaluations.
use std::cell::Cell;

/// Trait for representing a real function of one variable to be integrated
pub trait Integrand {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Get function name for reporting/logging
    fn name(&self) -> &str {
        "unnamed_integrand"
    }
}

impl<T: Integrand + ?Sized> Integrand for &T {
    fn evaluate(&self, x: f64) -> f64 {
        (**self).evaluate(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Simple integrand wrapper for closures
pub struct ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: &str) -> Self {
        Self {
            func,
            name: name.to_string(),
        }
    }
}

impl<F> Integrand for ClosureIntegrand<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

////////////////////////////////LAB INTEGRAND//////////////////////////////////////////
/// f(x) = (x + 3) / (x^2 + 4)
///
/// Antiderivative F(x) = ln(x^2 + 4)/2 + 3/2 * arctan(x/2), so on [0, 2] the exact
/// value is ln(2)/2 + 3π/8.
#[derive(Debug, Clone, Copy, Default)]
pub struct RationalIntegrand;

impl RationalIntegrand {
    pub fn new() -> Self {
        RationalIntegrand
    }

    /// f''(x) = 2 (x^3 + 9x^2 - 12x - 12) / (x^2 + 4)^3, precomputed by hand
    pub fn second_derivative(&self, x: f64) -> f64 {
        let num = 2.0 * (x * x * x + 9.0 * x * x - 12.0 * x - 12.0);
        let den_base = x * x + 4.0;
        num / (den_base * den_base * den_base)
    }

    pub fn antiderivative(&self, x: f64) -> f64 {
        0.5 * (x * x + 4.0).ln() + 1.5 * (x / 2.0).atan()
    }

    /// Newton-Leibniz value F(b) - F(a)
    pub fn exact_integral(&self, a: f64, b: f64) -> f64 {
        self.antiderivative(b) - self.antiderivative(a)
    }

    pub fn formula(&self) -> &'static str {
        "f(x) = (x+3) / (x^2+4)"
    }
}

impl Integrand for RationalIntegrand {
    fn evaluate(&self, x: f64) -> f64 {
        (x + 3.0) / (x * x + 4.0)
    }

    fn name(&self) -> &str {
        "(x+3)/(x^2+4)"
    }
}

////////////////////////////////EVALUATION COUNTER//////////////////////////////////////
/// Wraps an integrand and counts how many times it was evaluated.
/// Used by the report to compare methods by cost, not only by accuracy.
pub struct CountingIntegrand<I: Integrand> {
    inner: I,
    calls: Cell<usize>,
}

impl<I: Integrand> CountingIntegrand<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl<I: Integrand> Integrand for CountingIntegrand<I> {
    fn evaluate(&self, x: f64) -> f64 {
        self.calls.set(self.calls.get() + 1);
        self.inner.evaluate(x)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
