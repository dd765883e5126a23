//! Step doubling with Runge's error estimate and Richardson extrapolation.
//!
//! With I_h the result on n subintervals and I_2h the result on n/2 subintervals,
//! a rule of order p has error R_h ~ (I_h - I_2h) / (2^p - 1). The driver doubles n
//! until |R_h| < eps and returns the refined value I_h + R_h.
//!
//! For fourth order rules the estimate is only trusted once n reaches a
//! reliability floor (8 subintervals by default): at smaller n the leading error
//! term does not dominate yet and the estimate can be accidentally small.
//!
//! Example
//! ```
//! use RustedQuad::numerical::Quadrature::fixed_rules::QuadRule;
//! use RustedQuad::numerical::Quadrature::integrand::RationalIntegrand;
//! use RustedQuad::numerical::Quadrature::runge_driver::adaptive_integrate;
//! let f = RationalIntegrand::new();
//! let outcome = adaptive_integrate(&QuadRule::Simpson.bind(&f), 0.0, 2.0, 1e-4, 4);
//! assert!(outcome.is_converged());
//! assert!((outcome.value() - f.exact_integral(0.0, 2.0)).abs() < 1e-4);
//! ```
use crate::numerical::Quadrature::fixed_rules::QuadratureFormula;
use log::{info, warn};

pub const DEFAULT_MAX_ITERATIONS: usize = 2000;
pub const DEFAULT_MAX_SUBDIVISIONS: i64 = 4_000_000;
pub const DEFAULT_INITIAL_SUBDIVISIONS: i64 = 2;
/// smallest n at which Runge's estimate is trusted for rules of order >= 4
pub const HIGH_ORDER_RELIABILITY_FLOOR: i64 = 8;

/// Value of an integral approximation and the number of subintervals it used
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureResult {
    pub value: f64,
    pub subdivisions: i64,
}

/// Final answer of the driver.
/// `Unverified` carries the best Richardson estimate available when the iteration or
/// subdivision budget ran out before the error estimate dropped below tolerance.
#[derive(Debug, Clone, PartialEq)]
pub enum RungeOutcome {
    Converged(QuadratureResult),
    Unverified {
        result: QuadratureResult,
        error_estimate: f64,
        iterations: usize,
    },
}

impl RungeOutcome {
    pub fn result(&self) -> QuadratureResult {
        match self {
            RungeOutcome::Converged(result) => *result,
            RungeOutcome::Unverified { result, .. } => *result,
        }
    }

    pub fn value(&self) -> f64 {
        self.result().value
    }

    pub fn subdivisions(&self) -> i64 {
        self.result().subdivisions
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, RungeOutcome::Converged(_))
    }
}

/// Configuration for the adaptive driver
#[derive(Debug, Clone)]
pub struct RungeConfig {
    pub tolerance: f64,
    /// order of accuracy p of the formula being refined
    pub order: u32,
    pub initial_subdivisions: i64,
    pub max_iterations: usize,
    pub max_subdivisions: i64,
    /// None: 8 for p >= 4, no floor otherwise
    pub reliability_floor: Option<i64>,
}

impl Default for RungeConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-4,
            order: 2,
            initial_subdivisions: DEFAULT_INITIAL_SUBDIVISIONS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
            reliability_floor: None,
        }
    }
}

impl RungeConfig {
    pub fn new(tolerance: f64, order: u32) -> Self {
        Self {
            tolerance,
            order,
            ..Self::default()
        }
    }

    pub fn with_initial_subdivisions(mut self, n: i64) -> Self {
        self.initial_subdivisions = n;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_subdivisions(mut self, max_subdivisions: i64) -> Self {
        self.max_subdivisions = max_subdivisions;
        self
    }

    pub fn with_reliability_floor(mut self, floor: i64) -> Self {
        self.reliability_floor = Some(floor);
        self
    }

    /// 2^p - 1
    pub fn runge_denominator(&self) -> f64 {
        2.0_f64.powi(self.order as i32) - 1.0
    }

    pub fn effective_reliability_floor(&self) -> i64 {
        match self.reliability_floor {
            Some(floor) => floor,
            None if self.order >= 4 => HIGH_ORDER_RELIABILITY_FLOOR,
            None => 1,
        }
    }

    /// initial n, made even for fourth order (Simpson) formulas
    pub fn starting_subdivisions(&self) -> i64 {
        let n = self.initial_subdivisions.max(1);
        if self.order == 4 && n % 2 != 0 { n + 1 } else { n }
    }
}

/// Loop accumulators of the driver, threaded through every transition
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceState {
    /// I_h
    pub current_estimate: f64,
    /// I_2h
    pub previous_estimate: f64,
    pub current_n: i64,
    pub iteration_count: usize,
    /// |I_h - I_2h| / (2^p - 1), infinite before the first doubling
    pub error_estimate: f64,
}

/// Result of one transition of the driver
#[derive(Debug, Clone, PartialEq)]
pub enum RungeStep {
    Iterating(ConvergenceState),
    Converged(QuadratureResult),
    ExhaustedBudget(ConvergenceState),
}

/// Adaptive step-doubling integrator
#[derive(Debug, Clone)]
pub struct AdaptiveRungeDriver {
    config: RungeConfig,
}

impl AdaptiveRungeDriver {
    pub fn new(config: RungeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RungeConfig {
        &self.config
    }

    /// Initializing: first estimate on the starting grid
    pub fn initialize<Q>(&self, formula: &Q, a: f64, b: f64) -> ConvergenceState
    where
        Q: QuadratureFormula + ?Sized,
    {
        let n = self.config.starting_subdivisions();
        let estimate = formula.evaluate(a, b, n);
        ConvergenceState {
            current_estimate: estimate,
            previous_estimate: estimate,
            current_n: n,
            iteration_count: 0,
            error_estimate: f64::INFINITY,
        }
    }

    /// I_h + (I_h - I_2h) / (2^p - 1)
    pub fn richardson(&self, state: &ConvergenceState) -> f64 {
        state.current_estimate
            + (state.current_estimate - state.previous_estimate) / self.config.runge_denominator()
    }

    /// One iteration: halve the step, estimate the error, decide
    pub fn advance<Q>(&self, formula: &Q, a: f64, b: f64, state: ConvergenceState) -> RungeStep
    where
        Q: QuadratureFormula + ?Sized,
    {
        let previous_estimate = state.current_estimate;
        let current_n = state.current_n.saturating_mul(2);
        let current_estimate = formula.evaluate(a, b, current_n);
        let error_estimate =
            (current_estimate - previous_estimate).abs() / self.config.runge_denominator();

        let mut next = ConvergenceState {
            current_estimate,
            previous_estimate,
            current_n,
            iteration_count: state.iteration_count,
            error_estimate,
        };
        info!(
            "iteration = {}, n = {}, I_h = {:.10}, error estimate = {:.3e}",
            next.iteration_count + 1,
            current_n,
            current_estimate,
            error_estimate
        );

        let trusted = current_n >= self.config.effective_reliability_floor();
        if error_estimate < self.config.tolerance && trusted {
            return RungeStep::Converged(QuadratureResult {
                value: self.richardson(&next),
                subdivisions: current_n,
            });
        }

        next.iteration_count += 1;
        if current_n > self.config.max_subdivisions
            || next.iteration_count >= self.config.max_iterations
        {
            return RungeStep::ExhaustedBudget(next);
        }
        RungeStep::Iterating(next)
    }

    /// Run the state machine to completion
    pub fn integrate<Q>(&self, formula: &Q, a: f64, b: f64) -> RungeOutcome
    where
        Q: QuadratureFormula + ?Sized,
    {
        let mut state = self.initialize(formula, a, b);
        loop {
            match self.advance(formula, a, b, state) {
                RungeStep::Iterating(next) => state = next,
                RungeStep::Converged(result) => {
                    info!(
                        "Runge rule converged: n = {}, refined value = {:.10}",
                        result.subdivisions, result.value
                    );
                    return RungeOutcome::Converged(result);
                }
                RungeStep::ExhaustedBudget(last) => {
                    warn!(
                        "Runge rule did not reach eps = {} after {} iterations (n = {}), last error estimate {:.3e}; accuracy is not guaranteed",
                        self.config.tolerance, last.iteration_count, last.current_n, last.error_estimate
                    );
                    return RungeOutcome::Unverified {
                        result: QuadratureResult {
                            value: self.richardson(&last),
                            subdivisions: last.current_n,
                        },
                        error_estimate: last.error_estimate,
                        iterations: last.iteration_count,
                    };
                }
            }
        }
    }
}

/// Refine `formula` of order `p` on [a, b] until Runge's estimate drops below `eps`
pub fn adaptive_integrate<Q>(formula: &Q, a: f64, b: f64, eps: f64, p: u32) -> RungeOutcome
where
    Q: QuadratureFormula + ?Sized,
{
    AdaptiveRungeDriver::new(RungeConfig::new(eps, p)).integrate(formula, a, b)
}
