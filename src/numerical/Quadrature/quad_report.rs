//! Comparison of the four strategies against the exact integral:
//! midpoint and trapezoid rules with n chosen from M2, trapezoid and Simpson rules
//! refined by the Runge driver. Each row records n, value, absolute error and how
//! many integrand evaluations the strategy spent.
use crate::Utils::logger::save_rows_to_csv;
use crate::numerical::Quadrature::error_bound::{ErrorBoundPlanner, sample_second_derivative_bound};
use crate::numerical::Quadrature::fixed_rules::QuadRule;
use crate::numerical::Quadrature::integrand::{CountingIntegrand, Integrand, RationalIntegrand};
use crate::numerical::Quadrature::quad_error::QuadratureError;
use crate::numerical::Quadrature::quad_task::QuadratureTask;
use crate::numerical::Quadrature::runge_driver::{AdaptiveRungeDriver, RungeConfig, RungeOutcome};
use log::{info, warn};
use std::fmt;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tabled::{builder::Builder, settings::Style};

const M2_SAMPLES: usize = 10_000;
/// hand-derived M2 values are rounded; only flag a supplied bound clearly below the sampled one
const M2_RELATIVE_SLACK: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ReportMethod {
    MidpointM2,
    TrapezoidM2,
    TrapezoidRunge,
    SimpsonRunge,
}

impl ReportMethod {
    pub fn rule(&self) -> QuadRule {
        match self {
            ReportMethod::MidpointM2 => QuadRule::Midpoint,
            ReportMethod::TrapezoidM2 | ReportMethod::TrapezoidRunge => QuadRule::Trapezoid,
            ReportMethod::SimpsonRunge => QuadRule::Simpson,
        }
    }

    pub fn is_adaptive(&self) -> bool {
        matches!(self, ReportMethod::TrapezoidRunge | ReportMethod::SimpsonRunge)
    }
}

impl fmt::Display for ReportMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportMethod::MidpointM2 => write!(f, "Central rectangles (M2)"),
            ReportMethod::TrapezoidM2 => write!(f, "Trapezoid (M2)"),
            ReportMethod::TrapezoidRunge => write!(f, "Trapezoid (Runge)"),
            ReportMethod::SimpsonRunge => write!(f, "Simpson (Runge)"),
        }
    }
}

/// How the accuracy of a row is backed
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// theoretical bound from M2, valid if M2 really bounds |f''|
    APriori { error_bound: f64 },
    RungeConverged,
    /// budget exhausted, accuracy not guaranteed
    RungeUnverified { error_estimate: f64 },
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verification::APriori { error_bound } => write!(f, "bound {:.3e}", error_bound),
            Verification::RungeConverged => write!(f, "Runge converged"),
            Verification::RungeUnverified { error_estimate } => {
                write!(f, "UNVERIFIED {:.3e}", error_estimate)
            }
        }
    }
}

/// One row of the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSummary {
    pub method: ReportMethod,
    pub subdivisions: i64,
    pub step: f64,
    pub value: f64,
    pub abs_error: f64,
    pub evaluations: usize,
    pub verification: Verification,
}

#[derive(Debug, Clone)]
pub struct QuadratureReport {
    pub task: QuadratureTask,
    pub integrand_name: String,
    pub exact_value: f64,
    /// max |f''| found by sampling, if the second derivative was available
    pub sampled_m2: Option<f64>,
    pub rows: Vec<MethodSummary>,
}

impl QuadratureReport {
    /// Run all four strategies on `f` over the task interval
    pub fn build<I: Integrand>(
        task: &QuadratureTask,
        f: &I,
        exact_value: f64,
    ) -> Result<Self, QuadratureError> {
        task.validate()?;
        let planner = ErrorBoundPlanner::new(task.m2)?;
        let counter = CountingIntegrand::new(f);
        let mut rows = Vec::new();
        for method in ReportMethod::iter() {
            counter.reset();
            let rule = method.rule();
            let (subdivisions, value, verification) = if method.is_adaptive() {
                let config = RungeConfig::new(task.tolerance, rule.order());
                let driver = AdaptiveRungeDriver::new(config);
                let outcome = driver.integrate(&rule.bind(&counter), task.lower, task.upper);
                let verification = match &outcome {
                    RungeOutcome::Converged(_) => Verification::RungeConverged,
                    RungeOutcome::Unverified { error_estimate, .. } => {
                        Verification::RungeUnverified {
                            error_estimate: *error_estimate,
                        }
                    }
                };
                (outcome.subdivisions(), outcome.value(), verification)
            } else {
                let plan = planner.plan(rule, task.lower, task.upper, task.tolerance)?;
                let value = rule.integrate(&counter, task.lower, task.upper, plan.subdivisions);
                (
                    plan.subdivisions,
                    value,
                    Verification::APriori {
                        error_bound: plan.error_bound,
                    },
                )
            };
            let summary = MethodSummary {
                method,
                subdivisions,
                step: task.width() / subdivisions as f64,
                value,
                abs_error: (value - exact_value).abs(),
                evaluations: counter.calls(),
                verification,
            };
            info!(
                "{}: n = {}, result = {:.10}, abs. error = {:.3e}, evaluations = {}",
                method, summary.subdivisions, summary.value, summary.abs_error, summary.evaluations
            );
            rows.push(summary);
        }
        Ok(Self {
            task: task.clone(),
            integrand_name: f.name().to_string(),
            exact_value,
            sampled_m2: None,
            rows,
        })
    }

    /// The fixed problem: (x+3)/(x^2+4), exact value from the antiderivative,
    /// supplied M2 cross-checked by sampling the closed-form f''
    pub fn lab(task: &QuadratureTask) -> Result<Self, QuadratureError> {
        let f = RationalIntegrand::new();
        let exact_value = f.exact_integral(task.lower, task.upper);
        let mut report = Self::build(task, &f, exact_value)?;
        let sampled = sample_second_derivative_bound(
            |x| f.second_derivative(x),
            task.lower,
            task.upper,
            M2_SAMPLES,
        );
        info!("supplied M2 = {}, sampled max|f''| = {:.6}", task.m2, sampled);
        report.sampled_m2 = Some(sampled);
        Ok(report)
    }

    pub fn row(&self, method: ReportMethod) -> Option<&MethodSummary> {
        self.rows.iter().find(|row| row.method == method)
    }

    fn headers() -> [&'static str; 7] {
        ["Method", "N", "h", "Result", "Abs. error", "f evals", "Accuracy"]
    }

    fn row_cells(row: &MethodSummary) -> Vec<String> {
        vec![
            row.method.to_string(),
            row.subdivisions.to_string(),
            format!("{:.6}", row.step),
            format!("{:.10}", row.value),
            format!("{:.3e}", row.abs_error),
            row.evaluations.to_string(),
            row.verification.to_string(),
        ]
    }

    pub fn table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(Self::headers().iter().map(|h| h.to_string()).collect::<Vec<String>>());
        for row in &self.rows {
            builder.push_record(Self::row_cells(row));
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }

    /// one message per method whose actual error exceeds the target, plus M2 and
    /// convergence problems
    pub fn warnings(&self) -> Vec<String> {
        let eps = self.task.tolerance;
        let mut warnings = Vec::new();
        if let Some(sampled) = self.sampled_m2 {
            if self.task.m2 < sampled * (1.0 - M2_RELATIVE_SLACK) {
                warnings.push(format!(
                    "Supplied M2 = {} is below the sampled max|f''| = {:.6}: the a-priori bounds are not guaranteed",
                    self.task.m2, sampled
                ));
            }
        }
        for row in &self.rows {
            if let Verification::RungeUnverified { .. } = row.verification {
                warnings.push(format!("{}: Runge rule did not converge, accuracy is not guaranteed", row.method));
            }
            if row.abs_error > eps {
                warnings.push(format!(
                    "{}: abs. error {:.3e} > epsilon {}",
                    row.method, row.abs_error, eps
                ));
            }
        }
        warnings
    }

    pub fn all_accurate(&self) -> bool {
        self.rows.iter().all(|row| row.abs_error <= self.task.tolerance)
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), QuadratureError> {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.method.to_string(),
                    row.subdivisions.to_string(),
                    row.step.to_string(),
                    row.value.to_string(),
                    row.abs_error.to_string(),
                    row.evaluations.to_string(),
                    row.verification.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        save_rows_to_csv(&Self::headers(), &rows, path)?;
        info!("report saved");
        Ok(())
    }

    /// print the full report to stdout
    pub fn print(&self) {
        println!("Numerical integration methods");
        println!("Function: {}", self.integrand_name);
        println!("Interval: [{}, {}]", self.task.lower, self.task.upper);
        println!("Target accuracy epsilon = {}", self.task.tolerance);
        println!("Supplied max|f''| = M2 = {}", self.task.m2);
        if let Some(sampled) = self.sampled_m2 {
            println!("Sampled  max|f''|      = {:.6}", sampled);
        }
        println!("Exact value (Newton-Leibniz): {:.10}\n", self.exact_value);
        println!("{}\n", self.table());
        let warnings = self.warnings();
        for message in &warnings {
            warn!("{}", message);
            println!("Warning: {}", message);
        }
        if self.all_accurate() {
            println!("All methods reached the target accuracy epsilon = {}", self.task.tolerance);
        } else {
            println!("Not all methods reached the target accuracy epsilon = {}", self.task.tolerance);
        }
    }
}
