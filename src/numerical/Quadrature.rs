//! Quadrature of a fixed one dimensional integrand.
//!
//! Fixed formulas (midpoint, trapezoid, Simpson), the a-priori choice of n from a bound
//! on |f''|, and an adaptive driver doubling n until Runge's error estimate is small
//! enough, with the final value refined by Richardson extrapolation.
/// midpoint, trapezoid and Simpson rules, and the formula capability used by the driver
pub mod fixed_rules;
/// Integrand trait, the lab integrand (x+3)/(x^2+4), evaluation counter
pub mod integrand;
/// n from (b-a), M2 = max|f''| and the target accuracy
pub mod error_bound;
/// step doubling with Runge's rule and Richardson extrapolation
pub mod runge_driver;
pub mod quad_error;
/// task parameters with defaults of the lab problem; task documents
pub mod quad_task;
/// comparison of the four strategies against the exact value
pub mod quad_report;
#[cfg(test)]
mod quadrature_tests;
