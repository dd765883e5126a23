use crate::numerical::Quadrature::fixed_rules::QuadRule;
use std::fmt;

/// Error types for quadrature tasks.
/// Numerical degeneracies (n <= 0, non-convergence) are not errors: the rules return 0.0
/// and the adaptive driver returns an unverified result instead.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// lower bound must be strictly below the upper bound, both finite
    InvalidInterval { lower: f64, upper: f64 },
    InvalidTolerance(f64),
    InvalidDerivativeBound(f64),
    /// rule has no a-priori error bound in terms of max|f''|
    NoDerivativeBound(QuadRule),
    TaskParse(String),
    InvalidTaskValue { section: String, key: String },
    UnknownLogLevel(String),
    Io(String),
}

impl fmt::Display for QuadratureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadratureError::InvalidInterval { lower, upper } => {
                write!(f, "Invalid interval [{}, {}]: lower bound must be below upper bound", lower, upper)
            }
            QuadratureError::InvalidTolerance(eps) => {
                write!(f, "Tolerance must be positive and finite, got {}", eps)
            }
            QuadratureError::InvalidDerivativeBound(m2) => {
                write!(f, "Second derivative bound must be non-negative and finite, got {}", m2)
            }
            QuadratureError::NoDerivativeBound(rule) => {
                write!(f, "{} has no error bound in terms of the second derivative", rule)
            }
            QuadratureError::TaskParse(msg) => write!(f, "Failed to parse task: {}", msg),
            QuadratureError::InvalidTaskValue { section, key } => {
                write!(f, "Invalid value for key '{}' in section '{}'", key, section)
            }
            QuadratureError::UnknownLogLevel(level) => {
                write!(f, "loglevel must be debug, info, warn, error or off, got '{}'", level)
            }
            QuadratureError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for QuadratureError {}

impl From<std::io::Error> for QuadratureError {
    fn from(err: std::io::Error) -> Self {
        QuadratureError::Io(err.to_string())
    }
}

impl From<csv::Error> for QuadratureError {
    fn from(err: csv::Error) -> Self {
        QuadratureError::Io(err.to_string())
    }
}
