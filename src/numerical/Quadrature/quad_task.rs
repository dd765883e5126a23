use crate::Utils::logger::parse_loglevel;
use crate::Utils::task_parser::{TaskDocument, get_boolean, get_float, get_string, parse_task_document};
use crate::numerical::Quadrature::quad_error::QuadratureError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// max |f''| of (x+3)/(x^2+4) on [0, 2], attained near x = 0.296137
pub const LAB_M2: f64 = 0.43156;

/// Parameters of one quadrature comparison
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureTask {
    pub lower: f64,
    pub upper: f64,
    /// target accuracy: used to plan n for the M2-based rules and as the Runge tolerance
    pub tolerance: f64,
    /// precomputed max |f''| over [lower, upper]
    pub m2: f64,
    pub loglevel: Option<String>,
    pub log_to_file: bool,
    /// write the comparison table to this csv file
    pub csv_output: Option<String>,
}

impl Default for QuadratureTask {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 2.0,
            tolerance: 1e-4,
            m2: LAB_M2,
            loglevel: Some("info".to_string()),
            log_to_file: false,
            csv_output: None,
        }
    }
}

impl QuadratureTask {
    pub fn new(lower: f64, upper: f64, tolerance: f64, m2: f64) -> Result<Self, QuadratureError> {
        let task = Self {
            lower,
            upper,
            tolerance,
            m2,
            ..Self::default()
        };
        task.validate()?;
        Ok(task)
    }

    pub fn validate(&self) -> Result<(), QuadratureError> {
        if !(self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper) {
            return Err(QuadratureError::InvalidInterval {
                lower: self.lower,
                upper: self.upper,
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(QuadratureError::InvalidTolerance(self.tolerance));
        }
        if !(self.m2.is_finite() && self.m2 >= 0.0) {
            return Err(QuadratureError::InvalidDerivativeBound(self.m2));
        }
        if let Some(level) = &self.loglevel {
            parse_loglevel(level)?;
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    fn template() -> HashMap<String, Vec<String>> {
        HashMap::from([
            ("interval".to_string(), vec!["a".to_string(), "b".to_string()]),
            ("accuracy".to_string(), vec!["epsilon".to_string(), "M2".to_string()]),
            (
                "output".to_string(),
                vec!["loglevel".to_string(), "log_to_file".to_string(), "csv".to_string()],
            ),
        ])
    }

    /// Build a task from a parsed document; absent keys keep the lab defaults
    pub fn from_document(doc: &TaskDocument) -> Result<Self, QuadratureError> {
        let mut task = Self::default();
        if let Some(a) = get_float(doc, "interval", "a")? {
            task.lower = a;
        }
        if let Some(b) = get_float(doc, "interval", "b")? {
            task.upper = b;
        }
        if let Some(eps) = get_float(doc, "accuracy", "epsilon")? {
            task.tolerance = eps;
        }
        if let Some(m2) = get_float(doc, "accuracy", "M2")? {
            task.m2 = m2;
        }
        if let Some(level) = get_string(doc, "output", "loglevel") {
            task.loglevel = Some(level);
        }
        if let Some(to_file) = get_boolean(doc, "output", "log_to_file")? {
            task.log_to_file = to_file;
        }
        task.csv_output = get_string(doc, "output", "csv");
        task.validate()?;
        Ok(task)
    }

    pub fn from_str_document(input: &str) -> Result<Self, QuadratureError> {
        let doc = parse_task_document(input, Some(&Self::template()))?;
        Self::from_document(&doc)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, QuadratureError> {
        let content = fs::read_to_string(path)?;
        Self::from_str_document(&content)
    }
}
