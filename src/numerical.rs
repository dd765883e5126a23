/// numerical integration of a function of one variable.
///  Example
/// ```
/// use RustedQuad::numerical::Quadrature::fixed_rules::{midpoint_rule, simpson_rule, trapezoid_rule};
/// use RustedQuad::numerical::Quadrature::integrand::RationalIntegrand;
/// let f = RationalIntegrand::new();
/// let exact = f.exact_integral(0.0, 2.0);
/// assert!((midpoint_rule(&f, 0.0, 2.0, 38) - exact).abs() < 1e-4);
/// assert!((trapezoid_rule(&f, 0.0, 2.0, 54) - exact).abs() < 1e-4);
/// assert!((simpson_rule(&f, 0.0, 2.0, 8) - exact).abs() < 1e-4);
/// ```
pub mod Quadrature;
