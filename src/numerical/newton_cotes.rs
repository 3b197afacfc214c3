// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Composite Newton-Cotes rules for discretely sampled data.
//!
//! `x` holds the sample locations and `f` the function values at those locations.
//! Trapezoidal rule works for any (also non-uniform) spacing. Simpson's rule is
//! applied on consecutive triplets `(2k, 2k+1, 2k+2)` so it needs an odd number of
//! samples; inside each triplet both sub-intervals are assumed to have the same
//! width. This is not checked: on non-uniform grids the result is an approximation
//! and not the exact composite Simpson value.
use crate::numerical::integration_error::{IntegrationError, IntegrationResult};
use itertools::Itertools;
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// Enum to represent the Newton-Cotes rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum NewtonCotesMethod {
    #[default]
    #[strum(serialize = "trap")]
    Trapezoidal,
    #[strum(serialize = "simp")]
    Simpson,
}

impl FromStr for NewtonCotesMethod {
    type Err = IntegrationError;
    /// case-insensitive, leading and trailing whitespace is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trap" => Ok(NewtonCotesMethod::Trapezoidal),
            "simp" => Ok(NewtonCotesMethod::Simpson),
            _ => Err(IntegrationError::InvalidAlgorithm(s.to_string())),
        }
    }
}

impl NewtonCotesMethod {
    pub fn description(&self) -> &'static str {
        match self {
            NewtonCotesMethod::Trapezoidal => "Trapezoidal Rule",
            NewtonCotesMethod::Simpson => "Simpson's Rule",
        }
    }
}

/// Integrate sampled data `(x, f)` with the chosen Newton-Cotes rule
/// # Example
/// ```
/// use RustedQuad::numerical::newton_cotes::{integrate_newton, NewtonCotesMethod};
/// let x: Vec<f64> = (0..11).map(|i| i as f64 / 10.0).collect();
/// let f: Vec<f64> = x.iter().map(|x| x * x).collect();
/// let res = integrate_newton(&x, &f, NewtonCotesMethod::Simpson).unwrap();
/// assert!((res - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn integrate_newton(x: &[f64], f: &[f64], method: NewtonCotesMethod) -> IntegrationResult<f64> {
    if x.len() != f.len() {
        return Err(IntegrationError::ShapeMismatch {
            x_len: x.len(),
            f_len: f.len(),
        });
    }
    match method {
        NewtonCotesMethod::Trapezoidal => Ok(trapezoid(x, f)),
        NewtonCotesMethod::Simpson => {
            if x.len() % 2 == 0 {
                return Err(IntegrationError::EvenSampleCount(x.len()));
            }
            // a single sample has no Simpson panel, fall back to the trapezoidal formula
            if x.len() < 3 {
                Ok(trapezoid(x, f))
            } else {
                Ok(simpson(x, f))
            }
        }
    }
}

/// same as [`integrate_newton`] but the rule is given by name ("trap" or "simp")
pub fn integrate_newton_by_name(x: &[f64], f: &[f64], algorithm: &str) -> IntegrationResult<f64> {
    if x.len() != f.len() {
        return Err(IntegrationError::ShapeMismatch {
            x_len: x.len(),
            f_len: f.len(),
        });
    }
    let method = NewtonCotesMethod::from_str(algorithm)?;
    integrate_newton(x, f, method)
}

fn trapezoid(x: &[f64], f: &[f64]) -> f64 {
    x.iter()
        .zip(f.iter())
        .tuple_windows()
        .map(|((x0, f0), (x1, f1))| 0.5 * (x1 - x0) * (f0 + f1))
        .sum()
}

fn simpson(x: &[f64], f: &[f64]) -> f64 {
    (0..x.len() - 2)
        .step_by(2)
        .map(|i| (x[i + 2] - x[i]) * (f[i] + 4.0 * f[i + 1] + f[i + 2]) / 6.0)
        .sum()
}
