// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use std::fmt;

/// Error types for Newton-Cotes and Gauss-Legendre integration
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationError {
    /// sample locations and sample values have different lengths
    ShapeMismatch { x_len: usize, f_len: usize },
    /// algorithm selector is neither "trap" nor "simp"
    InvalidAlgorithm(String),
    /// composite Simpson's rule got an even number of samples
    EvenSampleCount(usize),
    /// bounds must contain exactly two numbers
    InvalidBounds(usize),
    /// Gauss-Legendre order outside of 1..=5
    InvalidOrder(usize),
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IntegrationError::ShapeMismatch { x_len, f_len } => write!(
                f,
                "x and f must have the same length, got {} and {}",
                x_len, f_len
            ),
            IntegrationError::InvalidAlgorithm(alg) => write!(
                f,
                "algorithm '{}' is invalid, only 'trap' or 'simp' are accepted",
                alg
            ),
            IntegrationError::EvenSampleCount(n) => write!(
                f,
                "there is an even number of points ({}), Simpson's rule requires an odd number of points",
                n
            ),
            IntegrationError::InvalidBounds(n) => {
                write!(f, "bounds must have exactly 2 elements, got {}", n)
            }
            IntegrationError::InvalidOrder(n) => {
                write!(f, "npts must be one of [1, 2, 3, 4, 5], got {}", n)
            }
        }
    }
}

impl std::error::Error for IntegrationError {}

pub type IntegrationResult<T> = Result<T, IntegrationError>;
