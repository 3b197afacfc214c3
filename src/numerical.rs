// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
/// error type shared by both integrators
pub mod integration_error;
/// COMPOSITE NEWTON-COTES RULES FOR SAMPLED DATA
/// Example#1
/// ```
/// use RustedQuad::numerical::newton_cotes::{integrate_newton, integrate_newton_by_name, NewtonCotesMethod};
/// // samples of f(x) = 2x + 1 on [0, 1]
/// let x: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
/// let f: Vec<f64> = x.iter().map(|x| 2.0 * x + 1.0).collect();
/// let res = integrate_newton(&x, &f, NewtonCotesMethod::Trapezoidal).unwrap();
/// assert!((res - 2.0).abs() < 1e-10);
/// // the rule may also be chosen by name, e.g. when it comes from a task file
/// let res = integrate_newton_by_name(&x, &f, " Trap ").unwrap();
/// assert!((res - 2.0).abs() < 1e-10);
/// // Simpson's rule needs an odd number of samples
/// assert!(integrate_newton(&x, &f, NewtonCotesMethod::Simpson).is_err());
/// ```
pub mod newton_cotes;
/// FIXED ORDER GAUSS-LEGENDRE QUADRATURE
/// Example#1
/// ```
/// use RustedQuad::numerical::gauss_legendre::{integrate_gauss, Bounds, GaussLegendreRule};
/// let f = |x: f64| x.powi(4) - 3.0 * x.powi(3) + 2.0 * x.powi(2) - x + 1.0;
/// // 3 points are exact up to degree 5
/// let res = integrate_gauss(&f, (0.0, 2.0), 3).unwrap();
/// let expected = 32.0 / 5.0 - 12.0 + 16.0 / 3.0 - 2.0 + 2.0;
/// assert!((res - expected).abs() < 1e-10);
/// // limits from a list are checked for length
/// let bounds = Bounds::try_from(&[2.0, 0.0][..]).unwrap();
/// let rule = GaussLegendreRule::new(3).unwrap();
/// assert!((rule.integrate(&f, bounds) + expected).abs() < 1e-10);
/// ```
pub mod gauss_legendre;

mod integration_tests;
