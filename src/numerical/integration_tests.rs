// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! cross-checks of both integrators: against gauss-quad, analytic antiderivatives
//! and each other
#[cfg(test)]
mod tests {
    use crate::numerical::gauss_legendre::{GaussLegendreRule, MAX_GAUSS_POINTS, integrate_gauss};
    use crate::numerical::integration_error::IntegrationError;
    use crate::numerical::newton_cotes::{NewtonCotesMethod, integrate_newton};
    use approx::assert_relative_eq;
    use gauss_quad::GaussLegendre;
    use rand::Rng;
    use strum::IntoEnumIterator;

    /// polynomial with coefficients c[0] + c[1] x + ... and its exact integral over [a, b]
    fn poly(coeffs: &[f64], x: f64) -> f64 {
        coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    fn poly_integral(coeffs: &[f64], a: f64, b: f64) -> f64 {
        coeffs
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let p = (k + 1) as i32;
                c * (b.powi(p) - a.powi(p)) / p as f64
            })
            .sum()
    }

    #[test]
    fn test_gauss_exact_for_random_polynomials() {
        let mut rng = rand::rng();
        for n in 1..=MAX_GAUSS_POINTS {
            for _ in 0..20 {
                let degree = 2 * n - 1;
                let coeffs: Vec<f64> = (0..=degree).map(|_| rng.random_range(-3.0..3.0)).collect();
                let a: f64 = rng.random_range(-2.0..2.0);
                let b: f64 = rng.random_range(-2.0..2.0);
                let f = |x: f64| poly(&coeffs, x);
                let result = integrate_gauss(&f, (a, b), n).unwrap();
                let expected = poly_integral(&coeffs, a, b);
                assert_relative_eq!(result, expected, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_gauss_not_exact_above_degree_limit() {
        // x^(2n) is the first monomial an n-point rule misses
        for n in 1..=MAX_GAUSS_POINTS {
            let p = (2 * n) as i32;
            let result = integrate_gauss(&|x: f64| x.powi(p), (-1.0, 1.0), n).unwrap();
            let expected = 2.0 / (p + 1) as f64;
            assert!((result - expected).abs() > 1e-6);
        }
    }

    #[test]
    fn test_table_agrees_with_gauss_quad() {
        // gauss-quad builds its rules numerically, starting from 2 nodes
        let f = |x: f64| x.exp() * (3.0 * x).sin();
        for n in 2..=MAX_GAUSS_POINTS {
            let reference = GaussLegendre::new(n).unwrap().integrate(-0.5, 2.0, f);
            let ours = GaussLegendreRule::new(n).unwrap().integrate(&f, (-0.5, 2.0));
            assert_relative_eq!(ours, reference, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_gauss_converges_on_exponential() {
        let expected = std::f64::consts::E - 1.0;
        let errors: Vec<f64> = (1..=MAX_GAUSS_POINTS)
            .map(|n| (integrate_gauss(&|x: f64| x.exp(), (0.0, 1.0), n).unwrap() - expected).abs())
            .collect();
        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0]);
        }
        assert!(errors[MAX_GAUSS_POINTS - 1] < 1e-10);
    }

    #[test]
    fn test_newton_cotes_vs_gauss_on_smooth_function() {
        let n = 201;
        let x: Vec<f64> = (0..n).map(|i| 2.0 * i as f64 / (n - 1) as f64).collect();
        let f: Vec<f64> = x.iter().map(|x| (-x * x).exp()).collect();
        let gauss = integrate_gauss(&|x: f64| (-x * x).exp(), (0.0, 2.0), 5).unwrap();
        for method in NewtonCotesMethod::iter() {
            let res = integrate_newton(&x, &f, method).unwrap();
            assert_relative_eq!(res, gauss, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_simpson_on_nonuniform_triplets_is_approximate() {
        // uniform inside each triplet but different widths between triplets: still exact for quadratics
        let x = vec![0.0, 0.25, 0.5, 1.25, 2.0];
        let f: Vec<f64> = x.iter().map(|x| x * x).collect();
        let res = integrate_newton(&x, &f, NewtonCotesMethod::Simpson).unwrap();
        assert_relative_eq!(res, 8.0 / 3.0, epsilon = 1e-12);
        // unequal widths inside a triplet: only an approximation
        let x = vec![0.0, 0.2, 1.0];
        let f: Vec<f64> = x.iter().map(|x| x * x).collect();
        let res = integrate_newton(&x, &f, NewtonCotesMethod::Simpson).unwrap();
        assert!((res - 1.0 / 3.0).abs() > 1e-3);
    }

    #[test]
    fn test_errors_display() {
        let msg = IntegrationError::InvalidOrder(7).to_string();
        assert!(msg.contains('7'));
        let msg = IntegrationError::EvenSampleCount(4).to_string();
        assert!(msg.contains("odd"));
    }
}
