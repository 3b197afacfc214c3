// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Probabilities under a normal distribution computed with Gauss-Legendre quadrature:
//! chance that an earthquake magnitude exceeds a threshold and chance that a measured
//! distance falls into a range, plus convergence of the tail estimate with the number of points.
use crate::Utils::logger::{ConvergenceTable, save_table_to_csv, table_to_pretty_string};
use crate::Utils::plots::{AxisScale, plot_convergence};
use crate::Utils::task_parser::TaskSection;
use crate::numerical::gauss_legendre::{
    Bounds, DEFAULT_GAUSS_POINTS, MAX_GAUSS_POINTS, VectorizedIntegrand, integrate_gauss,
};
use crate::numerical::integration_error::IntegrationResult;
use log::info;
use nalgebra::DVector;
use std::error::Error;
use std::fs;
use std::path::Path;

/// parameters of the probability example
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTask {
    pub magnitude: f64,
    pub mean: f64,
    pub std_dev: f64,
    /// upper integration limit in standard units standing in for +infinity
    pub upper_limit: f64,
    pub range: Bounds,
    pub range_mean: f64,
    pub range_std_dev: f64,
    pub npts: usize,
    pub output_dir: String,
    pub plot: bool,
}

impl Default for ProbabilityTask {
    fn default() -> Self {
        ProbabilityTask {
            magnitude: 4.0,
            mean: 1.5,
            std_dev: 0.5,
            upper_limit: 10.0,
            range: Bounds { a: 10.25, b: 10.35 },
            range_mean: 10.28,
            range_std_dev: 0.05,
            npts: DEFAULT_GAUSS_POINTS,
            output_dir: "figures".to_string(),
            plot: true,
        }
    }
}

impl ProbabilityTask {
    pub fn from_section(section: &TaskSection) -> Result<Self, Box<dyn Error>> {
        let default = ProbabilityTask::default();
        let range = section.get_f64_list("range", &[default.range.a, default.range.b])?;
        Ok(ProbabilityTask {
            magnitude: section.get_f64("magnitude", default.magnitude)?,
            mean: section.get_f64("mean", default.mean)?,
            std_dev: section.get_f64("std_dev", default.std_dev)?,
            upper_limit: section.get_f64("upper_limit", default.upper_limit)?,
            range: Bounds::try_from(range.as_slice())?,
            range_mean: section.get_f64("range_mean", default.range_mean)?,
            range_std_dev: section.get_f64("range_std_dev", default.range_std_dev)?,
            npts: section.get_usize("npts", default.npts)?,
            output_dir: section.get_string("output_dir", &default.output_dir),
            plot: section.get_bool("plot", default.plot)?,
        })
    }
}

/// standard normal density
pub fn normal_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * std::f64::consts::PI).sqrt()) * (-0.5 * x * x).exp()
}

fn standard_normal() -> VectorizedIntegrand<impl Fn(&DVector<f64>) -> DVector<f64>> {
    VectorizedIntegrand::new(
        |z: &DVector<f64>| z.map(normal_pdf),
        "standard normal pdf".to_string(),
    )
}

/// P(X > magnitude) for X ~ N(mean, std_dev²); the tail is cut at `upper_limit` standard units
pub fn probability_exceedance(
    magnitude: f64,
    mean: f64,
    std_dev: f64,
    upper_limit: f64,
    npts: usize,
) -> IntegrationResult<f64> {
    let z = (magnitude - mean) / std_dev;
    integrate_gauss(&standard_normal(), (z, upper_limit), npts)
}

/// P(lower < X < upper) for X ~ N(mean, std_dev²)
pub fn probability_within_range(
    range: impl Into<Bounds>,
    mean: f64,
    std_dev: f64,
    npts: usize,
) -> IntegrationResult<f64> {
    let Bounds { a, b } = range.into();
    let z_lower = (a - mean) / std_dev;
    let z_upper = (b - mean) / std_dev;
    integrate_gauss(&standard_normal(), (z_lower, z_upper), npts)
}

/// exceedance probability for every order 1..=5 and its difference from the 5-point value
pub fn exceedance_convergence(
    magnitude: f64,
    mean: f64,
    std_dev: f64,
    upper_limit: f64,
) -> IntegrationResult<ConvergenceTable> {
    let orders: Vec<usize> = (1..=MAX_GAUSS_POINTS).collect();
    let probabilities = orders
        .iter()
        .map(|&n| probability_exceedance(magnitude, mean, std_dev, upper_limit, n))
        .collect::<IntegrationResult<Vec<f64>>>()?;
    let best = probabilities[probabilities.len() - 1];
    let errors = probabilities.iter().map(|p| (p - best).abs()).collect();

    let mut table = ConvergenceTable::new("npts", orders.iter().map(|&n| n as f64).collect());
    table.add_column("probability", probabilities);
    table.add_column("error", errors);
    Ok(table)
}

/// what the probability example computed
#[derive(Debug, Clone)]
pub struct ProbabilityReport {
    pub exceedance: f64,
    pub within_range: f64,
    pub convergence: ConvergenceTable,
}

pub fn run_probability_example(task: &ProbabilityTask) -> Result<ProbabilityReport, Box<dyn Error>> {
    let exceedance = probability_exceedance(
        task.magnitude,
        task.mean,
        task.std_dev,
        task.upper_limit,
        task.npts,
    )?;
    info!(
        "Probability of earthquake magnitude > {}: {:.5}",
        task.magnitude, exceedance
    );

    let within_range =
        probability_within_range(task.range, task.range_mean, task.range_std_dev, task.npts)?;
    info!(
        "Probability that measured distance is within ({}, {}): {:.5}",
        task.range.a, task.range.b, within_range
    );

    let convergence =
        exceedance_convergence(task.magnitude, task.mean, task.std_dev, task.upper_limit)?;
    info!(
        "\n \n EXCEEDANCE PROBABILITY VS NUMBER OF POINTS \n \n {}",
        table_to_pretty_string(&convergence)
    );

    fs::create_dir_all(&task.output_dir)?;
    let dir = Path::new(&task.output_dir);
    let csv_name = dir.join("probability_convergence.csv");
    save_table_to_csv(&convergence, &csv_name.to_string_lossy())?;
    if task.plot {
        let errors = convergence.column("error").cloned().unwrap_or_default();
        let curves = vec![("Convergence".to_string(), convergence.args.clone(), errors)];
        let png_name = dir.join("probability_convergence.png");
        // the 5-point error is zero by construction and is not shown on the log axis
        if let Err(e) = plot_convergence(
            &png_name.to_string_lossy(),
            "Exceedance probability",
            "Number of Gauss-Legendre Points",
            "Approximate Relative Error",
            &curves,
            AxisScale::SemiLogY,
        ) {
            log::warn!("convergence plot not created: {}", e);
        }
    }

    Ok(ProbabilityReport {
        exceedance,
        within_range,
        convergence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::task_parser::parse_task;
    use crate::numerical::integration_error::IntegrationError;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    // Φ(1.4) - Φ(-0.6)
    const RANGE_PROBABILITY: f64 = 0.644_990_223;

    #[test]
    fn test_normal_pdf() {
        assert_relative_eq!(normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-15);
        assert_relative_eq!(normal_pdf(1.3), normal_pdf(-1.3), epsilon = 1e-15);
    }

    #[test]
    fn test_probability_within_range() {
        let p3 = probability_within_range((10.25, 10.35), 10.28, 0.05, 3).unwrap();
        let p5 = probability_within_range((10.25, 10.35), 10.28, 0.05, 5).unwrap();
        assert_relative_eq!(p3, RANGE_PROBABILITY, epsilon = 1e-3);
        assert_relative_eq!(p5, RANGE_PROBABILITY, epsilon = 1e-4);
    }

    #[test]
    fn test_exceedance_is_small_positive_tail() {
        let p = probability_exceedance(4.0, 1.5, 0.5, 10.0, 3).unwrap();
        assert!(p > 0.0 && p < 1e-5);
        // threshold at the mean: half of the mass
        let half = probability_exceedance(1.5, 1.5, 0.5, 10.0, 5).unwrap();
        assert_relative_eq!(half, 0.5, epsilon = 2e-2);
    }

    #[test]
    fn test_invalid_order_is_reported() {
        assert_eq!(
            probability_exceedance(4.0, 1.5, 0.5, 10.0, 6),
            Err(IntegrationError::InvalidOrder(6))
        );
    }

    #[test]
    fn test_exceedance_convergence_table() {
        let table = exceedance_convergence(4.0, 1.5, 0.5, 10.0).unwrap();
        assert_eq!(table.args, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let errors = table.column("error").unwrap();
        assert_eq!(errors[4], 0.0);
        assert!(errors[..4].iter().all(|e| *e > 0.0));
    }

    #[test]
    fn test_task_from_section() {
        let doc = parse_task("probability\n magnitude: 5\n range: 1.0, 2.0\n npts: 4\n plot: false")
            .unwrap();
        let task = ProbabilityTask::from_section(doc.section("probability").unwrap()).unwrap();
        assert_eq!(task.magnitude, 5.0);
        assert_eq!(task.range, Bounds { a: 1.0, b: 2.0 });
        assert_eq!(task.npts, 4);
        assert!(!task.plot);
        assert_eq!(task.mean, 1.5);
    }

    #[test]
    fn test_task_with_bad_range() {
        let doc = parse_task("probability\n range: 1.0, 2.0, 3.0").unwrap();
        let err = ProbabilityTask::from_section(doc.section("probability").unwrap()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<IntegrationError>(),
            Some(&IntegrationError::InvalidBounds(3))
        );
    }

    #[test]
    fn test_run_probability_example_writes_csv() {
        let dir = tempdir().unwrap();
        let task = ProbabilityTask {
            output_dir: dir.path().to_string_lossy().to_string(),
            plot: false,
            ..ProbabilityTask::default()
        };
        let report = run_probability_example(&task).unwrap();
        assert_relative_eq!(report.within_range, RANGE_PROBABILITY, epsilon = 1e-3);
        assert!(dir.path().join("probability_convergence.csv").exists());
    }
}
