// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Energy-like integral ∫v²dt of a seismic velocity record with the trapezoidal and Simpson's
//! rules, and how the two estimates change when the record is sampled more coarsely.
use crate::Utils::data_loader::load_two_columns;
use crate::Utils::logger::{ConvergenceTable, save_table_to_csv, table_to_pretty_string};
use crate::Utils::plots::{AxisScale, plot_convergence, plot_trace};
use crate::Utils::task_parser::TaskSection;
use crate::numerical::integration_error::IntegrationResult;
use crate::numerical::newton_cotes::{NewtonCotesMethod, integrate_newton};
use log::{debug, info};
use nalgebra::DVector;
use std::error::Error;
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;

/// sampling intervals (s) tried by default
pub const DEFAULT_DT_VALUES: [f64; 13] = [
    0.01, 0.02, 0.03, 0.04, 0.08, 0.09, 0.10, 0.11, 0.12, 0.13, 0.14, 0.15, 0.16,
];
/// fraction of the peak amplitude below which the signal is considered over
const DURATION_THRESHOLD: f64 = 0.005;
const RELATIVE_ERROR_EPSILON: f64 = 1e-10;

/// parameters of the seismic example
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicTask {
    pub data_file: String,
    /// sampling interval of the recorded data
    pub base_dt: f64,
    pub dt_values: Vec<f64>,
    pub output_dir: String,
    pub plot: bool,
}

impl Default for SeismicTask {
    fn default() -> Self {
        SeismicTask {
            data_file: "s_wave_data.txt".to_string(),
            base_dt: 0.01,
            dt_values: DEFAULT_DT_VALUES.to_vec(),
            output_dir: "figures".to_string(),
            plot: true,
        }
    }
}

impl SeismicTask {
    pub fn from_section(section: &TaskSection) -> Result<Self, Box<dyn Error>> {
        let default = SeismicTask::default();
        let task = SeismicTask {
            data_file: section.get_string("data_file", &default.data_file),
            base_dt: section.get_f64("base_dt", default.base_dt)?,
            dt_values: section.get_f64_list("dt_values", &default.dt_values)?,
            output_dir: section.get_string("output_dir", &default.output_dir),
            plot: section.get_bool("plot", default.plot)?,
        };
        if task.base_dt <= 0.0 || task.dt_values.iter().any(|dt| *dt <= 0.0) {
            return Err("sampling intervals must be positive".into());
        }
        Ok(task)
    }
}

/// time of the last sample whose amplitude exceeds 0.5% of the peak amplitude,
/// or the last time if no sample does; None for an empty record
pub fn estimate_event_duration(time: &DVector<f64>, velocity: &DVector<f64>) -> Option<f64> {
    if time.is_empty() {
        return None;
    }
    let threshold = DURATION_THRESHOLD * velocity.amax();
    let last_index = velocity
        .as_slice()
        .iter()
        .rposition(|v| v.abs() > threshold)
        .unwrap_or(time.len() - 1);
    Some(time[last_index])
}

/// every `step`-th sample starting from the first one; the last kept sample is dropped when
/// the count is even so that Simpson's rule can be applied
pub fn downsample_odd(
    time: &DVector<f64>,
    values: &DVector<f64>,
    step: usize,
) -> (DVector<f64>, DVector<f64>) {
    let step = step.max(1);
    let mut indices: Vec<usize> = (0..time.len()).step_by(step).collect();
    if indices.len() % 2 == 0 {
        indices.pop();
    }
    let t = DVector::from_iterator(indices.len(), indices.iter().map(|&i| time[i]));
    let v = DVector::from_iterator(indices.len(), indices.iter().map(|&i| values[i]));
    (t, v)
}

/// ∫v²dt for every sampling interval in `dt_values` with both Newton-Cotes rules
pub fn compute_integrals(
    time: &DVector<f64>,
    velocity: &DVector<f64>,
    dt_values: &[f64],
    base_dt: f64,
) -> IntegrationResult<ConvergenceTable> {
    let mut results: Vec<Vec<f64>> = vec![Vec::with_capacity(dt_values.len()); 2];
    for &dt in dt_values {
        let step = ((dt / base_dt).round() as usize).max(1);
        let (t, v) = downsample_odd(time, velocity, step);
        let v_squared = v.component_mul(&v);
        debug!("dt = {}: step {}, {} samples", dt, step, t.len());
        for (k, method) in NewtonCotesMethod::iter().enumerate() {
            results[k].push(integrate_newton(t.as_slice(), v_squared.as_slice(), method)?);
        }
    }
    let mut table = ConvergenceTable::new("dt", dt_values.to_vec());
    for (method, values) in NewtonCotesMethod::iter().zip(results) {
        table.add_column(&method.to_string(), values);
    }
    Ok(table)
}

/// |v - reference| / (|reference| + 1e-10)
pub fn relative_errors(values: &[f64], reference: f64) -> Vec<f64> {
    values
        .iter()
        .map(|v| ((v - reference) / (reference.abs() + RELATIVE_ERROR_EPSILON)).abs())
        .collect()
}

/// what the seismic example computed
#[derive(Debug, Clone)]
pub struct SeismicReport {
    pub duration: f64,
    pub integrals: ConvergenceTable,
    /// errors relative to the finest sampling interval
    pub relative_errors: ConvergenceTable,
}

/// integrals of the already loaded record, errors are taken relative to the first (finest) dt
pub fn analyze_record(
    time: &DVector<f64>,
    velocity: &DVector<f64>,
    dt_values: &[f64],
    base_dt: f64,
) -> Result<SeismicReport, Box<dyn Error>> {
    let duration = estimate_event_duration(time, velocity).ok_or("empty seismic record")?;
    info!("Estimated event duration T: {:.2} s", duration);

    let integrals = compute_integrals(time, velocity, dt_values, base_dt)?;
    let mut errors = ConvergenceTable::new("dt", integrals.args.clone());
    for (name, values) in &integrals.columns {
        let reference = values.first().copied().unwrap_or_default();
        errors.add_column(name, relative_errors(values, reference));
    }
    info!(
        "\n \n INTEGRAL OF SQUARED VELOCITY \n \n {}",
        table_to_pretty_string(&integrals)
    );
    info!(
        "\n \n RELATIVE ERROR \n \n {}",
        table_to_pretty_string(&errors)
    );
    Ok(SeismicReport {
        duration,
        integrals,
        relative_errors: errors,
    })
}

pub fn run_seismic_example(task: &SeismicTask) -> Result<SeismicReport, Box<dyn Error>> {
    let (time, velocity) = load_two_columns(&task.data_file)?;
    let report = analyze_record(&time, &velocity, &task.dt_values, task.base_dt)?;

    fs::create_dir_all(&task.output_dir)?;
    let dir = Path::new(&task.output_dir);
    save_table_to_csv(
        &report.integrals,
        &dir.join("seismic_integrals.csv").to_string_lossy(),
    )?;
    save_table_to_csv(
        &report.relative_errors,
        &dir.join("seismic_relative_errors.csv").to_string_lossy(),
    )?;

    if task.plot {
        let trace = plot_trace(
            &dir.join("seismic_velocity.png").to_string_lossy(),
            "Seismic Velocity Data",
            "Time (seconds)",
            "Velocity (mm/s)",
            time.as_slice(),
            velocity.as_slice(),
        );
        let curves: Vec<(String, Vec<f64>, Vec<f64>)> = NewtonCotesMethod::iter()
            .filter_map(|method| {
                report
                    .relative_errors
                    .column(&method.to_string())
                    .map(|errors| {
                        (
                            method.description().to_string(),
                            report.relative_errors.args.clone(),
                            errors.clone(),
                        )
                    })
            })
            .collect();
        let convergence = plot_convergence(
            &dir.join("seismic_convergence.png").to_string_lossy(),
            "Convergence of the squared velocity integral",
            "Sampling Interval (s)",
            "Approximate Relative Error",
            &curves,
            AxisScale::LogLog,
        );
        for result in [trace, convergence] {
            if let Err(e) = result {
                log::warn!("plot not created: {}", e);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Utils::task_parser::parse_task;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    /// one period of sin(2πt) sampled every 0.01 s, ∫v²dt = 0.5
    fn sine_record() -> (DVector<f64>, DVector<f64>) {
        let time = DVector::from_iterator(101, (0..101).map(|i| i as f64 * 0.01));
        let velocity = time.map(|t| (2.0 * PI * t).sin());
        (time, velocity)
    }

    #[test]
    fn test_estimate_event_duration() {
        let time = DVector::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let velocity = DVector::from_vec(vec![0.0, -1.0, 0.5, 0.001, 0.0]);
        assert_eq!(estimate_event_duration(&time, &velocity), Some(2.0));

        let quiet = DVector::from_vec(vec![0.0; 5]);
        assert_eq!(estimate_event_duration(&time, &quiet), Some(4.0));

        let empty = DVector::<f64>::zeros(0);
        assert_eq!(estimate_event_duration(&empty, &empty), None);
    }

    #[test]
    fn test_downsample_odd() {
        let time = DVector::from_iterator(10, (0..10).map(|i| i as f64));
        let (t, v) = downsample_odd(&time, &time, 3);
        // 0, 3, 6, 9 -> even count, 9 dropped
        assert_eq!(t.as_slice(), &[0.0, 3.0, 6.0]);
        assert_eq!(v.as_slice(), &[0.0, 3.0, 6.0]);
        let (t, _) = downsample_odd(&time, &time, 0);
        assert_eq!(t.len(), 9);
    }

    #[test]
    fn test_compute_integrals_sine() {
        let (time, velocity) = sine_record();
        let table = compute_integrals(&time, &velocity, &[0.01, 0.02, 0.05], 0.01).unwrap();
        assert_eq!(table.args, vec![0.01, 0.02, 0.05]);
        for (_, values) in &table.columns {
            for value in values {
                assert_relative_eq!(*value, 0.5, epsilon = 2e-3);
            }
        }
        assert!(table.column("trap").is_some());
        assert!(table.column("simp").is_some());
    }

    #[test]
    fn test_dt_is_rounded_to_whole_steps() {
        // 0.03 / 0.01 is slightly below 3 in floating point
        let (time, velocity) = sine_record();
        let a = compute_integrals(&time, &velocity, &[0.03], 0.01).unwrap();
        let b = compute_integrals(&time, &velocity, &[0.0300001], 0.01).unwrap();
        assert_eq!(a.columns, b.columns);
    }

    #[test]
    fn test_relative_errors() {
        let errors = relative_errors(&[2.0, 2.2, 1.0], 2.0);
        assert_relative_eq!(errors[0], 0.0);
        assert_relative_eq!(errors[1], 0.1, epsilon = 1e-9);
        assert_relative_eq!(errors[2], 0.5, epsilon = 1e-9);
        // zero reference does not divide by zero
        assert!(relative_errors(&[1.0], 0.0)[0].is_finite());
    }

    #[test]
    fn test_analyze_record() {
        let (time, velocity) = sine_record();
        let report = analyze_record(&time, &velocity, &[0.01, 0.02, 0.04], 0.01).unwrap();
        assert_relative_eq!(report.duration, 1.0, epsilon = 0.02);
        let errors = report.relative_errors.column("simp").unwrap();
        assert_eq!(errors[0], 0.0);
        assert!(errors.iter().all(|e| *e < 1e-2));
    }

    #[test]
    fn test_task_from_section() {
        let doc = parse_task("seismic\n data_file: trace.txt\n dt_values: 0.01, 0.05\n plot: false")
            .unwrap();
        let task = SeismicTask::from_section(doc.section("seismic").unwrap()).unwrap();
        assert_eq!(task.data_file, "trace.txt");
        assert_eq!(task.dt_values, vec![0.01, 0.05]);
        assert_eq!(task.base_dt, 0.01);
        assert!(!task.plot);

        let doc = parse_task("seismic\n dt_values: 0.01, -0.05").unwrap();
        assert!(SeismicTask::from_section(doc.section("seismic").unwrap()).is_err());
    }

    #[test]
    fn test_run_seismic_example_from_file() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("trace.txt");
        let mut file = File::create(&data).unwrap();
        let (time, velocity) = sine_record();
        for (t, v) in time.iter().zip(velocity.iter()) {
            writeln!(file, "{:.2}\t{:.12}", t, v).unwrap();
        }
        let task = SeismicTask {
            data_file: data.to_string_lossy().to_string(),
            dt_values: vec![0.01, 0.02],
            output_dir: dir.path().join("out").to_string_lossy().to_string(),
            plot: false,
            ..SeismicTask::default()
        };
        let report = run_seismic_example(&task).unwrap();
        assert_relative_eq!(report.integrals.column("trap").unwrap()[0], 0.5, epsilon = 1e-6);
        assert!(dir.path().join("out").join("seismic_integrals.csv").exists());
    }
}
