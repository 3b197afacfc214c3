// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! examples of usage of RustedQuad: drivers configured from a task document
use crate::Utils::logger::init_logging;
use crate::Utils::task_parser::TaskDocument;
use log::{info, warn};
use std::error::Error;

/// probabilities under the normal distribution with Gauss-Legendre quadrature
pub mod probability_example;
/// energy integral of a seismic record with Newton-Cotes rules
pub mod seismic_example;

use probability_example::{ProbabilityTask, run_probability_example};
use seismic_example::{SeismicTask, run_seismic_example};

/// names of the drivers that were run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub drivers: Vec<String>,
}

/// set up logging from the "logging" section (info to terminal if absent)
pub fn init_logging_from_task(task: &TaskDocument) {
    match task.section("logging") {
        Some(section) => {
            let level = section.get_string("level", "info");
            let log_file = section
                .contains("log_file")
                .then(|| section.get_string("log_file", "auto"));
            init_logging(&level, log_file.as_deref());
        }
        None => init_logging("info", None),
    }
}

/// run every driver that has a section in the task document;
/// a document without driver sections runs the probability driver with defaults
pub fn run_task(task: &TaskDocument) -> Result<RunSummary, Box<dyn Error>> {
    let mut summary = RunSummary::default();
    if let Some(section) = task.section("seismic") {
        info!("running seismic example");
        let seismic = SeismicTask::from_section(section)?;
        let report = run_seismic_example(&seismic)?;
        info!("event duration {:.2} s", report.duration);
        summary.drivers.push("seismic".to_string());
    }
    if let Some(section) = task.section("probability") {
        info!("running probability example");
        let probability = ProbabilityTask::from_section(section)?;
        run_probability_example(&probability)?;
        summary.drivers.push("probability".to_string());
    }
    if summary.drivers.is_empty() {
        warn!("no driver sections in the task, running probability example with defaults");
        run_probability_example(&ProbabilityTask::default())?;
        summary.drivers.push("probability".to_string());
    }
    Ok(summary)
}
