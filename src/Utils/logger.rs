// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! logging setup and saving of convergence results into files
use chrono::Local;
use csv::Writer;
use log::warn;
use simplelog::*;
use std::fs::File;
use std::io::{self, Write};
use tabled::{builder::Builder, settings::Style};

/// results of repeated integrations: one argument column (sampling step, number of points, ...)
/// and several named value columns of the same length
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceTable {
    pub arg: String,
    pub args: Vec<f64>,
    pub columns: Vec<(String, Vec<f64>)>,
}

impl ConvergenceTable {
    pub fn new(arg: &str, args: Vec<f64>) -> Self {
        ConvergenceTable {
            arg: arg.to_string(),
            args,
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, name: &str, values: Vec<f64>) {
        assert_eq!(
            values.len(),
            self.args.len(),
            "column {} must have one value per argument",
            name
        );
        self.columns.push((name.to_string(), values));
    }

    pub fn column(&self, name: &str) -> Option<&Vec<f64>> {
        self.columns
            .iter()
            .find(|(col_name, _)| col_name == name)
            .map(|(_, values)| values)
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = vec![self.arg.clone()];
        headers.extend(self.columns.iter().map(|(name, _)| name.clone()));
        headers
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let mut row = vec![arg.to_string()];
                row.extend(self.columns.iter().map(|(_, values)| values[i].to_string()));
                row
            })
            .collect()
    }
}

/// save table as tab separated text
pub fn save_table_to_txt(table: &ConvergenceTable, filename: &str) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", table.headers().join("\t"))?;
    for row in table.rows() {
        writeln!(file, "{}", row.join("\t"))?;
    }
    Ok(())
}

pub fn save_table_to_csv(table: &ConvergenceTable, filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(table.headers())?;
    for row in table.rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// table rendered for the log
pub fn table_to_pretty_string(table: &ConvergenceTable) -> String {
    let mut data = vec![table.headers()];
    data.extend(table.rows());
    let mut pretty = Builder::from(data).build();
    pretty.with(Style::modern_rounded());
    pretty.to_string()
}

/// level by name: off, error, warn, info, debug, trace
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize terminal logger and, if `log_file` is given, a file logger.
/// `log_file = Some("auto")` writes to log_<date_and_time>.txt.
/// A second call does nothing (global logger already set).
pub fn init_logging(level: &str, log_file: Option<&str>) {
    let log_option = parse_level(level).unwrap_or(LevelFilter::Info);
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    let mut file_error = None;
    if let Some(name) = log_file {
        let name = if name == "auto" {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            format!("log_{}.txt", date_and_time)
        } else {
            name.to_string()
        };
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(log_option, Config::default(), file)),
            Err(e) => file_error = Some(format!("cannot create log file {}: {}", name, e)),
        }
    }
    let _ = CombinedLogger::init(loggers);
    if let Some(msg) = file_error {
        warn!("{}", msg);
    }
    if parse_level(level).is_none() {
        warn!("unknown log level '{}', using info", level);
    }
}
