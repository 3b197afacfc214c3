// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedQuad::Examples::{init_logging_from_task, run_task};
use RustedQuad::Utils::logger::init_logging;
use RustedQuad::Utils::task_parser::{TaskDocument, parse_task_file};
use log::{error, info};
use std::env;
use std::process;

fn main() {
    let task = match env::args().nth(1) {
        Some(path) => match parse_task_file(&path) {
            Ok(task) => task,
            Err(e) => {
                init_logging("info", None);
                error!("cannot read task file {}: {}", path, e);
                process::exit(1);
            }
        },
        None => TaskDocument::default(),
    };
    init_logging_from_task(&task);
    match run_task(&task) {
        Ok(summary) => info!("finished: {}", summary.drivers.join(", ")),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
