// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! parse task document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4"
//! into HashMap<title, HashMap<key, Vec<Value>>> and read typed parameters of the integration drivers from it.
//!
//! ```
//! use RustedQuad::Utils::task_parser::parse_task;
//! let task = parse_task("probability\n magnitude: 4.0\n range: 10.25, 10.35\n npts: 3").unwrap();
//! let section = task.section("probability").unwrap();
//! assert_eq!(section.get_f64("magnitude", 0.0).unwrap(), 4.0);
//! assert_eq!(section.get_f64_list("range", &[]).unwrap(), vec![10.25, 10.35]);
//! assert_eq!(section.get_usize("npts", 1).unwrap(), 3);
//! ```
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// integers are accepted where a float is expected ("npts: 3", "mean: 2")
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// Error types for reading task files
#[derive(Debug)]
pub enum TaskError {
    Io(std::io::Error),
    Parse(String),
    MissingKey { section: String, key: String },
    WrongType { section: String, key: String, expected: &'static str },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::Io(e) => write!(f, "cannot read task file: {}", e),
            TaskError::Parse(msg) => write!(f, "task parsing error: {}", msg),
            TaskError::MissingKey { section, key } => {
                write!(f, "key '{}' not found in section '{}'", key, section)
            }
            TaskError::WrongType {
                section,
                key,
                expected,
            } => write!(
                f,
                "key '{}' in section '{}' must be {}",
                key, section, expected
            ),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<std::io::Error> for TaskError {
    fn from(e: std::io::Error) -> Self {
        TaskError::Io(e)
    }
}

/// identifier: letters, digits and underscores, not starting with a digit
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // a value runs until comma, whitespace or semicolon
    let mut value_parser = map(
        take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';')),
        |s: &str| {
            if let Ok(val) = s.parse::<i64>() {
                Value::Integer(val)
            } else if let Ok(val) = s.parse::<f64>() {
                Value::Float(val)
            } else if let Ok(val) = s.parse::<bool>() {
                Value::Boolean(val)
            } else {
                Value::String(s.to_string())
            }
        },
    );
    value_parser.parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator_coma = delimited(space0, tag(","), space0);
    let mut parser = separated_list0(separator_coma, parse_value);
    parser.parse(input)
}

/// "key: value1, value2"
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_identifier, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim_start(), result))
}

/// title followed by one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, title) = parse_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, %, or ;) and empty lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("//")
                && !line.starts_with('#')
                && !line.starts_with('%')
                && !line.starts_with(';')
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// one titled block of the task document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSection {
    pub title: String,
    pub entries: HashMap<String, Vec<Value>>,
}

impl TaskSection {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn wrong_type(&self, key: &str, expected: &'static str) -> TaskError {
        TaskError::WrongType {
            section: self.title.clone(),
            key: key.to_string(),
            expected,
        }
    }

    fn single(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(|values| values.first())
    }

    pub fn require(&self, key: &str) -> Result<&Vec<Value>, TaskError> {
        self.entries.get(key).ok_or_else(|| TaskError::MissingKey {
            section: self.title.clone(),
            key: key.to_string(),
        })
    }

    pub fn get_f64(&self, key: &str, default: f64) -> Result<f64, TaskError> {
        match self.single(key) {
            None => Ok(default),
            Some(value) => value.as_float().ok_or_else(|| self.wrong_type(key, "a number")),
        }
    }

    pub fn get_usize(&self, key: &str, default: usize) -> Result<usize, TaskError> {
        match self.single(key) {
            None => Ok(default),
            Some(value) => value
                .as_integer()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| self.wrong_type(key, "a non-negative integer")),
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, TaskError> {
        match self.single(key) {
            None => Ok(default),
            Some(value) => value.as_boolean().ok_or_else(|| self.wrong_type(key, "true or false")),
        }
    }

    /// any value is accepted as a string, numbers are printed back
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.single(key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_f64_list(&self, key: &str, default: &[f64]) -> Result<Vec<f64>, TaskError> {
        match self.entries.get(key) {
            None => Ok(default.to_vec()),
            Some(values) => values
                .iter()
                .map(|v| v.as_float().ok_or_else(|| self.wrong_type(key, "a list of numbers")))
                .collect(),
        }
    }
}

/// parsed task document: sections by title
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDocument {
    pub sections: HashMap<String, TaskSection>,
}

impl TaskDocument {
    pub fn section(&self, title: &str) -> Option<&TaskSection> {
        self.sections.get(title)
    }
}

/// Parses the whole task text, comment lines are skipped
pub fn parse_task(input: &str) -> Result<TaskDocument, TaskError> {
    let filtered = filter_comments(input);
    if filtered.is_empty() {
        return Ok(TaskDocument::default());
    }
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (remaining, sections) = parser
        .parse(filtered.as_str())
        .map_err(|e| TaskError::Parse(format!("{:?}", e)))?;
    if !remaining.trim().is_empty() {
        return Err(TaskError::Parse(format!(
            "failed to parse entire document. Remaining: '{}'",
            remaining
        )));
    }
    let sections = sections
        .into_iter()
        .map(|(title, entries)| (title.clone(), TaskSection { title, entries }))
        .collect();
    Ok(TaskDocument { sections })
}

pub fn parse_task_file<P: AsRef<Path>>(path: P) -> Result<TaskDocument, TaskError> {
    let content = fs::read_to_string(path)?;
    parse_task(&content)
}
