// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! read two-column numeric text files (e.g. time and velocity of a seismic record).
//! Columns are separated by whitespace or a comma, empty lines and lines starting with '#' are skipped.
use nalgebra::DVector;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{space0, space1},
    number::complete::double,
    sequence::{delimited, separated_pair},
};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum DataLoadError {
    Io(std::io::Error),
    /// line number counted from 1
    Parse { line: usize, content: String },
    Empty,
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataLoadError::Io(e) => write!(f, "cannot read data file: {}", e),
            DataLoadError::Parse { line, content } => {
                write!(f, "line {} is not a pair of numbers: '{}'", line, content)
            }
            DataLoadError::Empty => write!(f, "data file contains no samples"),
        }
    }
}

impl std::error::Error for DataLoadError {}

impl From<std::io::Error> for DataLoadError {
    fn from(e: std::io::Error) -> Self {
        DataLoadError::Io(e)
    }
}

fn parse_row(input: &str) -> IResult<&str, (f64, f64)> {
    let separator = alt((delimited(space0, tag(","), space0), space1));
    let mut parser = separated_pair(double, separator, double);
    parser.parse(input)
}

/// parse text content into first and second column
pub fn parse_two_columns(content: &str) -> Result<(DVector<f64>, DVector<f64>), DataLoadError> {
    let mut first = Vec::new();
    let mut second = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parse_error = || DataLoadError::Parse {
            line: i + 1,
            content: line.to_string(),
        };
        let (remaining, (a, b)) = parse_row(line).map_err(|_| parse_error())?;
        if !remaining.trim().is_empty() {
            return Err(parse_error());
        }
        first.push(a);
        second.push(b);
    }
    if first.is_empty() {
        return Err(DataLoadError::Empty);
    }
    Ok((DVector::from_vec(first), DVector::from_vec(second)))
}

pub fn load_two_columns<P: AsRef<Path>>(
    path: P,
) -> Result<(DVector<f64>, DVector<f64>), DataLoadError> {
    let content = fs::read_to_string(path.as_ref())?;
    let (first, second) = parse_two_columns(&content)?;
    log::info!(
        "loaded {} samples from {}",
        first.len(),
        path.as_ref().display()
    );
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_whitespace_and_comma_columns() {
        let content = "# time velocity\n0.00   0.5\n0.01\t-1.25e-1\n\n0.02, 3\n";
        let (t, v) = parse_two_columns(content).unwrap();
        assert_eq!(t.as_slice(), &[0.0, 0.01, 0.02]);
        assert_eq!(v.as_slice(), &[0.5, -0.125, 3.0]);
    }

    #[test]
    fn test_bad_line_is_reported() {
        let content = "0.0 1.0\n0.1 abc\n";
        match parse_two_columns(content) {
            Err(DataLoadError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(
            parse_two_columns("0.0 1.0 2.0"),
            Err(DataLoadError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            parse_two_columns("# only header\n\n"),
            Err(DataLoadError::Empty)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s_wave_data.txt");
        let mut file = File::create(&path).unwrap();
        for i in 0..5 {
            writeln!(file, "{} {}", i as f64 * 0.01, (i * i) as f64).unwrap();
        }
        let (t, v) = load_two_columns(&path).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(v[4], 16.0);
        assert!(matches!(
            load_two_columns(dir.path().join("none.txt")),
            Err(DataLoadError::Io(_))
        ));
    }
}
