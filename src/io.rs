//! Read and write minimization problems
//!
//! A problem file lists the required minterms and the don't-cares:
//! ```text
//! # Segment a of a seven-segment decoder
//! variables: 4
//! minterms: 0 2 3 5 6 7 8 9
//! dontcares: 10 11 12 13 14 15
//! ```
//! The `variables` and `dontcares` lines are optional. Without keys, the first line holds the
//! minterms and the second line the don't-cares.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::minimize::Problem;

/// Parse a whitespace or comma separated list of minterms
pub fn parse_minterms(s: &str, line: usize) -> Result<Vec<i64>> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<i64>().map_err(|_| Error::Parse {
                line,
                message: format!("{w} is not a valid minterm"),
            })
        })
        .collect()
}

/// Read a problem
pub fn read_problem<R: Read>(r: R) -> Result<Problem> {
    let mut minterms: Option<Vec<i64>> = None;
    let mut dont_cares: Option<Vec<i64>> = None;
    let mut width: Option<usize> = None;
    let mut unnamed = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let l = l?;
        let line = i + 1;
        let content = l.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let Some((key, value)) = content.split_once(':') else {
            unnamed.push((line, content.to_string()));
            continue;
        };
        let target = match key.trim().to_lowercase().as_str() {
            "minterms" | "mt" => &mut minterms,
            "dontcares" | "dc" => &mut dont_cares,
            "variables" | "vars" => {
                width = Some(value.trim().parse().map_err(|_| Error::Parse {
                    line,
                    message: format!("{} is not a valid number of variables", value.trim()),
                })?);
                continue;
            }
            k => {
                return Err(Error::Parse {
                    line,
                    message: format!("Unknown key {k}"),
                })
            }
        };
        if target.is_some() {
            return Err(Error::Parse {
                line,
                message: format!("{} is given twice", key.trim()),
            });
        }
        *target = Some(parse_minterms(value, line)?);
    }
    if let Some((line, _)) = unnamed.get(2) {
        return Err(Error::Parse {
            line: *line,
            message: "Expected at most two lines of minterms".to_string(),
        });
    }
    for (i, (line, content)) in unnamed.iter().enumerate() {
        let target = if i == 0 { &mut minterms } else { &mut dont_cares };
        if target.is_some() {
            return Err(Error::Parse {
                line: *line,
                message: "Unnamed line conflicts with a named one".to_string(),
            });
        }
        *target = Some(parse_minterms(content, *line)?);
    }
    let problem = Problem::from_signed(
        &minterms.unwrap_or_default(),
        &dont_cares.unwrap_or_default(),
    )?;
    match width {
        Some(w) => problem.with_width(w),
        None => Ok(problem),
    }
}

/// Write a problem
pub fn write_problem<W: Write>(w: &mut W, problem: &Problem) -> Result<()> {
    writeln!(w, "variables: {}", problem.width())?;
    writeln!(w, "minterms: {}", problem.minterms().iter().join(" "))?;
    if !problem.dont_cares().is_empty() {
        writeln!(w, "dontcares: {}", problem.dont_cares().iter().join(" "))?;
    }
    Ok(())
}

/// Read a problem from a file
pub fn read_problem_file(path: &Path) -> Result<Problem> {
    let f = File::open(path)?;
    read_problem(f)
}

/// Write a problem to a file
pub fn write_problem_file(path: &Path, problem: &Problem) -> Result<()> {
    let mut f = File::create(path)?;
    write_problem(&mut f, problem)
}
