//! Text rendering of the minimization steps
//!
//! ```
//! # use qmin::minimize::{minimize, MinimizeOptions, Problem};
//! use qmin::report::{Solutions, Trace};
//! let problem = Problem::new(&[1, 3, 7], &[]).unwrap();
//! let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
//!
//! // Show all intermediate tables
//! println!("{}", Trace(&res));
//!
//! // Show the solutions only
//! assert_eq!(Solutions(&res).to_string(), "F = A'C + BC\n");
//! ```

use std::fmt;

use itertools::Itertools;

use crate::chart::Chart;
use crate::minimize::Minimization;
use crate::tabulation::Generation;
use crate::term::Term;

/// Merged minterms of a term, as in `9,11` for `10-1`
fn merged_minterms(t: &Term) -> String {
    t.iter_minterms().join(",")
}

fn term_list(terms: &[Term]) -> String {
    if terms.is_empty() {
        "None".to_string()
    } else {
        terms.iter().join(", ")
    }
}

/// Table of the terms of a generation, grouped by number of ones
pub struct GenerationTable<'a>(pub &'a Generation);

impl fmt::Display for GenerationTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Group No.\tMinterms\tBinary of Minterms")?;
        writeln!(f, "{}", "=".repeat(50))?;
        for (ones, terms) in self.0.groups() {
            writeln!(f, "{:5}:", ones)?;
            for t in terms {
                writeln!(f, "\t\t{:<24}{}", merged_minterms(t), t)?;
            }
            writeln!(f, "{}", "-".repeat(50))?;
        }
        Ok(())
    }
}

/// Prime implicant chart, with one row per implicant and one column per minterm
pub struct ChartTable<'a> {
    chart: &'a Chart,
    implicants: Vec<Term>,
}

impl<'a> ChartTable<'a> {
    /// Table with a row for each implicant that appears in the chart
    pub fn new(chart: &'a Chart) -> ChartTable<'a> {
        ChartTable {
            chart,
            implicants: chart.implicants(),
        }
    }

    /// Table with a row for each of the given implicants, even those that cover no minterm of
    /// the chart
    pub fn with_implicants<I>(chart: &'a Chart, implicants: I) -> ChartTable<'a>
    where
        I: IntoIterator<Item = Term>,
    {
        ChartTable {
            chart,
            implicants: implicants.into_iter().collect(),
        }
    }
}

impl fmt::Display for ChartTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minterms: Vec<u32> = self.chart.minterms().collect();
        let sz = minterms
            .iter()
            .map(|m| m.to_string().len())
            .max()
            .unwrap_or(1);
        let line_len = minterms.len() * (sz + 1) + 16;
        writeln!(
            f,
            "    Minterms    |{}",
            minterms.iter().map(|m| format!("{:>sz$}", m)).join(" ")
        )?;
        writeln!(f, "{}", "=".repeat(line_len))?;
        for t in &self.implicants {
            let marks = minterms
                .iter()
                .map(|m| {
                    let covered = self.chart.get(*m).is_some_and(|v| v.contains(t));
                    format!("{:>sz$}", if covered { "X" } else { "" })
                })
                .join(" ");
            writeln!(f, "{:<16}|{}", merged_minterms(t), marks)?;
            writeln!(f, "{}", "-".repeat(line_len))?;
        }
        Ok(())
    }
}

/// Final solutions, as `F = ...` or `F1 = ...`, `F2 = ...` lines
pub struct Solutions<'a>(pub &'a Minimization);

impl fmt::Display for Solutions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solutions = self.0.solutions();
        if solutions.len() == 1 {
            writeln!(f, "F = {}", solutions[0])?;
        } else {
            for (i, s) in solutions.iter().enumerate() {
                writeln!(f, "F{} = {}", i + 1, s)?;
            }
        }
        Ok(())
    }
}

/// Complete trace of a minimization: generations, prime implicants, chart and solutions
pub struct Trace<'a>(pub &'a Minimization);

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = self.0;
        let tab = res.tabulation();
        for (i, g) in tab.generations().iter().enumerate() {
            writeln!(f, "Generation {}:", i)?;
            write!(f, "{}", GenerationTable(g))?;
            writeln!(
                f,
                "Unmarked elements (prime implicants) of this table: {}\n",
                term_list(g.primes())
            )?;
        }
        let primes: Vec<Term> = tab.primes().iter().copied().collect();
        writeln!(f, "All prime implicants: {}\n", term_list(&primes))?;
        writeln!(f, "Prime implicants chart:\n")?;
        write!(
            f,
            "{}",
            ChartTable::with_implicants(res.chart(), tab.primes().iter().copied())
        )?;
        writeln!(
            f,
            "\nEssential prime implicants: {}",
            term_list(res.essentials())
        )?;
        if res.used_petrick() {
            writeln!(f, "\nReduced chart:\n")?;
            write!(f, "{}", ChartTable::new(res.reduced_chart()))?;
        }
        writeln!(f)?;
        write!(f, "{}", Solutions(res))
    }
}
