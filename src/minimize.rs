//! Complete minimization flow
//!
//! ```
//! # use qmin::minimize::{minimize, MinimizeOptions, Problem};
//! let problem = Problem::new(&[0, 2], &[]).unwrap();
//! let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
//! assert_eq!(res.solutions().len(), 1);
//! assert_eq!(res.solutions()[0].to_string(), "B'");
//! ```

use log::{debug, info};

use crate::chart::Chart;
use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::petrick::{self, CostModel};
use crate::tabulation::{tabulate, Tabulation};
use crate::term::{Term, MAX_VARIABLES};

/// A single-output Boolean function given by its minterms and don't-cares
///
/// Minterms are sorted and deduplicated; don't-cares that are also required minterms are
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    width: usize,
    minterms: Vec<u32>,
    dont_cares: Vec<u32>,
}

impl Problem {
    /// Create a problem; the number of variables is deduced from the largest minterm
    pub fn new(minterms: &[u32], dont_cares: &[u32]) -> Result<Problem> {
        let mut minterms = minterms.to_vec();
        minterms.sort();
        minterms.dedup();
        if minterms.is_empty() {
            return Err(Error::EmptyMinterms);
        }
        let mut dont_cares: Vec<u32> = dont_cares
            .iter()
            .copied()
            .filter(|m| minterms.binary_search(m).is_err())
            .collect();
        dont_cares.sort();
        dont_cares.dedup();
        let max = minterms.iter().chain(&dont_cares).copied().max().unwrap_or(0);
        Ok(Problem {
            width: Term::width_for(max),
            minterms,
            dont_cares,
        })
    }

    /// Create a problem from signed integers, as obtained from user input
    pub fn from_signed(minterms: &[i64], dont_cares: &[i64]) -> Result<Problem> {
        let convert = |v: &[i64]| -> Result<Vec<u32>> {
            v.iter()
                .map(|m| {
                    if *m < 0 {
                        Err(Error::NegativeMinterm(*m))
                    } else {
                        u32::try_from(*m).map_err(|_| Error::TooManyVariables {
                            width: (i64::BITS - m.leading_zeros()) as usize,
                            max: MAX_VARIABLES,
                        })
                    }
                })
                .collect()
        };
        Problem::new(&convert(minterms)?, &convert(dont_cares)?)
    }

    /// Use more variables than required by the largest minterm
    pub fn with_width(self, width: usize) -> Result<Problem> {
        if width > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                width,
                max: MAX_VARIABLES,
            });
        }
        if width < self.width {
            let max = self.all_minterms().max().unwrap_or(0);
            return Err(Error::MintermOutOfRange {
                minterm: max as u64,
                width,
            });
        }
        Ok(Problem { width, ..self })
    }

    /// Number of variables
    pub fn width(&self) -> usize {
        self.width
    }

    /// Required minterms, sorted
    pub fn minterms(&self) -> &[u32] {
        &self.minterms
    }

    /// Don't-cares, sorted, without the required minterms
    pub fn dont_cares(&self) -> &[u32] {
        &self.dont_cares
    }

    /// Required minterms followed by don't-cares
    pub fn all_minterms(&self) -> impl Iterator<Item = u32> + '_ {
        self.minterms.iter().chain(&self.dont_cares).copied()
    }

    /// Returns true if the function is true for the minterm; false for don't-cares
    pub fn is_required(&self, minterm: u32) -> bool {
        self.minterms.binary_search(&minterm).is_ok()
    }

    /// Returns true if the minterm is a don't-care
    pub fn is_dont_care(&self, minterm: u32) -> bool {
        self.dont_cares.binary_search(&minterm).is_ok()
    }
}

/// Options for minimization
#[derive(Clone, Debug)]
pub struct MinimizeOptions {
    /// Cost model to choose between covers
    pub cost: CostModel,
    /// Check every solution against the function before returning it
    pub verify: bool,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        MinimizeOptions {
            cost: CostModel::Terms,
            verify: true,
        }
    }
}

impl MinimizeOptions {
    /// Set the cost model
    pub fn with_cost(self, cost: CostModel) -> MinimizeOptions {
        MinimizeOptions { cost, ..self }
    }

    /// Enable or disable verification of the solutions
    pub fn with_verify(self, verify: bool) -> MinimizeOptions {
        MinimizeOptions { verify, ..self }
    }
}

/// Result of a minimization, with all intermediate artifacts
#[derive(Clone, Debug)]
pub struct Minimization {
    problem: Problem,
    tabulation: Tabulation,
    chart: Chart,
    reduced_chart: Chart,
    essentials: Vec<Term>,
    solutions: Vec<Expression>,
}

impl Minimization {
    /// The function that was minimized
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Generations and prime implicants from tabulation
    pub fn tabulation(&self) -> &Tabulation {
        &self.tabulation
    }

    /// Prime implicant chart before essential implicant reduction
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    /// Prime implicant chart after essential implicant reduction
    pub fn reduced_chart(&self) -> &Chart {
        &self.reduced_chart
    }

    /// Essential prime implicants
    pub fn essentials(&self) -> &[Term] {
        &self.essentials
    }

    /// Returns true if Petrick's method was needed after essential implicant reduction
    pub fn used_petrick(&self) -> bool {
        !self.reduced_chart.is_empty()
    }

    /// All minimal expressions; they are equally valid
    ///
    /// With [`CostModel::Terms`], every expression has the minimal number of terms, but their
    /// literal counts may differ. Use [`CostModel::TermsThenLiterals`] to keep only the
    /// expressions with the fewest literals.
    pub fn solutions(&self) -> &[Expression] {
        &self.solutions
    }
}

/// Minimize a function into minimal sums of products
///
/// Prime implicants are found by tabulation, essential prime implicants are selected on the
/// chart, and Petrick's method selects the rest when the essential implicants are not enough.
pub fn minimize(problem: &Problem, options: &MinimizeOptions) -> Result<Minimization> {
    let width = problem.width();
    let all: Vec<u32> = problem.all_minterms().collect();
    let tabulation = tabulate(&all, width);
    let chart = Chart::build(tabulation.primes(), problem.minterms())?;
    let mut reduced_chart = chart.clone();
    let essentials = reduced_chart.reduce();

    let solutions = if reduced_chart.is_empty() {
        vec![Expression::new(width, essentials.clone())]
    } else {
        debug!(
            "{} minterms left after essential implicants, using Petrick's method",
            reduced_chart.len()
        );
        petrick::solve(&reduced_chart, options.cost)
            .iter()
            .map(|selected| Expression::assemble(width, &essentials, selected))
            .collect()
    };

    if options.verify {
        for s in &solutions {
            s.check_cover(problem.minterms(), problem.dont_cares())?;
        }
    }

    info!(
        "Minimized {} minterms and {} don't-cares on {} variables: {} prime implicants, {} essential, {} solutions of {} terms",
        problem.minterms().len(),
        problem.dont_cares().len(),
        width,
        tabulation.primes().len(),
        essentials.len(),
        solutions.len(),
        solutions.first().map_or(0, |s| s.nb_terms())
    );

    Ok(Minimization {
        problem: problem.clone(),
        tabulation,
        chart,
        reduced_chart,
        essentials,
        solutions,
    })
}

/// Minimize a function given by its minterms and don't-cares, with default options
pub fn minimize_minterms(minterms: &[u32], dont_cares: &[u32]) -> Result<Vec<Expression>> {
    let problem = Problem::new(minterms, dont_cares)?;
    let res = minimize(&problem, &MinimizeOptions::default())?;
    Ok(res.solutions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn names(e: &Expression) -> Vec<String> {
        let mut ret: Vec<String> = e.products().iter().map(|p| p.to_string()).collect();
        ret.sort();
        ret
    }

    #[test]
    fn test_problem() {
        let p = Problem::new(&[3, 1, 7, 1], &[7, 5, 5]).unwrap();
        assert_eq!(p.minterms(), &[1, 3, 7]);
        assert_eq!(p.dont_cares(), &[5]);
        assert_eq!(p.width(), 3);
        assert!(p.is_required(3));
        assert!(p.is_dont_care(5));
        assert!(!p.is_required(5));
        assert_eq!(Problem::new(&[0], &[]).unwrap().width(), 1);
        assert_eq!(Problem::new(&[1], &[8]).unwrap().width(), 4);
    }

    #[test]
    fn test_problem_errors() {
        assert!(matches!(Problem::new(&[], &[1]), Err(Error::EmptyMinterms)));
        assert!(matches!(
            Problem::from_signed(&[1, -2], &[]),
            Err(Error::NegativeMinterm(-2))
        ));
        assert!(matches!(
            Problem::from_signed(&[1], &[1 << 33]),
            Err(Error::TooManyVariables { width: 34, .. })
        ));
        let p = Problem::new(&[1, 7], &[]).unwrap();
        assert!(matches!(
            p.clone().with_width(2),
            Err(Error::MintermOutOfRange { minterm: 7, width: 2 })
        ));
        assert!(p.clone().with_width(33).is_err());
        assert_eq!(p.with_width(5).unwrap().width(), 5);
    }

    #[test]
    fn test_tautology() {
        let res = minimize_minterms(&[0, 1, 2, 3], &[]).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].to_string(), "1");
    }

    #[test]
    fn test_single_minterm() {
        let res = minimize_minterms(&[5], &[]).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].to_string(), "AB'C");
        let res = minimize_minterms(&[0], &[]).unwrap();
        assert_eq!(res[0].to_string(), "A'");
    }

    #[test]
    fn test_essentials_only() {
        let problem = Problem::new(&[1, 3, 7], &[]).unwrap();
        let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
        assert_eq!(res.tabulation().primes().len(), 2);
        assert_eq!(res.essentials().len(), 2);
        assert!(!res.used_petrick());
        assert_eq!(res.solutions().len(), 1);
        assert_eq!(names(&res.solutions()[0]), vec!["A'C", "BC"]);
    }

    #[test]
    fn test_no_adjacency() {
        let res = minimize_minterms(&[0, 3], &[]).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(names(&res[0]), vec!["A'B'", "AB"]);
    }

    #[test]
    fn test_dont_cares() {
        // With 6 and 7 as don't-cares, 4 and 5 become A
        let problem = Problem::new(&[1, 4, 5], &[6, 7]).unwrap();
        let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
        assert_eq!(res.chart().len(), 3);
        assert_eq!(res.solutions().len(), 1);
        assert_eq!(names(&res.solutions()[0]), vec!["A", "B'C"]);
    }

    #[test]
    fn test_cyclic() {
        let problem = Problem::new(&[0, 1, 2, 5, 6, 7], &[]).unwrap();
        let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
        assert!(res.essentials().is_empty());
        assert!(res.used_petrick());
        assert_eq!(res.solutions().len(), 2);
        let mut sols: Vec<Vec<String>> = res.solutions().iter().map(names).collect();
        sols.sort();
        assert_eq!(
            sols,
            vec![vec!["A'B'", "AC", "BC'"], vec!["A'C'", "AB", "B'C"]]
        );
    }

    #[test]
    fn test_essentials_and_petrick() {
        // 0 and 8 force B'C'D'; 1 2 5 6 7 form a cycle
        let problem = Problem::new(&[0, 1, 2, 5, 6, 7, 8], &[]).unwrap();
        let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
        assert_eq!(res.essentials().len(), 1);
        assert_eq!(res.reduced_chart().len(), 5);
        for s in res.solutions() {
            assert_eq!(s.terms()[s.nb_terms() - 1], res.essentials()[0]);
            assert_eq!(s.nb_terms(), 4);
        }
    }

    #[test]
    fn test_literal_cost() {
        let problem = Problem::new(&[0, 1, 2, 5, 6, 7], &[]).unwrap();
        let terms = minimize(&problem, &MinimizeOptions::default()).unwrap();
        let lits = minimize(
            &problem,
            &MinimizeOptions::default().with_cost(CostModel::TermsThenLiterals),
        )
        .unwrap();
        // Both cyclic solutions have six literals: nothing to break the tie
        assert_eq!(terms.solutions().len(), lits.solutions().len());
    }

    #[test]
    fn test_idempotent() {
        let a = minimize_minterms(&[4, 8, 10, 11, 12, 15], &[9, 14]).unwrap();
        let b = minimize_minterms(&[15, 12, 11, 10, 8, 4], &[14, 9]).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x.same_terms(y));
        }
    }
}
