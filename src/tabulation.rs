//! Tabulation: iterative merging of terms to obtain the prime implicants
//!
//! Terms are grouped by their number of ones. At each generation, every term of group `k`
//! is compared with every term of group `k+1`; terms that differ in a single position are
//! merged into the next generation. Terms that were never merged are prime implicants.
//!
//! ```
//! # use qmin::tabulation::tabulate;
//! let tab = tabulate(&[1, 3, 7], 3);
//! let primes: Vec<String> = tab.primes().iter().map(|t| t.to_string()).collect();
//! assert_eq!(primes, vec!["0-1", "-11"]);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use fxhash::FxHashSet;
use itertools::Itertools;
use log::debug;

use crate::term::Term;

/// Terms of one generation, grouped by number of ones
#[derive(Clone, Debug, Default)]
pub struct Generation {
    groups: BTreeMap<u32, Vec<Term>>,
    primes: Vec<Term>,
}

impl Generation {
    /// Build a generation from a set of terms; duplicates are removed
    fn from_terms<I: IntoIterator<Item = Term>>(terms: I) -> Generation {
        let unique: FxHashSet<Term> = terms.into_iter().collect();
        let mut groups = BTreeMap::<u32, Vec<Term>>::new();
        for t in unique {
            groups.entry(t.nb_ones()).or_default().push(t);
        }
        for g in groups.values_mut() {
            g.sort();
        }
        Generation {
            groups,
            primes: Vec::new(),
        }
    }

    /// Iterate over the non-empty groups, by increasing number of ones
    pub fn groups(&self) -> impl Iterator<Item = (u32, &[Term])> {
        self.groups.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Terms with the given number of ones
    pub fn group(&self, nb_ones: u32) -> &[Term] {
        self.groups
            .get(&nb_ones)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over all terms of the generation
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.groups.values().flatten()
    }

    /// Number of terms in the generation
    pub fn nb_terms(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    /// Returns true if the generation has no term
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Terms of this generation that could not be merged further
    pub fn primes(&self) -> &[Term] {
        &self.primes
    }

    /// Compare adjacent groups, record the unmerged terms and return the next generation
    fn merge_adjacent(&mut self) -> Generation {
        let mut merged = FxHashSet::<Term>::default();
        let mut consumed = FxHashSet::<Term>::default();
        for (&k, lower) in &self.groups {
            let Some(upper) = self.groups.get(&(k + 1)) else {
                continue;
            };
            for (a, b) in lower.iter().cartesian_product(upper.iter()) {
                if let Some(m) = a.merge(b) {
                    merged.insert(m);
                    consumed.insert(*a);
                    consumed.insert(*b);
                }
            }
        }
        self.primes = self
            .terms()
            .filter(|t| !consumed.contains(t))
            .copied()
            .collect();
        Generation::from_terms(merged)
    }
}

/// Result of the tabulation: all generations and the prime implicants
#[derive(Clone, Debug)]
pub struct Tabulation {
    width: usize,
    generations: Vec<Generation>,
    primes: BTreeSet<Term>,
}

impl Tabulation {
    /// Number of variables
    pub fn width(&self) -> usize {
        self.width
    }

    /// All generations, starting with the initial minterms
    ///
    /// The last generation is the one where no merge happened.
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// All prime implicants, in term order
    pub fn primes(&self) -> &BTreeSet<Term> {
        &self.primes
    }
}

/// Compute the prime implicants of a set of minterms
///
/// The minterms include both the required minterms and the don't-cares. Duplicates are
/// ignored. Tabulation stops at the first generation where no merge happens, which takes at
/// most `width + 1` generations.
pub fn tabulate(minterms: &[u32], width: usize) -> Tabulation {
    let mut generations = Vec::new();
    let mut primes = BTreeSet::new();
    let mut current =
        Generation::from_terms(minterms.iter().map(|m| Term::from_minterm(*m, width)));
    while !current.is_empty() {
        let next = current.merge_adjacent();
        debug!(
            "Generation {}: {} terms in {} groups, {} prime implicants",
            generations.len(),
            current.nb_terms(),
            current.groups.len(),
            current.primes().len()
        );
        primes.extend(current.primes().iter().copied());
        generations.push(current);
        current = next;
    }
    debug!("Tabulation found {} prime implicants", primes.len());
    Tabulation {
        width,
        generations,
        primes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn names<'a, I: IntoIterator<Item = &'a Term>>(terms: I) -> Vec<String> {
        terms.into_iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_single_minterm() {
        let tab = tabulate(&[5], 3);
        assert_eq!(tab.generations().len(), 1);
        assert_eq!(names(tab.primes()), vec!["101"]);
        assert_eq!(tab.generations()[0].primes(), &[Term::from_minterm(5, 3)]);
    }

    #[test]
    fn test_groups() {
        let tab = tabulate(&[0, 1, 2, 3, 3, 7], 3);
        let g0 = &tab.generations()[0];
        assert_eq!(g0.nb_terms(), 5);
        assert_eq!(names(g0.group(0)), vec!["000"]);
        assert_eq!(names(g0.group(1)), vec!["001", "010"]);
        assert_eq!(names(g0.group(2)), vec!["011"]);
        assert_eq!(names(g0.group(3)), vec!["111"]);
        let g1 = &tab.generations()[1];
        assert_eq!(names(g1.group(0)), vec!["00-", "0-0"]);
        assert_eq!(names(g1.group(1)), vec!["0-1", "01-"]);
        assert_eq!(names(g1.group(2)), vec!["-11"]);
    }

    #[test]
    fn test_primes() {
        let tab = tabulate(&[0, 1, 2, 3, 7], 3);
        assert_eq!(names(tab.primes()), vec!["0--", "-11"]);
        // 0-- is found twice in generation 2 and kept once
        assert_eq!(tab.generations()[2].nb_terms(), 1);
        assert_eq!(tab.generations().len(), 3);
    }

    #[test]
    fn test_tautology() {
        let tab = tabulate(&[0, 1, 2, 3], 2);
        assert_eq!(names(tab.primes()), vec!["--"]);
    }

    #[test]
    fn test_no_adjacency() {
        let tab = tabulate(&[0, 3], 2);
        assert_eq!(names(tab.primes()), vec!["00", "11"]);
        assert_eq!(tab.generations().len(), 1);
    }

    #[test]
    fn test_order_independent() {
        let a = tabulate(&[4, 8, 10, 11, 12, 15, 9, 14], 4);
        let b = tabulate(&[15, 14, 12, 11, 10, 9, 8, 4], 4);
        assert_eq!(a.primes(), b.primes());
        assert_eq!(
            names(a.primes()),
            vec!["-100", "10--", "1--0", "1-1-"]
        );
    }

    #[test]
    fn test_primes_cover_inputs() {
        let minterms = [1, 5, 6, 12, 13, 14, 17, 21, 29, 30];
        let tab = tabulate(&minterms, 5);
        for m in minterms {
            assert!(tab.primes().iter().any(|p| p.covers(m)));
        }
        // No prime is contained in another
        for a in tab.primes() {
            for b in tab.primes() {
                assert!(a == b || !a.contains(b));
            }
        }
    }
}
