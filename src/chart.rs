//! Prime implicant chart and selection of essential prime implicants

use std::collections::BTreeMap;

use fxhash::FxHashSet;
use log::debug;

use crate::error::{Error, Result};
use crate::term::Term;

/// Mapping from each required minterm to the prime implicants that cover it
///
/// Don't-cares never appear as keys. Keys are only removed by essential implicant reduction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Chart {
    entries: BTreeMap<u32, Vec<Term>>,
}

impl Chart {
    /// Build the chart for the required minterms
    ///
    /// Every required minterm must be covered by at least one prime implicant; otherwise
    /// tabulation was incorrect and an error is returned.
    pub fn build<'a, I>(primes: I, required: &[u32]) -> Result<Chart>
    where
        I: IntoIterator<Item = &'a Term>,
    {
        let required_set: FxHashSet<u32> = required.iter().copied().collect();
        let mut entries = BTreeMap::<u32, Vec<Term>>::new();
        for pi in primes {
            // Expanding wide implicants is exponential; scanning the minterms gives the same result
            let covered: Vec<u32> = if (1u64 << pi.nb_dashes()) <= required_set.len() as u64 {
                pi.minterms()
                    .into_iter()
                    .filter(|m| required_set.contains(m))
                    .collect()
            } else {
                required.iter().copied().filter(|m| pi.covers(*m)).collect()
            };
            for m in covered {
                let entry = entries.entry(m).or_default();
                if !entry.contains(pi) {
                    entry.push(*pi);
                }
            }
        }
        for m in required {
            if !entries.contains_key(m) {
                return Err(Error::Uncoverable { minterm: *m });
            }
        }
        Ok(Chart { entries })
    }

    /// Number of minterms in the chart
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no minterm is left in the chart
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Implicants covering a minterm, if it is still in the chart
    pub fn get(&self, minterm: u32) -> Option<&[Term]> {
        self.entries.get(&minterm).map(|v| v.as_slice())
    }

    /// Iterate over the minterms and their covering implicants, by increasing minterm
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Term])> {
        self.entries.iter().map(|(m, v)| (*m, v.as_slice()))
    }

    /// Minterms still in the chart, in increasing order
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    /// All implicants appearing in the chart, without duplicates, in order of first appearance
    pub fn implicants(&self) -> Vec<Term> {
        let mut seen = FxHashSet::default();
        let mut ret = Vec::new();
        for t in self.entries.values().flatten() {
            if seen.insert(*t) {
                ret.push(*t);
            }
        }
        ret
    }

    /// Implicants that are the only cover of some minterm
    ///
    /// The result has no duplicates and follows the order of the minterms.
    pub fn essentials(&self) -> Vec<Term> {
        let mut ret = Vec::new();
        for v in self.entries.values() {
            if v.len() == 1 && !ret.contains(&v[0]) {
                ret.push(v[0]);
            }
        }
        ret
    }

    /// Remove every minterm covered by one of the terms
    pub fn remove_covered(&mut self, terms: &[Term]) {
        self.entries
            .retain(|m, _| !terms.iter().any(|t| t.covers(*m)));
    }

    /// Find the essential implicants and remove the minterms they cover
    ///
    /// All essential implicants are found on the chart before any removal.
    pub fn reduce(&mut self) -> Vec<Term> {
        let essentials = self.essentials();
        let before = self.len();
        self.remove_covered(&essentials);
        debug!(
            "{} essential prime implicants cover {} of {} minterms",
            essentials.len(),
            before - self.len(),
            before
        );
        essentials
    }
}
