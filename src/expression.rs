//! Sum-of-products expressions produced by minimization

use std::fmt;

use fxhash::FxHashSet;
use itertools::Itertools;

use crate::error::{Error, Result};
use crate::literal::Product;
use crate::term::Term;

/// A sum of products, each product being an implicant of the function
///
/// The empty sum is the constant zero; a sum containing the full term is the constant one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    width: usize,
    terms: Vec<Term>,
}

impl Expression {
    /// Build an expression from its terms; duplicate terms are removed
    pub fn new(width: usize, terms: Vec<Term>) -> Expression {
        let mut seen = FxHashSet::default();
        let terms = terms
            .into_iter()
            .inspect(|t| assert_eq!(t.width(), width))
            .filter(|t| seen.insert(*t))
            .collect();
        Expression { width, terms }
    }

    /// Combine the implicants selected by Petrick's method with the essential implicants
    pub fn assemble(width: usize, essentials: &[Term], selected: &[Term]) -> Expression {
        Expression::new(width, selected.iter().chain(essentials).copied().collect())
    }

    /// Number of variables
    pub fn width(&self) -> usize {
        self.width
    }

    /// Terms of the expression
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Products of literals of the expression, in the order of the terms
    pub fn products(&self) -> Vec<Product> {
        self.terms.iter().map(|t| t.literals()).collect()
    }

    /// Number of products
    pub fn nb_terms(&self) -> usize {
        self.terms.len()
    }

    /// Total number of literals
    pub fn nb_literals(&self) -> usize {
        self.terms.iter().map(|t| t.nb_literals()).sum()
    }

    /// Value of the expression for a minterm
    pub fn value(&self, minterm: u32) -> bool {
        self.terms.iter().any(|t| t.covers(minterm))
    }

    /// Returns true if both expressions have the same terms, in any order
    pub fn same_terms(&self, other: &Expression) -> bool {
        self.width == other.width
            && self.terms.iter().sorted().eq(other.terms.iter().sorted())
    }

    /// Check that the expression implements a function given by its on-set and don't-cares
    ///
    /// Every required minterm must be covered, and no term may cover a minterm outside of the
    /// required minterms and don't-cares.
    pub fn check_cover(&self, required: &[u32], dont_cares: &[u32]) -> Result<()> {
        for m in required {
            if !self.value(*m) {
                return Err(Error::InvalidCover {
                    minterm: *m,
                    expected: true,
                });
            }
        }
        let allowed: FxHashSet<u32> = required.iter().chain(dont_cares).copied().collect();
        for t in &self.terms {
            if let Some(m) = t.iter_minterms().find(|m| !allowed.contains(m)) {
                return Err(Error::InvalidCover {
                    minterm: m,
                    expected: false,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{}", self.products().iter().join(" + "))
    }
}
