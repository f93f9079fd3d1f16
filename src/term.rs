//! Bit-pattern representation of minterms and implicants

use std::fmt;
use std::str::FromStr;

use crate::literal::{Literal, Product};

/// Maximum number of variables in a term
pub const MAX_VARIABLES: usize = 32;

/// A fixed-width pattern of `0`, `1` and `-` symbols
///
/// A dash marks a position that is not fixed: the term stands for every minterm obtained by
/// replacing the dashes with `0` or `1`. A term without dashes is a single minterm.
/// Position 0 is the leftmost symbol, i.e. the most significant bit of the minterms.
///
/// Terms are ordered by width, then by smallest covered minterm, then by dash pattern.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Term {
    width: u8,
    /// Fixed bits; always zero at dash positions
    value: u32,
    dashes: u32,
}

impl Term {
    /// Number of variables required to represent a minterm index (at least one)
    pub fn width_for(max_minterm: u32) -> usize {
        (u32::BITS - max_minterm.leading_zeros()).max(1) as usize
    }

    /// Mask of the bits used by the given width
    fn width_mask(width: usize) -> u32 {
        if width >= MAX_VARIABLES {
            !0
        } else {
            (1u32 << width) - 1
        }
    }

    /// Create a term for a single minterm
    pub fn from_minterm(minterm: u32, width: usize) -> Term {
        assert!(width >= 1 && width <= MAX_VARIABLES);
        assert!(
            minterm & !Term::width_mask(width) == 0,
            "Minterm {minterm} does not fit on {width} bits"
        );
        Term {
            width: width as u8,
            value: minterm,
            dashes: 0,
        }
    }

    /// The term with dashes everywhere, covering all minterms
    pub fn full(width: usize) -> Term {
        assert!(width >= 1 && width <= MAX_VARIABLES);
        Term {
            width: width as u8,
            value: 0,
            dashes: Term::width_mask(width),
        }
    }

    /// Number of symbols
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Number of `1` symbols, ignoring dashes; this is the group of the term during tabulation
    pub fn nb_ones(&self) -> u32 {
        self.value.count_ones()
    }

    /// Number of dashes
    pub fn nb_dashes(&self) -> u32 {
        self.dashes.count_ones()
    }

    /// Number of literals in the corresponding product
    pub fn nb_literals(&self) -> usize {
        self.width() - self.nb_dashes() as usize
    }

    /// Bit corresponding to a position
    fn bit(&self, pos: usize) -> u32 {
        assert!(pos < self.width());
        1u32 << (self.width() - 1 - pos)
    }

    /// Symbol at a position: `None` for a dash
    pub fn symbol(&self, pos: usize) -> Option<bool> {
        let b = self.bit(pos);
        if self.dashes & b != 0 {
            None
        } else {
            Some(self.value & b != 0)
        }
    }

    /// Returns true if both terms have dashes at the same positions
    pub fn same_dashes(&self, other: &Term) -> bool {
        self.width == other.width && self.dashes == other.dashes
    }

    /// Position of the single fixed symbol where two terms differ
    ///
    /// Returns `None` if the terms do not have the same dash positions, or if they do not
    /// differ in exactly one position.
    pub fn merge_position(&self, other: &Term) -> Option<usize> {
        if !self.same_dashes(other) {
            return None;
        }
        let diff = self.value ^ other.value;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(self.width() - 1 - diff.trailing_zeros() as usize)
    }

    /// Replace the symbol at a position by a dash
    pub fn with_dash(&self, pos: usize) -> Term {
        let b = self.bit(pos);
        Term {
            width: self.width,
            value: self.value & !b,
            dashes: self.dashes | b,
        }
    }

    /// Merge two terms that differ in a single position
    pub fn merge(&self, other: &Term) -> Option<Term> {
        self.merge_position(other).map(|pos| self.with_dash(pos))
    }

    /// Returns true if the term covers the minterm
    pub fn covers(&self, minterm: u32) -> bool {
        minterm & !Term::width_mask(self.width()) == 0 && minterm & !self.dashes == self.value
    }

    /// Returns true if every minterm of the other term is covered by this one
    pub fn contains(&self, other: &Term) -> bool {
        self.width == other.width
            && other.dashes & !self.dashes == 0
            && other.value & !self.dashes == self.value
    }

    /// Expand the term to the minterms it represents, in increasing order
    ///
    /// Each binary combination of the dashes is substituted into the dash positions from left
    /// to right.
    pub fn minterms(&self) -> Vec<u32> {
        self.iter_minterms().collect()
    }

    /// Lazy version of [`Term::minterms`]
    pub fn iter_minterms(&self) -> impl Iterator<Item = u32> {
        let dash_bits: Vec<u32> = (0..self.width())
            .map(|pos| self.bit(pos))
            .filter(|b| self.dashes & b != 0)
            .collect();
        let k = dash_bits.len();
        let value = self.value;
        (0..(1u64 << k)).map(move |combination| {
            let mut m = value;
            for (j, b) in dash_bits.iter().enumerate() {
                if (combination >> (k - 1 - j)) & 1 != 0 {
                    m |= b;
                }
            }
            m
        })
    }

    /// Literals of the term: `0` gives a complemented variable, `1` a variable, a dash nothing
    pub fn literals(&self) -> Product {
        let mut lits = Vec::new();
        for pos in 0..self.width() {
            match self.symbol(pos) {
                Some(true) => lits.push(Literal::from_var(pos as u32)),
                Some(false) => lits.push(Literal::complement_of(pos as u32)),
                None => (),
            }
        }
        Product::new(lits)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in 0..self.width() {
            let c = match self.symbol(pos) {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Term, String> {
        let width = s.chars().count();
        if width == 0 || width > MAX_VARIABLES {
            return Err(format!("Invalid term width {width}"));
        }
        let mut value = 0u32;
        let mut dashes = 0u32;
        for c in s.chars() {
            value <<= 1;
            dashes <<= 1;
            match c {
                '0' => (),
                '1' => value |= 1,
                '-' => dashes |= 1,
                _ => return Err(format!("Invalid symbol {c} in term {s}")),
            }
        }
        Ok(Term {
            width: width as u8,
            value,
            dashes,
        })
    }
}
