//! Literals and products of literals

use std::fmt;
use std::ops::Not;

/// Representation of a literal: a variable or its complement
///
/// Variables are numbered from the most significant bit of a minterm: with 3 variables,
/// variable 0 (`A`) is the bit of weight 4 and variable 2 (`C`) the bit of weight 1.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
pub struct Literal {
    a: u32,
}

impl Literal {
    /// Positive literal of a variable
    pub fn from_var(v: u32) -> Literal {
        Literal { a: v << 1 }
    }

    /// Complemented literal of a variable
    pub fn complement_of(v: u32) -> Literal {
        !Literal::from_var(v)
    }

    /// Obtain the variable index associated with the literal
    pub fn var(&self) -> u32 {
        self.a >> 1
    }

    /// Returns true if the literal is the complement of its variable
    pub fn is_complemented(&self) -> bool {
        self.a & 1 != 0
    }

    /// Value of the literal for a minterm of the given width
    pub fn value(&self, minterm: u32, width: usize) -> bool {
        let bit = (minterm >> (width - 1 - self.var() as usize)) & 1 != 0;
        bit != self.is_complemented()
    }

    /// Name of a variable: `A` to `Z`, then `x26`, `x27`, ...
    pub fn var_name(v: u32) -> String {
        if v < 26 {
            char::from(b'A' + v as u8).to_string()
        } else {
            format!("x{v}")
        }
    }
}

impl Not for Literal {
    type Output = Literal;
    fn not(self) -> Literal {
        Literal { a: self.a ^ 1u32 }
    }
}

impl Not for &'_ Literal {
    type Output = Literal;
    fn not(self) -> Literal {
        Literal { a: self.a ^ 1u32 }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Literal::var_name(self.var()))?;
        if self.is_complemented() {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// A product (conjunction) of literals, ordered by variable
///
/// The empty product is the constant one.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, Default)]
pub struct Product {
    literals: Vec<Literal>,
}

impl Product {
    /// Build a product from its literals; they are sorted by variable
    pub fn new(mut literals: Vec<Literal>) -> Product {
        literals.sort();
        literals.dedup();
        Product { literals }
    }

    /// Literals of the product
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Number of literals
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Returns true for the constant one product
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Value of the product for a minterm of the given width
    pub fn value(&self, minterm: u32, width: usize) -> bool {
        self.literals.iter().all(|l| l.value(minterm, width))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "1");
        }
        for l in &self.literals {
            write!(f, "{l}")?;
        }
        Ok(())
    }
}
