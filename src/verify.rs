//! Verification of expressions against their truth table

use volute::Lut;

use crate::error::{Error, Result};
use crate::expression::Expression;
use crate::literal::Product;
use crate::minimize::Problem;

/// Maximum number of variables for truth table verification
pub const MAX_TRUTH_TABLE_VARIABLES: usize = 20;

/// Truth table of a product of literals
fn product_table(p: &Product, width: usize) -> Lut {
    let mut ret = Lut::one(width);
    for l in p.literals() {
        // Variable 0 is the most significant bit of the minterm
        let var = Lut::nth_var(width, width - 1 - l.var() as usize);
        ret = if l.is_complemented() { ret & !var } else { ret & var };
    }
    ret
}

/// Truth table of an expression
///
/// Bit `m` of the table is the value of the expression for minterm `m`.
pub fn truth_table(expr: &Expression) -> Lut {
    let width = expr.width();
    assert!(width <= MAX_TRUTH_TABLE_VARIABLES);
    let mut ret = Lut::zero(width);
    for p in expr.products() {
        ret = ret | product_table(&p, width);
    }
    ret
}

/// Check an expression against the function on its whole truth table
///
/// The expression must be true on every required minterm and false outside of the required
/// minterms and don't-cares.
pub fn check_truth_table(expr: &Expression, problem: &Problem) -> Result<()> {
    if expr.width() > MAX_TRUTH_TABLE_VARIABLES {
        return Err(Error::TooManyVariables {
            width: expr.width(),
            max: MAX_TRUTH_TABLE_VARIABLES,
        });
    }
    assert_eq!(expr.width(), problem.width());
    let lut = truth_table(expr);
    for mask in 0..lut.num_bits() {
        let m = mask as u32;
        if problem.is_dont_care(m) {
            continue;
        }
        let expected = problem.is_required(m);
        if lut.value(mask) != expected {
            return Err(Error::InvalidCover {
                minterm: m,
                expected,
            });
        }
    }
    Ok(())
}
