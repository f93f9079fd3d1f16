//! Petrick's method: exact selection of a minimal set of implicants
//!
//! The remaining chart is a product of sums: each minterm must be covered by one of its
//! implicants. Each implicant is first replaced by an opaque [`Symbol`]. The product of sums is
//! then expanded into a sum of products with the distributive law, using `X.X = X` and
//! `X + X.Y = X` to keep the expansion small. The smallest products are the minimal covers,
//! and are translated back to implicants.
//!
//! ```
//! # use qmin::chart::Chart;
//! # use qmin::petrick::{solve, CostModel};
//! # use qmin::tabulation::tabulate;
//! // Cyclic chart: no essential implicant, two minimal solutions
//! let minterms = [0, 1, 2, 5, 6, 7];
//! let tab = tabulate(&minterms, 3);
//! let chart = Chart::build(tab.primes(), &minterms).unwrap();
//! let solutions = solve(&chart, CostModel::Terms);
//! assert_eq!(solutions.len(), 2);
//! assert!(solutions.iter().all(|s| s.len() == 3));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use log::debug;

use crate::chart::Chart;
use crate::term::Term;

/// Cost used to choose between covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CostModel {
    /// Minimal number of implicants; all covers of that size are kept, whatever their number
    /// of literals
    #[default]
    Terms,
    /// Minimal number of implicants, then minimal number of literals among them
    TermsThenLiterals,
}

/// Opaque symbol standing for one implicant
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Symbol(u32);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A product of symbols, i.e. a set of implicants selected together
///
/// Stored as a bitset of 64-bit words, without trailing zero words, so that equal selections
/// compare and hash equal. Products are ordered lexicographically by their sorted symbols.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct SymbolProduct {
    words: Vec<u64>,
}

impl SymbolProduct {
    fn word_and_bit(s: Symbol) -> (usize, u64) {
        ((s.0 / 64) as usize, 1u64 << (s.0 % 64))
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true for the empty product
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns true if the symbol appears in the product
    pub fn contains(&self, s: Symbol) -> bool {
        let (i, b) = Self::word_and_bit(s);
        self.words.get(i).is_some_and(|w| w & b != 0)
    }

    /// Returns true if every symbol of this product appears in the other
    pub fn is_subset(&self, other: &SymbolProduct) -> bool {
        self.words.len() <= other.words.len()
            && self
                .words
                .iter()
                .zip(other.words.iter())
                .all(|(a, b)| a & !b == 0)
    }

    /// Returns true if the two products share a symbol
    pub fn intersects(&self, other: &SymbolProduct) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Add a symbol to the product
    pub fn insert(&mut self, s: Symbol) {
        let (i, b) = Self::word_and_bit(s);
        if i >= self.words.len() {
            self.words.resize(i + 1, 0);
        }
        self.words[i] |= b;
    }

    /// Add all symbols of another product
    pub fn union_with(&mut self, other: &SymbolProduct) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
    }

    /// Product with one more symbol; unchanged if the symbol is already present
    pub fn with(&self, s: Symbol) -> SymbolProduct {
        let mut ret = self.clone();
        ret.insert(s);
        ret
    }

    /// Iterate over the symbols, in increasing order
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.words.iter().enumerate().flat_map(|(i, w)| {
            let mut w = *w;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let b = w.trailing_zeros();
                w &= w - 1;
                Some(Symbol(i as u32 * 64 + b))
            })
        })
    }
}

impl FromIterator<Symbol> for SymbolProduct {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut ret = SymbolProduct::default();
        for s in iter {
            ret.insert(s);
        }
        ret
    }
}

impl Ord for SymbolProduct {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbols().cmp(other.symbols())
    }
}

impl PartialOrd for SymbolProduct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SymbolProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols().join("."))
    }
}

/// Table between implicants and the symbols that stand for them
///
/// The table lives for a single invocation of Petrick's method.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    implicants: Vec<Term>,
    symbols: FxHashMap<Term, Symbol>,
}

impl Substitution {
    /// Symbol of an implicant, allocating a new one on first use
    pub fn symbol(&mut self, t: Term) -> Symbol {
        if let Some(s) = self.symbols.get(&t) {
            return *s;
        }
        let s = Symbol(self.implicants.len() as u32);
        self.implicants.push(t);
        self.symbols.insert(t, s);
        s
    }

    /// Implicant for a symbol
    pub fn implicant(&self, s: Symbol) -> Term {
        self.implicants[s.0 as usize]
    }

    /// Number of symbols allocated
    pub fn len(&self) -> usize {
        self.implicants.len()
    }

    /// Returns true if no symbol was allocated
    pub fn is_empty(&self) -> bool {
        self.implicants.is_empty()
    }

    /// Replace the implicants of each chart entry by symbols
    ///
    /// Returns the product of sums, with one sum per minterm of the chart.
    pub fn substitute(&mut self, chart: &Chart) -> Vec<Vec<Symbol>> {
        chart
            .iter()
            .map(|(_, terms)| terms.iter().map(|t| self.symbol(*t)).collect())
            .collect()
    }

    /// Replace the symbols of a product by their implicants
    pub fn back_substitute(&self, p: &SymbolProduct) -> Vec<Term> {
        p.symbols().map(|s| self.implicant(s)).collect()
    }

    /// Total number of literals of the implicants of a product
    fn nb_literals(&self, p: &SymbolProduct) -> usize {
        p.symbols().map(|s| self.implicant(s).nb_literals()).sum()
    }
}

/// Remove duplicate products and products that contain another one (`X + X.Y = X`)
///
/// The result is sorted by size, then lexicographically.
fn absorb(products: Vec<SymbolProduct>) -> Vec<SymbolProduct> {
    let unique: FxHashSet<SymbolProduct> = products.into_iter().collect();
    let mut by_len: BTreeMap<usize, Vec<SymbolProduct>> = BTreeMap::new();
    for p in unique {
        by_len.entry(p.len()).or_default().push(p);
    }
    let mut ret: Vec<SymbolProduct> = Vec::new();
    for (_, mut bucket) in by_len {
        // Distinct products of the same size never contain each other
        bucket.retain(|p| !ret.iter().any(|q| q.is_subset(p)));
        bucket.sort();
        ret.extend(bucket);
    }
    ret
}

/// Multiply a sum of products by a sum of symbols, keeping only the products accepted by `keep`
fn distribute_filtered<F>(
    left: &[SymbolProduct],
    right: &[Symbol],
    keep: F,
) -> Vec<SymbolProduct>
where
    F: Fn(&SymbolProduct) -> bool,
{
    let mut products = Vec::new();
    for a in left {
        if right.iter().any(|s| a.contains(*s)) {
            // Already covered: any other choice is absorbed by this one
            products.push(a.clone());
            continue;
        }
        for s in right {
            let p = a.with(*s);
            if keep(&p) {
                products.push(p);
            }
        }
    }
    absorb(products)
}

/// Multiply a sum of products by a sum of symbols with the distributive law
pub fn distribute(left: &[SymbolProduct], right: &[Symbol]) -> Vec<SymbolProduct> {
    distribute_filtered(left, right, |_| true)
}

/// Expand a product of sums into a sum of products, folding from the first sum to the last
pub fn expand(sums: &[Vec<Symbol>]) -> Vec<SymbolProduct> {
    let mut ret = vec![SymbolProduct::default()];
    for (i, sum) in sums.iter().enumerate() {
        ret = distribute(&ret, sum);
        debug!("Petrick expansion step {}: {} products", i + 1, ret.len());
    }
    ret
}

/// Size of a greedy cover of the sums, an upper bound on the size of a minimal cover
fn greedy_cover_size(sums: &[SymbolProduct]) -> usize {
    let mut uncovered: Vec<&SymbolProduct> = sums.iter().collect();
    let mut size = 0;
    while !uncovered.is_empty() {
        let mut counts: FxHashMap<Symbol, usize> = FxHashMap::default();
        for sum in &uncovered {
            for s in sum.symbols() {
                *counts.entry(s).or_default() += 1;
            }
        }
        let Some((best, _)) = counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        else {
            break;
        };
        uncovered.retain(|sum| !sum.contains(best));
        size += 1;
    }
    size
}

/// Number of symbols a product still needs to cover the remaining sums, at least
///
/// Sums that are not covered yet and share no symbol each require a different symbol.
fn missing_symbols(p: &SymbolProduct, remaining: &[SymbolProduct]) -> usize {
    let mut used = SymbolProduct::default();
    let mut ret = 0;
    for sum in remaining {
        if !sum.intersects(p) && !sum.intersects(&used) {
            used.union_with(sum);
            ret += 1;
        }
    }
    ret
}

/// Expand a product of sums, dropping the products that cannot lead to a cover of at most
/// `max_len` symbols
///
/// Every cover of size at most `max_len` is still found.
fn expand_bounded(sums: &[SymbolProduct], max_len: usize) -> Vec<SymbolProduct> {
    let mut ret = vec![SymbolProduct::default()];
    for (i, sum) in sums.iter().enumerate() {
        let symbols: Vec<Symbol> = sum.symbols().collect();
        let remaining = &sums[i + 1..];
        ret = distribute_filtered(&ret, &symbols, |p| {
            p.len() + missing_symbols(p, remaining) <= max_len
        });
        debug!("Petrick expansion step {}: {} products", i + 1, ret.len());
    }
    ret
}

/// Select the products of minimal cost
///
/// Products are compared by number of symbols first. All products of minimal size are kept,
/// unless the cost model also asks for the minimal number of literals.
pub fn minimal_products(
    products: Vec<SymbolProduct>,
    substitution: &Substitution,
    cost: CostModel,
) -> Vec<SymbolProduct> {
    let Some(min_len) = products.iter().map(|p| p.len()).min() else {
        return Vec::new();
    };
    let mut ret: Vec<SymbolProduct> = products
        .into_iter()
        .filter(|p| p.len() == min_len)
        .collect();
    if cost == CostModel::TermsThenLiterals {
        if let Some(min_lits) = ret.iter().map(|p| substitution.nb_literals(p)).min() {
            ret.retain(|p| substitution.nb_literals(p) == min_lits);
        }
    }
    ret.sort();
    ret.dedup();
    ret
}

/// Find all minimal sets of implicants covering the chart
///
/// Each solution is a list of implicants. An empty chart has a single, empty solution.
///
/// Sums that contain another sum are implied by it and dropped. The expansion then keeps only
/// the products that may still lead to a cover no larger than a greedy one; this never removes
/// a minimal cover.
pub fn solve(chart: &Chart, cost: CostModel) -> Vec<Vec<Term>> {
    let mut substitution = Substitution::default();
    let sums = substitution.substitute(chart);
    let sums = absorb(sums.into_iter().map(SymbolProduct::from_iter).collect());
    let max_len = greedy_cover_size(&sums);
    debug!(
        "Petrick's method on {} sums with {} implicants, greedy cover of {}",
        sums.len(),
        substitution.len(),
        max_len
    );
    let products = expand_bounded(&sums, max_len);
    let minimal = minimal_products(products, &substitution, cost);
    debug!(
        "Petrick's method found {} minimal solutions: {}",
        minimal.len(),
        minimal.iter().join(" + ")
    );
    minimal
        .iter()
        .map(|p| substitution.back_substitute(p))
        .collect()
}
