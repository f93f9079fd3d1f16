//! Exact two-level logic minimization
//!
//! This crate minimizes a single-output Boolean function, given by its minterms and
//! don't-cares, into minimal sums of products.
//! It uses the [Quine-McCluskey](https://en.wikipedia.org/wiki/Quine%E2%80%93McCluskey_algorithm)
//! tabulation method to find the prime implicants, selects the essential prime implicants, and
//! completes the cover with [Petrick's method](https://en.wikipedia.org/wiki/Petrick%27s_method).
//! The result is exact, but the method is exponential: for large functions, you should generally
//! use a heuristic minimizer such as Espresso.
//!
//! # Usage
//!
//! ```bash
//! # Show available commands
//! qmin help
//! # Minimize a function with minterms 1, 3, 7 and a don't-care at 5
//! qmin minimize -m 1 3 7 -d 5
//! # Show the grouping tables, the prime implicant chart and the essential implicants
//! qmin minimize -m 0 1 2 5 6 7 --trace
//! # Minimize a function described in a file
//! qmin minimize -f function.qm
//! # Stress test on random functions of 6 variables
//! qmin random --vars 6 -n 1000
//! ```
//!
//! # Development
//!
//! ## Algorithm
//!
//! Minimization is a pipeline where each step owns its data and hands the result to the next:
//! * [`tabulation`] groups the terms by number of ones and merges terms of adjacent groups,
//!   until no merge is possible. Terms that were never merged are the prime implicants;
//! * [`chart`] maps each required minterm to the prime implicants that cover it, then removes
//!   the minterms covered by essential prime implicants;
//! * [`petrick`] finds all minimal sets of implicants for the remaining minterms;
//! * [`expression`] assembles the essential implicants and each minimal set into a solution.
//!
//! All intermediate artifacts are kept in the [`Minimization`] result, and [`report`] renders
//! them as text.
//!
//! ## Datastructures
//!
//! [`Term`] is a fixed-width pattern of `0`, `1` and `-`, stored as two bitmasks.
//! Variables are named from the most significant bit: with 3 variables, minterm 4 is `AB'C'`.
//!
//! For example, here is a function whose chart has no essential implicant:
//! ```
//! # use qmin::{minimize, MinimizeOptions, Problem};
//! let problem = Problem::new(&[0, 1, 2, 5, 6, 7], &[]).unwrap();
//! let res = minimize(&problem, &MinimizeOptions::default()).unwrap();
//! assert!(res.essentials().is_empty());
//! // Two solutions with three terms each
//! assert_eq!(res.solutions().len(), 2);
//! for s in res.solutions() {
//!     assert_eq!(s.nb_terms(), 3);
//! }
//! ```

#![warn(missing_docs)]

pub mod chart;
pub mod error;
pub mod expression;
pub mod generators;
pub mod io;
pub mod literal;
pub mod minimize;
pub mod petrick;
pub mod report;
pub mod tabulation;
pub mod term;
pub mod verify;

pub use error::{Error, Result};
pub use expression::Expression;
pub use literal::{Literal, Product};
pub use minimize::{minimize, minimize_minterms, MinimizeOptions, Minimization, Problem};
pub use petrick::CostModel;
pub use term::Term;
