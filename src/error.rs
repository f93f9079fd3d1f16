//! Error types for minimization

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by minimization and its input layer
#[derive(Error, Debug)]
pub enum Error {
    /// No required minterm was given
    #[error("At least one minterm is required")]
    EmptyMinterms,

    /// A minterm index was negative
    #[error("Minterm {0} is negative")]
    NegativeMinterm(i64),

    /// The minterms need more variables than a term can hold
    #[error("Minterms require {width} variables, at most {max} are supported")]
    TooManyVariables {
        /// Number of variables required
        width: usize,
        /// Maximum number of variables supported
        max: usize,
    },

    /// A minterm does not fit on the requested number of variables
    #[error("Minterm {minterm} does not fit on {width} variables")]
    MintermOutOfRange {
        /// The minterm
        minterm: u64,
        /// Number of variables
        width: usize,
    },

    /// A required minterm is covered by no prime implicant
    ///
    /// This is a defect in tabulation, never a property of the input.
    #[error("Minterm {minterm} is not covered by any prime implicant")]
    Uncoverable {
        /// The minterm left without a cover
        minterm: u32,
    },

    /// An assembled expression does not implement the function
    #[error("Expression is wrong at minterm {minterm}: expected {expected}")]
    InvalidCover {
        /// First minterm where the expression disagrees with the function
        minterm: u32,
        /// Value the function takes at this minterm
        expected: bool,
    },

    /// Syntax error in a problem file
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
