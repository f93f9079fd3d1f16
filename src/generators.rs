//! Problem generators and templates

/// Random functions
pub mod random {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::error::{Error, Result};
    use crate::minimize::Problem;

    /// Maximum number of variables for a random function
    pub const MAX_VARIABLES: usize = 24;

    /// A random function on `width` variables
    ///
    /// Each minterm is required with probability `density`, and a don't-care with probability
    /// `dc_density`. At least one minterm is required.
    pub fn function(width: usize, density: f64, dc_density: f64, seed: u64) -> Result<Problem> {
        if width > MAX_VARIABLES {
            return Err(Error::TooManyVariables {
                width,
                max: MAX_VARIABLES,
            });
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut minterms = Vec::new();
        let mut dont_cares = Vec::new();
        for m in 0..(1u32 << width) {
            let r: f64 = rng.gen();
            if r < density {
                minterms.push(m);
            } else if r < density + dc_density {
                dont_cares.push(m);
            }
        }
        if minterms.is_empty() {
            minterms.push(rng.gen_range(0..(1u32 << width)));
        }
        Problem::new(&minterms, &dont_cares)?.with_width(width)
    }
}

/// Classical functions, used to test functionality
pub mod testcases {
    use crate::error::Result;
    use crate::minimize::Problem;

    /// Odd parity: no two minterms can be merged
    pub fn parity(width: usize) -> Result<Problem> {
        let minterms: Vec<u32> = (0..(1u32 << width))
            .filter(|m| m.count_ones() % 2 == 1)
            .collect();
        Problem::new(&minterms, &[])?.with_width(width)
    }

    /// Threshold function: true when at least `k` inputs are true
    pub fn threshold(width: usize, k: u32) -> Result<Problem> {
        let minterms: Vec<u32> = (0..(1u32 << width))
            .filter(|m| m.count_ones() >= k)
            .collect();
        Problem::new(&minterms, &[])?.with_width(width)
    }

    /// Cyclic function of three variables, with no essential prime implicant
    pub fn cyclic() -> Result<Problem> {
        Problem::new(&[0, 1, 2, 5, 6, 7], &[])
    }

    /// Seven-segment decoder, segment `a`, for BCD inputs; codes 10 to 15 are don't-cares
    pub fn seven_segment_a() -> Result<Problem> {
        Problem::new(&[0, 2, 3, 5, 6, 7, 8, 9], &[10, 11, 12, 13, 14, 15])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random() {
        let a = random::function(6, 0.4, 0.1, 1).unwrap();
        let b = random::function(6, 0.4, 0.1, 1).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.width(), 6);
        let sparse = random::function(5, 0.0, 0.0, 3).unwrap();
        assert_eq!(sparse.minterms().len(), 1);
        assert_eq!(sparse.width(), 5);
        assert!(random::function(25, 0.5, 0.0, 1).is_err());
    }

    #[test]
    fn test_testcases() {
        let p = testcases::parity(4).unwrap();
        assert_eq!(p.minterms().len(), 8);
        assert_eq!(p.width(), 4);
        let t = testcases::threshold(3, 2).unwrap();
        assert_eq!(t.minterms(), &[3, 5, 6, 7]);
        assert_eq!(testcases::seven_segment_a().unwrap().width(), 4);
    }
}
