//! Sequence validation and permutation helpers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, TourForgeError};

/// Checks that every entry of `seq` lies in `[0, bound)` and none repeats.
///
/// `what` and `entry` name the container and its entries in error messages,
/// e.g. `"tour"` and `"vertex"`.
pub fn check_distinct_in_range(
    seq: &[usize],
    bound: usize,
    what: &'static str,
    entry: &'static str,
) -> Result<()> {
    let mut first_seen: Vec<Option<usize>> = vec![None; bound];
    for (position, &value) in seq.iter().enumerate() {
        if value >= bound {
            return Err(TourForgeError::OutOfRange {
                what,
                entry,
                position,
                value,
                max: bound.saturating_sub(1),
            });
        }
        if let Some(first) = first_seen[value] {
            return Err(TourForgeError::Duplicate {
                what,
                entry,
                value,
                first,
                second: position,
            });
        }
        first_seen[value] = Some(position);
    }
    Ok(())
}

/// Checks that `seq` is a permutation of `[0, n)`.
///
/// # Example
///
/// ```
/// use tourforge_core::validate::check_permutation;
///
/// assert!(check_permutation(&[2, 0, 1], 3).is_ok());
/// assert!(check_permutation(&[2, 0, 2], 3).is_err());
/// assert!(check_permutation(&[2, 0], 3).is_err());
/// ```
pub fn check_permutation(seq: &[usize], n: usize) -> Result<()> {
    if seq.len() != n {
        return Err(TourForgeError::LengthMismatch {
            what: "tour",
            expected: n,
            actual: seq.len(),
        });
    }
    check_distinct_in_range(seq, n, "tour", "vertex")
}

/// A uniformly random permutation of `[0, n)`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut seq: Vec<usize> = (0..n).collect();
    seq.shuffle(rng);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_out_of_range_reports_position_and_bound() {
        let err = check_permutation(&[0, 1, 9, 2], 4).unwrap_err();
        assert_eq!(
            err,
            TourForgeError::OutOfRange {
                what: "tour",
                entry: "vertex",
                position: 2,
                value: 9,
                max: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid tour because at position 2, the vertex is 9, which exceeds 3"
        );
    }

    #[test]
    fn test_duplicate_reports_both_positions() {
        let err = check_permutation(&[3, 1, 0, 1], 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid tour because vertex 1 appears at least twice (at tour positions 1 and 3)"
        );
    }

    #[test]
    fn test_length_mismatch() {
        let err = check_permutation(&[0, 1, 2], 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid tour because of mismatched length: expect 4 got 3"
        );
    }

    #[test]
    fn test_random_permutation_is_seeded() {
        let a = random_permutation(50, &mut ChaCha8Rng::seed_from_u64(7));
        let b = random_permutation(50, &mut ChaCha8Rng::seed_from_u64(7));

        assert_eq!(a, b);
        assert!(check_permutation(&a, 50).is_ok());
    }
}
