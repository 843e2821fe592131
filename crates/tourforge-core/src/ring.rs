//! In-place reversal of cyclic ranges.
//!
//! A range `[start, end]` is inclusive and may wrap: `start < len` and
//! `end` may run past the last index, positions being taken modulo `len`.
//! `end + 1 == start` denotes the empty range.

use tracing::{trace, warn};

use crate::error::{Result, TourForgeError};

fn segment_len(len: usize, start: usize, end: usize) -> Result<usize> {
    if start >= len {
        return Err(TourForgeError::invalid_operation(format!(
            "range start {start} is outside a ring of length {len}"
        )));
    }
    if end + 1 < start || end >= start + len {
        return Err(TourForgeError::invalid_operation(format!(
            "range [{start}, {end}] is not a cyclic range of a ring of length {len}"
        )));
    }
    Ok(end + 1 - start)
}

/// Reverses exactly the inclusive cyclic range `[start, end]` of `ring`.
///
/// Runs in O(range length).
///
/// # Example
///
/// ```
/// use tourforge_core::ring::reverse_strict;
///
/// let mut ring = [0, 1, 2, 3, 4, 5];
/// reverse_strict(&mut ring, 4, 7).unwrap();
/// assert_eq!(ring, [5, 4, 2, 3, 1, 0]);
/// ```
pub fn reverse_strict<T>(ring: &mut [T], start: usize, end: usize) -> Result<()> {
    let len = ring.len();
    let seg_len = segment_len(len, start, end)?;

    match seg_len {
        0 => warn!(start, end, len, "empty range requested; ring left unchanged"),
        1 => {}
        2 => ring.swap(start, end % len),
        _ if end < len => ring[start..=end].reverse(),
        _ => {
            for k in 0..seg_len / 2 {
                ring.swap((start + k) % len, (end - k) % len);
            }
        }
    }
    Ok(())
}

/// Reverses `[start, end]` or its complement, whichever is shorter.
///
/// Both choices leave the same cycle up to orientation. Returns `true` when
/// `[start, end]` itself was reversed and `false` when the complement
/// `[end + 1, start + len - 1]` was.
pub fn reverse_smart<T>(ring: &mut [T], start: usize, end: usize) -> Result<bool> {
    let len = ring.len();
    let seg_len = segment_len(len, start, end)?;

    if 2 * seg_len <= len {
        reverse_strict(ring, start, end)?;
        return Ok(true);
    }

    let comp_start = (end + 1) % len;
    let comp_len = len - seg_len;
    trace!(start, end, comp_len, "reversing complement");
    if comp_len > 0 {
        reverse_strict(ring, comp_start, comp_start + comp_len - 1)?;
    }
    Ok(false)
}
