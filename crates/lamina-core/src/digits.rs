//! Digit-sequence algorithms behind fraction canonicalisation.
//!
//! A circular fraction is an exact digit prefix followed by a repeating
//! cycle. Two different splits can describe the same infinite expansion, so
//! the canonical split is found in two passes:
//!
//! 1. Reduce the cycle to its minimal period using the prefix-function
//!    (failure table) from Knuth-Morris-Pratt.
//! 2. Absorb the longest suffix of the exact prefix that already follows the
//!    cycle, rotating the cycle so it starts where periodicity really begins.
//!
//! Everything here works on plain slices; the base-specific normalisations
//! (`_0`, `_(b-1)`, trailing zeros) live in [`crate::fraction`].

use num_bigint::BigUint;
use num_traits::Zero;

/// Prefix function of `sequence`.
///
/// `table[i]` is the length of the longest proper prefix of
/// `sequence[..=i]` that is also a suffix of it.
pub fn failure_table<T: PartialEq>(sequence: &[T]) -> Vec<usize> {
    let mut table = vec![0; sequence.len()];
    let mut prefix_end = 0; // exclusive
    let mut cursor = 1;

    while cursor < sequence.len() {
        if sequence[cursor] == sequence[prefix_end] {
            prefix_end += 1;
            table[cursor] = prefix_end;
            cursor += 1;
        } else if prefix_end == 0 {
            table[cursor] = 0;
            cursor += 1;
        } else {
            // Fall back to the longest border of the current border.
            prefix_end = table[prefix_end - 1];
        }
    }

    table
}

/// Length of the shortest word `w` such that `sequence` is `w` repeated a
/// whole number of times. Returns `sequence.len()` for aperiodic input and
/// `0` for the empty sequence.
pub fn minimal_period<T: PartialEq>(sequence: &[T]) -> usize {
    let size = sequence.len();
    if size == 0 {
        return 0;
    }

    let table = failure_table(sequence);
    let candidate = size - table[size - 1];
    if size % candidate == 0 { candidate } else { size }
}

/// Shortest contiguous prefix whose repetition reproduces `sequence`.
///
/// ```
/// use lamina_core::digits::reduce_circular_sequence;
/// assert_eq!(reduce_circular_sequence(&[3, 3, 3]), vec![3]);
/// assert_eq!(reduce_circular_sequence(&[1, 2, 3, 1, 2, 3]), vec![1, 2, 3]);
/// assert_eq!(reduce_circular_sequence(&[1, 2, 3, 1, 2]), vec![1, 2, 3, 1, 2]);
/// ```
pub fn reduce_circular_sequence<T: PartialEq + Clone>(sequence: &[T]) -> Vec<T> {
    sequence[..minimal_period(sequence)].to_vec()
}

/// Smallest index `i` such that `sequence[i..]` followed by endless copies of
/// `repeating` equals endless copies of `repeating` (aligned at the end).
///
/// Compares from the right, walking `repeating` cyclically. An empty
/// `repeating` absorbs nothing, so the result is `sequence.len()`.
pub fn circular_repeating_suffix<T: PartialEq>(sequence: &[T], repeating: &[T]) -> usize {
    if repeating.is_empty() {
        return sequence.len();
    }

    for cursor in 0..sequence.len() {
        let sequence_idx = sequence.len() - cursor - 1;
        let repeating_idx = repeating.len() - (cursor % repeating.len()) - 1;
        if sequence[sequence_idx] != repeating[repeating_idx] {
            return sequence_idx + 1;
        }
    }

    0
}

/// Rotate right by `offset`: `[1, 2, 3]` by 1 becomes `[3, 1, 2]`.
pub fn rotate_right<T: Clone>(sequence: &[T], offset: usize) -> Vec<T> {
    let mut rotated = sequence.to_vec();
    if !rotated.is_empty() {
        let len = rotated.len();
        rotated.rotate_right(offset % len);
    }
    rotated
}

/// Rotate left by `offset`: `[1, 2, 3]` by 1 becomes `[2, 3, 1]`.
pub fn rotate_left<T: Clone>(sequence: &[T], offset: usize) -> Vec<T> {
    let mut rotated = sequence.to_vec();
    if !rotated.is_empty() {
        let len = rotated.len();
        rotated.rotate_left(offset % len);
    }
    rotated
}

/// Move the exact/repeating split as far left as it can go and reduce the
/// cycle to its minimal period.
///
/// ```
/// use lamina_core::digits::simplify;
/// assert_eq!(simplify(&[1], &[0, 2, 1]), (vec![], vec![1, 0, 2]));
/// assert_eq!(
///     simplify(&[3, 1, 1, 0, 2, 1, 0, 2, 1], &[0, 2, 1, 0, 2, 1]),
///     (vec![3, 1], vec![1, 0, 2]),
/// );
/// ```
pub fn simplify(exact: &[u32], repeating: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let repeating = reduce_circular_sequence(repeating);
    let cut = circular_repeating_suffix(exact, &repeating);
    let absorbed = exact.len() - cut;
    (exact[..cut].to_vec(), rotate_right(&repeating, absorbed))
}

/// Add one unit in the last place, carrying leftwards. A carry out of the
/// leading digit is dropped, which is the wrap from 1 back to 0 on the circle.
pub fn increment_digits(base: u32, digits: &[u32]) -> Vec<u32> {
    let mut result = digits.to_vec();
    for digit in result.iter_mut().rev() {
        *digit += 1;
        if *digit < base {
            return result;
        }
        *digit = 0;
    }
    result
}

/// Drop trailing zero digits of a terminating expansion.
pub fn strip_trailing_zeros(digits: &mut Vec<u32>) {
    while digits.last() == Some(&0) {
        digits.pop();
    }
}

/// Integer value of `digits` read as a big-endian numeral in `base`.
pub fn value_of_digits(base: u32, digits: &[u32]) -> BigUint {
    let radix = BigUint::from(base);
    digits.iter().fold(BigUint::zero(), |acc, &digit| acc * &radix + BigUint::from(digit))
}
