//! Notation and arithmetic constants shared by every Lamina crate.

/// Smallest base for which the digit-shift map is a covering of the circle.
pub const MIN_BASE: u32 = 2;

/// Separates the exact digits from the repeating digits in fraction text.
///
/// # Examples
///
/// ```
/// use lamina_core::constants::REPEAT_MARKER;
/// assert_eq!(format!("1{REPEAT_MARKER}010"), "1_010");
/// ```
pub const REPEAT_MARKER: char = '_';

/// Separates individual digits in fraction text once the base needs
/// multi-character digits.
pub const DIGIT_DELIMITER: char = ',';

/// First base whose digits are written with [`DIGIT_DELIMITER`] between them.
pub const DELIMITED_BASE: u32 = 10;

/// Whether fraction text in `base` separates its digits with [`DIGIT_DELIMITER`].
///
/// # Examples
///
/// ```
/// use lamina_core::constants::uses_digit_delimiter;
/// assert!(!uses_digit_delimiter(3));
/// assert!(uses_digit_delimiter(10));
/// assert!(uses_digit_delimiter(12));
/// ```
pub fn uses_digit_delimiter(base: u32) -> bool {
    base >= DELIMITED_BASE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_is_the_smallest_base() {
        assert_eq!(MIN_BASE, 2);
    }

    #[test]
    fn delimiter_starts_at_decimal() {
        assert!(!uses_digit_delimiter(DELIMITED_BASE - 1));
        assert!(uses_digit_delimiter(DELIMITED_BASE));
    }

    #[test]
    fn markers_are_distinct() {
        assert_ne!(REPEAT_MARKER, DIGIT_DELIMITER);
    }
}
