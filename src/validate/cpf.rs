//! CPF (individual taxpayer number) validation.

use super::{all_same, ascii_digits};

/// Validate an 11-digit CPF.
///
/// The input is taken as-is: separators such as `.` or `-` make it invalid, so
/// callers holding a formatted CPF should strip it first (see
/// [`numbers_only`](crate::format::numbers_only)). Numbers made of one repeated
/// digit pass the checksum but are never issued, so they are rejected.
///
/// ```
/// use viewkit::validate::is_valid_cpf;
///
/// assert!(is_valid_cpf("11144477735"));
/// assert!(!is_valid_cpf("11144477736"));
/// assert!(!is_valid_cpf("111.444.777-35"));
/// ```
pub fn is_valid_cpf(input: &str) -> bool {
    let Some(digits) = ascii_digits(input) else {
        return false;
    };
    if digits.len() != 11 || all_same(&digits) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Check digit over `digits`, weighting the rightmost digit 2 and counting up leftwards.
fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip(2u32..)
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();

    match (sum * 10) % 11 {
        10 => 0,
        remainder => remainder as u8,
    }
}
