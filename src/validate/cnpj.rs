//! CNPJ (company taxpayer number) validation.

use super::all_same;

/// Validate a CNPJ, ignoring any non-digit characters.
///
/// ```
/// use viewkit::validate::is_valid_cnpj;
///
/// assert!(is_valid_cnpj("11.222.333/0001-81"));
/// assert!(is_valid_cnpj("11222333000181"));
/// assert!(!is_valid_cnpj("11222333000182"));
/// ```
pub fn is_valid_cnpj(input: &str) -> bool {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    if digits.len() != 14 || all_same(&digits) {
        return false;
    }

    check_digit(&digits[..12]) == digits[12] && check_digit(&digits[..13]) == digits[13]
}

/// Check digit over `digits`; weights run 2..=9 from the rightmost digit and wrap.
fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .zip((2u32..=9).cycle())
        .map(|(&digit, weight)| u32::from(digit) * weight)
        .sum();

    match sum % 11 {
        0 | 1 => 0,
        remainder => (11 - remainder) as u8,
    }
}
