//! Document and form validation (pure).
//!
//! Validators are total: malformed input fails validation, nothing panics or errors.

pub mod cnpj;
pub mod cpf;
pub mod email;
pub mod form;

pub use cnpj::is_valid_cnpj;
pub use cpf::is_valid_cpf;
pub use email::is_valid_email;
pub use form::{Field, FieldError, FormValidator, Rule};

/// Decimal values of `input`, or `None` if any character is not an ASCII digit.
fn ascii_digits(input: &str) -> Option<Vec<u8>> {
    input
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect()
}

fn all_same(digits: &[u8]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}
