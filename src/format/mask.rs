//! Input masks applied while the user types.
//!
//! A fixed mask is a pattern where `9` accepts a digit, `A` accepts an ASCII letter
//! and every other character is a literal inserted automatically. Feeding a raw value
//! through [`apply_mask`] drops characters the pattern rejects and fills in literals.

/// Mask a value against a fixed pattern such as `999.999.999-99`.
///
/// ```
/// use viewkit::format::apply_mask;
///
/// assert_eq!(apply_mask("999.999.999-99", "11144477735"), "111.444.777-35");
/// assert_eq!(apply_mask("(99) 9999-9999", "11a33334444"), "(11) 3333-4444");
/// ```
pub fn apply_mask(pattern: &str, value: &str) -> String {
    let pattern: Vec<char> = pattern.chars().collect();
    let literals: Vec<(usize, char)> = pattern
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, c)| !is_placeholder(c))
        .collect();

    let mut masked = String::with_capacity(pattern.len());
    let mut len = 0;

    for ch in value.chars() {
        if !accepts(&pattern, len, ch) {
            continue;
        }
        // Literals are sorted, so consecutive ones chain as `len` grows.
        for &(position, literal) in &literals {
            if len == position && ch != literal {
                masked.push(literal);
                len += 1;
            }
        }
        masked.push(ch);
        len += 1;
    }

    masked
}

fn is_placeholder(c: char) -> bool {
    matches!(c, '9' | 'A')
}

/// Whether `ch` may be typed when the masked value has `position` chars.
///
/// A literal slot accepts itself or anything the next slot accepts.
fn accepts(pattern: &[char], position: usize, ch: char) -> bool {
    let mut position = position;
    while let Some(&slot) = pattern.get(position) {
        match slot {
            '9' => return ch.is_ascii_digit(),
            'A' => return ch.is_ascii_alphabetic(),
            literal if literal == ch => return true,
            _ => position += 1,
        }
    }
    false
}

/// Format a run of digits as a currency amount: the last two digits are cents,
/// thousands are separated by `.`.
///
/// ```
/// use viewkit::format::apply_monetary_mask;
///
/// assert_eq!(apply_monetary_mask("123456"), "1.234,56");
/// assert_eq!(apply_monetary_mask("R$ 10,00"), "10,00");
/// ```
pub fn apply_monetary_mask(input: &str) -> String {
    let digits = numbers_only(input);
    let split = digits.len().saturating_sub(2);
    let (integer, cents) = digits.split_at(split);
    format!("{},{}", super::number::group_digits(integer, 3, '.'), cents)
}

/// Keep only ASCII digits.
pub fn numbers_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Drop ASCII digits.
pub fn no_numbers(value: &str) -> String {
    value.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Parse a masked amount such as `1.234,56` back into a number.
///
/// Returns `None` when what remains is not a finite number.
pub fn monetary_to_float(value: &str) -> Option<f64> {
    let normalized: String = value
        .trim()
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|amount| amount.is_finite())
}
