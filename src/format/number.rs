//! Number formatting for display.

/// Format with `.` between thousands and `,` before decimals.
///
/// ```
/// use viewkit::format::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
/// assert_eq!(format_number(-950.0, 0), "-950");
/// ```
pub fn format_number(number: f64, decimals: usize) -> String {
    format_number_grouped(number, decimals, 3)
}

/// Like [`format_number`] with a custom digit group size.
pub fn format_number_grouped(number: f64, decimals: usize, group: usize) -> String {
    if !number.is_finite() {
        return number.to_string();
    }

    let fixed = format!("{number:.decimals$}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::from(sign);
    out.push_str(&group_digits(integer, group, '.'));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Insert `separator` every `group` digits counting from the right.
pub(crate) fn group_digits(digits: &str, group: usize, separator: char) -> String {
    let group = group.max(1);
    let count = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + count / group);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (count - i) % group == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
    out
}

/// `count` followed by the singular suffix for 0 or 1, the plural suffix otherwise.
///
/// Suffixes are appended verbatim, so include any leading space.
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    if count > 1 {
        format!("{count}{plural}")
    } else {
        format!("{count}{singular}")
    }
}
