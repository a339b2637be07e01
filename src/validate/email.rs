//! E-mail address validation.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Local part (dotted atoms or a quoted string) `@` dotted domain with a 2+ char TLD.
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\.,;:\s@"]+(\.[^<>()\[\]\.,;:\s@"]+)*)|(".+"))@(([^<>()\[\]\.,;:\s@"]+\.)+[^<>()\[\]\.,;:\s@"]{2,})$"#;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(EMAIL_PATTERN)
        .case_insensitive(true)
        .build()
        .expect("e-mail pattern compiles")
});

/// Check that `email` looks like a deliverable address.
///
/// ```
/// use viewkit::validate::is_valid_email;
///
/// assert!(is_valid_email("backer@example.com"));
/// assert!(!is_valid_email("backer@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
