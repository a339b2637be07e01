//! Display formatting and input masks (pure).

pub mod date;
pub mod mask;
pub mod number;
pub mod text;

// Re-export for convenience
pub use date::{format_date, format_timestamp, DEFAULT_DATE_FORMAT};
pub use mask::{apply_mask, apply_monetary_mask, monetary_to_float, no_numbers, numbers_only};
pub use number::{format_number, format_number_grouped, pluralize};
pub use text::{capitalize, simple_format};
