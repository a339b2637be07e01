//! Domain model types (pure).
//!
//! Errors shared across modules and the page/filter values exchanged with loaders.

pub mod error;
pub mod page;

// Re-export for convenience
pub use error::{AppError, LoadError};
pub use page::{Direction, FilterParams, FilterSet, PageResult};
