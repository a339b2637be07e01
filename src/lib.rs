//! viewkit
//!
//! View-model helpers for admin dashboards: a frame-batched redraw scheduler,
//! observable state cells, paginated loading with error capture, and pure
//! document validators, masks and formatters.
//!
//! Everything stateful here is single-threaded by construction (`Rc`-based,
//! `!Send`) and meant to run on one cooperative event loop, typically a tokio
//! current-thread runtime with a `LocalSet`.
//!
//! ```
//! use viewkit::observable::ObservableValue;
//! use viewkit::scheduler::{FramePump, PumpOutcome, RedrawScheduler};
//!
//! let scheduler = RedrawScheduler::new();
//! let mut pump = FramePump::new(scheduler.clone(), || println!("render"));
//!
//! let title = ObservableValue::new(scheduler.clone(), String::new());
//! title.set("Monthly support".to_string());
//!
//! assert_eq!(pump.tick(), PumpOutcome::Rendered);
//! assert_eq!(pump.tick(), PumpOutcome::Idle);
//! ```

pub mod config;
pub mod format;
pub mod logging;
pub mod model;
pub mod observable;
pub mod pagination;
pub mod scheduler;
pub mod validate;
