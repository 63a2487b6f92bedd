//! # Join Strategy Hints
//!
//! Hint values shared by the analyzer and optimizer hint passes.
//!
//! - [`strategy`]: the closed set of join strategies and alias resolution
//! - [`hint_info`]: a single resolved hint and the merge policy
//! - [`join_hint`]: the per-side hints of one join
//! - [`error_handler`]: the non-fatal diagnostic callbacks

pub mod error_handler;
pub mod errors;
pub mod hint_info;
pub mod join_hint;
pub mod strategy;

pub use error_handler::{
    CollectingHintErrorHandler, HintErrorHandler, LoggingHintErrorHandler, NoopHintErrorHandler,
};
pub use errors::HintDiagnostic;
pub use hint_info::HintInfo;
pub use join_hint::JoinHint;
pub use strategy::{JoinStrategy, StrategyCatalog};
