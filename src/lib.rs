//! Augur - market analytics engine
//!
//! Derives indicators, sentiment, risk, short-horizon projections and
//! trade recommendations from a bounded price history.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use services::analytics::{analyze, compute_indicators};
pub use types::*;
