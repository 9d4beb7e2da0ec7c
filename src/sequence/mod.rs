//! Numeric core: sequence generation and divisibility checking.
//!
//! Everything in this module is total over the integers - zero and negative
//! parameters, degenerate all-zero sequences, and max_n = 0 all produce
//! well-defined results without panicking.

pub mod divisibility;
pub mod generator;

// Re-export main types for easier access
pub use divisibility::{check, CheckOutcome};
pub use generator::generate;
