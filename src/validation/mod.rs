//! Construction-time validation of sequences.
//!
//! Uses Stillwater's `Validation` to accumulate every violation instead of
//! stopping at the first bad sub-behavior.

pub mod rules;
pub mod violations;

pub use rules::{check_sequence, validate_sequence};
pub use violations::ConfigViolation;
