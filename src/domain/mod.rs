//! Domain layer types and invariants.

pub mod dast;
pub mod error;
pub mod records;
pub mod slug;
