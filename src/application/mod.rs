//! Application services: content access, rendering, and page assembly.

pub mod articles;
pub mod content;
pub mod error;
pub mod render;
