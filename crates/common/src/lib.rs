//! Shared identifiers and spatial types used across the stagecraft crates.

mod types;

pub use types::{ComponentId, ObjectId, Transform};
