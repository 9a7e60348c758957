//! Shared types for the gripspace crates.
//!
//! # Invariants
//! - `Transform` composition follows parent-then-child order.
//! - Entity identity is by `EntityId` only; no type carries ownership of another entity.

mod types;

pub use types::{EntityId, Tint, Transform};
