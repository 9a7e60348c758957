//! Input: named-action edge/level queries consumed by the grip core.
//!
//! # Invariants
//! - `pressed` and `released` are true for exactly one frame per edge.
//! - `holding` is true on every frame the action is down, including the pressed frame.
//! - An action that was never reported reads as up with no edges.

pub mod action;
mod tracker;

pub use action::GripAction;
pub use tracker::ButtonTracker;

/// Per-frame query surface over named actions.
///
/// Hosts adapt their controller API to this trait. The grip core only ever
/// reads from it, once per frame, after the host has advanced its state.
pub trait InputSource {
    /// The action went down this frame.
    fn pressed(&self, action: &str) -> bool;
    /// The action went up this frame.
    fn released(&self, action: &str) -> bool;
    /// The action is currently down.
    fn holding(&self, action: &str) -> bool;
}
