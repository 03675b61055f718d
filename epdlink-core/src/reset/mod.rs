//! Reset-to-ready synchronization
//!
//! Brings the display controller out of reset with a double pulse and
//! blocks until it raises BUSY.

mod controller;
mod state;

pub use controller::{ResetController, ResetReport};
pub use state::ResetState;
