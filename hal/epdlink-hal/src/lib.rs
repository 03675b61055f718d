//! epdlink Hardware Abstraction Layer
//!
//! This crate defines the line and peripheral traits the link engine is
//! written against. Chip-specific crates implement them, so the same
//! protocol code runs on any board and against host-side simulators.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  epdlink-core (engines, framing, reset) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  epdlink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ epdlink-hal-  │       │  test mocks / │
//! │    rp2040     │       │  simulators   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Direction-switchable line (half-duplex data)
//! - [`spi::SpiBus`] - Synchronous buffer transfers

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{Direction, FlexPin, InputPin, OutputPin};
pub use spi::SpiBus;
