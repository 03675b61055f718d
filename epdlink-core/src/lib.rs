//! Board-agnostic link layer for e-paper display controllers
//!
//! This crate contains everything between the pin traits and a display
//! driver, with no dependency on a specific MCU:
//!
//! - Link engines: bit-banged half-duplex and write-only SPI
//! - Chip-select / command-data framing
//! - Reset pulse sequence and BUSY synchronization
//! - Link configuration types (optionally parsed from TOML)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "toml")]
extern crate alloc;

pub mod config;
pub mod device;
pub mod error;
pub mod interface;
pub mod link;
pub mod reset;

#[cfg(test)]
mod sim;

pub use device::Epd;
pub use error::{BusyTimeout, LinkError};
pub use interface::{FrameKind, Interface, CHIP_ID_OPCODE};
pub use link::{BitBangLink, Link, SpiLink};
pub use reset::{ResetController, ResetReport, ResetState};
