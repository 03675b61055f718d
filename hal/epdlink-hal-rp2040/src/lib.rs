//! RP2040-specific HAL for the e-paper link
//!
//! This crate wraps embassy-rp peripherals in the shared `epdlink-hal`
//! traits:
//!
//! - Push-pull outputs, inputs and the direction-switched data line
//! - Blocking SPI master (TX-only or full duplex)

#![no_std]

pub mod gpio;
pub mod spi;

// Re-export shared traits from epdlink-hal for convenience
pub use epdlink_hal::{FlexPin, InputPin, OutputPin, SpiBus};
