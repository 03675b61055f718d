//! Link engines
//!
//! A link moves single bytes between the host and the display controller.
//! Two engines implement the same capability trait:
//!
//! - [`BitBangLink`] toggles a clock line and a shared half-duplex data line
//! - [`SpiLink`] hands each byte to a hardware SPI peripheral (write-only)
//!
//! Framing and reset are written once against [`Link`].

mod bitbang;
mod spi;

pub use bitbang::BitBangLink;
pub use spi::SpiLink;

use crate::error::LinkError;

/// Byte-level link capability
pub trait Link {
    /// Error type of the underlying transfer peripheral
    type Error;

    /// Whether [`Link::read_byte`] is available on this engine
    const CAN_READ: bool = false;

    /// Shift one byte out to the controller, MSB first
    fn write_byte(&mut self, value: u8) -> Result<(), LinkError<Self::Error>>;

    /// Shift one byte in from the controller, MSB first
    ///
    /// Write-only engines keep this default and report
    /// [`LinkError::Unsupported`] instead of returning a value.
    fn read_byte(&mut self) -> Result<u8, LinkError<Self::Error>> {
        Err(LinkError::Unsupported)
    }

    /// Write each byte in order
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), LinkError<Self::Error>> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}
