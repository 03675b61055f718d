//! Hardware-assisted link
//!
//! Delegates bit-level transfer to an SPI peripheral. Only the transmit
//! side is wired to the display, so this engine is write-only.

use epdlink_hal::SpiBus;

use super::Link;
use crate::error::LinkError;

/// Write-only link engine over an SPI peripheral
pub struct SpiLink<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus> SpiLink<SPI> {
    /// Create a new hardware-assisted link
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Destroy the link and return the peripheral
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus> Link for SpiLink<SPI> {
    type Error = SPI::Error;

    // read_byte keeps the default: the receive side is not connected

    fn write_byte(&mut self, value: u8) -> Result<(), LinkError<SPI::Error>> {
        self.spi.write(&[value]).map_err(LinkError::Transfer)
    }
}
