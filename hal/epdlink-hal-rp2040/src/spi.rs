//! Blocking SPI master wrapper
//!
//! The link engine hands over one byte at a time and waits for it to
//! leave the shifter, so only the blocking driver is wrapped.

use embassy_rp::spi::{self, Blocking, Instance, Spi};
use epdlink_hal::spi::{Mode, Phase, Polarity, SpiConfig};

/// SPI master in blocking mode
pub struct RpSpi<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    /// Wrap a configured blocking SPI driver
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self { spi }
    }

    /// Return the wrapped driver
    pub fn into_inner(self) -> Spi<'d, T, Blocking> {
        self.spi
    }
}

impl<T: Instance> epdlink_hal::SpiBus for RpSpi<'_, T> {
    type Error = spi::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.spi.blocking_transfer(read, write)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.blocking_write(data)
    }
}

/// Convert the shared SPI settings to an embassy-rp config
pub fn to_rp_config(config: &SpiConfig) -> spi::Config {
    let (polarity, phase) = <(Polarity, Phase)>::from(config.mode);

    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}

/// Default config for e-paper controllers: 4 MHz, mode 0
pub fn default_config() -> spi::Config {
    to_rp_config(&SpiConfig {
        mode: Mode::Mode0,
        ..SpiConfig::default()
    })
}
