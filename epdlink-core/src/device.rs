//! Display device facade
//!
//! Bundles the framing interface and the reset controller into the one
//! object a caller brings up: configure lines, `init()`, then exchange
//! bytes.

use embedded_hal::delay::DelayNs;
use epdlink_hal::{InputPin, OutputPin};

use crate::error::LinkError;
use crate::interface::Interface;
use crate::link::Link;
use crate::reset::{ResetController, ResetReport};

/// e-paper controller handle
pub struct Epd<L, CS, DC, RST, BUSY, D> {
    interface: Interface<L, CS, DC>,
    reset: ResetController<RST, BUSY, D>,
}

impl<L, CS, DC, RST, BUSY, D> Epd<L, CS, DC, RST, BUSY, D>
where
    L: Link,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    /// Create a new device handle
    pub fn new(interface: Interface<L, CS, DC>, reset: ResetController<RST, BUSY, D>) -> Self {
        Self { interface, reset }
    }

    /// Run the reset sequence and wait for the controller to become ready
    pub fn init(&mut self) -> Result<ResetReport, LinkError<L::Error>> {
        Ok(self.reset.run()?)
    }

    /// Block until BUSY reports ready
    pub fn wait_ready(&mut self) -> Result<u32, LinkError<L::Error>> {
        Ok(self.reset.wait_ready()?)
    }

    /// Send a single command byte
    pub fn send_command(&mut self, code: u8) -> Result<(), LinkError<L::Error>> {
        self.interface.send_command(code)
    }

    /// Send a single data byte
    pub fn send_data(&mut self, value: u8) -> Result<(), LinkError<L::Error>> {
        self.interface.send_data(value)
    }

    /// Send a command followed by its parameters
    pub fn send_command_with_data(
        &mut self,
        code: u8,
        data: &[u8],
    ) -> Result<(), LinkError<L::Error>> {
        self.interface.send_command_with_data(code, data)
    }

    /// Read the two-byte chip ID (read-capable links only)
    pub fn read_chip_id(&mut self) -> Result<(u8, u8), LinkError<L::Error>> {
        self.interface.read_chip_id()
    }

    /// Access the framing interface
    pub fn interface_mut(&mut self) -> &mut Interface<L, CS, DC> {
        &mut self.interface
    }

    /// Destroy the handle and return its parts
    pub fn release(self) -> (Interface<L, CS, DC>, ResetController<RST, BUSY, D>) {
        (self.interface, self.reset)
    }
}
