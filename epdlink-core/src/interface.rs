//! Chip-select / mode framing
//!
//! Every transaction asserts select (active low), sets the mode line
//! before the first byte of each phase (low = command, high = data) and
//! de-asserts select at the end. Select is released on every return path,
//! including transfer failures.

use epdlink_hal::OutputPin;

use crate::error::LinkError;
use crate::link::Link;

/// Opcode that makes the controller report its two-byte chip ID
pub const CHIP_ID_OPCODE: u8 = 0x70;

/// Meaning of the bytes in one phase of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Opcode bytes (mode line low)
    Command,
    /// Payload bytes (mode line high)
    Data,
}

/// Framing controller wrapping a link engine
pub struct Interface<L, CS, DC> {
    link: L,
    cs: CS,
    dc: DC,
}

impl<L, CS, DC> Interface<L, CS, DC>
where
    L: Link,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Create a new interface
    ///
    /// Select starts de-asserted.
    pub fn new(link: L, mut cs: CS, dc: DC) -> Self {
        cs.set_high();
        Self { link, cs, dc }
    }

    /// Send a single command byte
    pub fn send_command(&mut self, code: u8) -> Result<(), LinkError<L::Error>> {
        self.transaction(|link, dc| {
            set_kind(dc, FrameKind::Command);
            link.write_byte(code)
        })
    }

    /// Send a single data byte
    pub fn send_data(&mut self, value: u8) -> Result<(), LinkError<L::Error>> {
        self.transaction(|link, dc| {
            set_kind(dc, FrameKind::Data);
            link.write_byte(value)
        })
    }

    /// Send a command followed by its parameters in one transaction
    pub fn send_command_with_data(
        &mut self,
        code: u8,
        data: &[u8],
    ) -> Result<(), LinkError<L::Error>> {
        self.transaction(|link, dc| {
            set_kind(dc, FrameKind::Command);
            link.write_byte(code)?;
            if !data.is_empty() {
                set_kind(dc, FrameKind::Data);
                link.write_bytes(data)?;
            }
            Ok(())
        })
    }

    /// Send a command, then read `buf.len()` bytes in one transaction
    ///
    /// Fails with [`LinkError::Unsupported`] on write-only links before
    /// anything is put on the wire.
    pub fn read(&mut self, code: u8, buf: &mut [u8]) -> Result<(), LinkError<L::Error>> {
        if !L::CAN_READ {
            return Err(LinkError::Unsupported);
        }
        self.transaction(|link, dc| {
            set_kind(dc, FrameKind::Command);
            link.write_byte(code)?;
            set_kind(dc, FrameKind::Data);
            for byte in buf.iter_mut() {
                *byte = link.read_byte()?;
            }
            Ok(())
        })
    }

    /// Read the controller's two-byte chip ID, in the order received
    pub fn read_chip_id(&mut self) -> Result<(u8, u8), LinkError<L::Error>> {
        let mut id = [0u8; 2];
        self.read(CHIP_ID_OPCODE, &mut id)?;
        Ok((id[0], id[1]))
    }

    /// Access the underlying link engine
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Destroy the interface and return the link and lines
    pub fn release(self) -> (L, CS, DC) {
        (self.link, self.cs, self.dc)
    }

    /// Bracket `f` with select assertion
    fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut L, &mut DC) -> Result<T, LinkError<L::Error>>,
    ) -> Result<T, LinkError<L::Error>> {
        self.cs.set_low();
        let result = f(&mut self.link, &mut self.dc);
        self.cs.set_high();
        result
    }
}

fn set_kind<DC: OutputPin>(dc: &mut DC, kind: FrameKind) {
    match kind {
        FrameKind::Command => dc.set_low(),
        FrameKind::Data => dc.set_high(),
    }
}
