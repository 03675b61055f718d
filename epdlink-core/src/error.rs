//! Link error types

use core::convert::Infallible;

/// Errors reported by the link engines and everything built on them
///
/// `E` is the peripheral's own error type. The bit-banged engine drives
/// infallible lines, so its links use the default `Infallible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError<E = Infallible> {
    /// The transfer peripheral reported a failure
    Transfer(E),
    /// The active engine cannot perform this operation (read on a write-only link)
    Unsupported,
    /// BUSY did not report ready within a bounded wait
    BusyTimeout,
}

/// BUSY never reported ready within the bounded wait policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusyTimeout {
    /// Number of polls performed before giving up
    pub polls: u32,
}

impl<E> From<BusyTimeout> for LinkError<E> {
    fn from(_: BusyTimeout) -> Self {
        LinkError::BusyTimeout
    }
}
