//! Reset sequence states
//!
//! The sequence is linear: two reset pulses, a BUSY wait, then ready.

/// Reset/sync controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetState {
    /// No sequence in progress
    #[default]
    Idle,
    /// First pulse: reset driven low
    AssertingReset,
    /// First pulse released: reset driven high
    Released1,
    /// Second pulse: reset driven low
    AssertingReset2,
    /// Second pulse released: reset driven high
    Released2,
    /// Polling BUSY for the ready level
    AwaitingBusy,
    /// BUSY reported ready and the settle delay elapsed
    Ready,
}

impl ResetState {
    /// State that follows this one, or `None` once ready
    pub fn next(self) -> Option<Self> {
        use ResetState::*;

        match self {
            Idle => Some(AssertingReset),
            AssertingReset => Some(Released1),
            Released1 => Some(AssertingReset2),
            AssertingReset2 => Some(Released2),
            Released2 => Some(AwaitingBusy),
            AwaitingBusy => Some(Ready),
            Ready => None,
        }
    }

    /// Level the reset line is driven to on entry (true = high)
    pub fn reset_level(self) -> Option<bool> {
        match self {
            ResetState::AssertingReset | ResetState::AssertingReset2 => Some(false),
            ResetState::Released1 | ResetState::Released2 => Some(true),
            _ => None,
        }
    }

    /// Check if the controller reported ready
    pub fn is_ready(self) -> bool {
        self == ResetState::Ready
    }
}
