//! Configuration type definitions
//!
//! All durations are in the units the timing collaborator takes them in:
//! nanoseconds for clock edges, milliseconds for reset holds and BUSY polls.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default busy-wait between clock edges (ns)
pub const DEFAULT_EDGE_DELAY_NS: u32 = 1_000;

/// Default reset-low hold time (ms)
pub const DEFAULT_ASSERT_MS: u32 = 20;

/// Default reset-high hold time (ms)
pub const DEFAULT_RELEASE_MS: u32 = 10;

/// Default settle time after BUSY reports ready (ms)
pub const DEFAULT_SETTLE_MS: u32 = 10;

/// Default BUSY poll interval (ms)
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1;

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Source text could not be parsed
    Parse,
    /// A value is out of range
    Invalid(&'static str),
}

/// How long to wait for the BUSY line to report ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BusyPolicy {
    /// Block until BUSY goes high, however long that takes
    #[default]
    Unbounded,
    /// Give up once the accumulated poll time reaches the timeout
    Bounded {
        /// Maximum wait in milliseconds
        timeout_ms: u32,
    },
}

impl BusyPolicy {
    /// Maximum number of polls before giving up, if bounded
    ///
    /// A partial interval still counts as a full poll.
    pub fn max_polls(&self, poll_interval_ms: u32) -> Option<u32> {
        match *self {
            BusyPolicy::Unbounded => None,
            BusyPolicy::Bounded { timeout_ms } => {
                let interval = poll_interval_ms.max(1);
                Some(timeout_ms.div_ceil(interval))
            }
        }
    }
}

/// Reset pulse and BUSY polling timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResetTiming {
    /// Hold time with reset driven low
    pub assert_ms: u32,
    /// Hold time with reset driven high
    pub release_ms: u32,
    /// Extra delay once BUSY reports ready
    pub settle_ms: u32,
    /// Interval between BUSY samples
    pub poll_interval_ms: u32,
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self {
            assert_ms: DEFAULT_ASSERT_MS,
            release_ms: DEFAULT_RELEASE_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Complete link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Busy-wait between clock edges on the bit-banged link
    pub edge_delay_ns: u32,
    /// Reset sequence timings
    pub reset: ResetTiming,
    /// BUSY wait policy
    pub busy: BusyPolicy,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            edge_delay_ns: DEFAULT_EDGE_DELAY_NS,
            reset: ResetTiming::default(),
            busy: BusyPolicy::Unbounded,
        }
    }
}

impl LinkConfig {
    /// Check the configuration for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reset.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("reset.poll_interval_ms must be > 0"));
        }
        if let BusyPolicy::Bounded { timeout_ms: 0 } = self.busy {
            return Err(ConfigError::Invalid("busy timeout_ms must be > 0"));
        }
        Ok(())
    }
}
