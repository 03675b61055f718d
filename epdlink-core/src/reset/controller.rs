//! Reset/sync controller
//!
//! Drives the reset line through the pulse states and then polls BUSY
//! until it reads high ("ready"). The poll is unbounded unless a bounded
//! [`BusyPolicy`] is configured.

use embedded_hal::delay::DelayNs;
use epdlink_hal::{InputPin, OutputPin};

use super::state::ResetState;
use crate::config::{BusyPolicy, LinkConfig, ResetTiming};
use crate::error::BusyTimeout;

/// Summary of a completed reset sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetReport {
    /// BUSY samples taken before it read ready (including the ready one)
    pub busy_polls: u32,
}

/// Reset/sync controller
pub struct ResetController<RST, BUSY, D> {
    rst: RST,
    busy: BUSY,
    delay: D,
    timing: ResetTiming,
    policy: BusyPolicy,
    state: ResetState,
}

impl<RST, BUSY, D> ResetController<RST, BUSY, D>
where
    RST: OutputPin,
    BUSY: InputPin,
    D: DelayNs,
{
    /// Create a new controller with the default timings and an unbounded wait
    ///
    /// The reset line is not touched until [`run`](Self::run).
    pub fn new(rst: RST, busy: BUSY, delay: D) -> Self {
        Self {
            rst,
            busy,
            delay,
            timing: ResetTiming::default(),
            policy: BusyPolicy::Unbounded,
            state: ResetState::Idle,
        }
    }

    /// Create a new controller from a link configuration
    ///
    /// The config is taken as-is; run [`LinkConfig::validate`] on untrusted
    /// input. A zero poll interval is treated as 1 ms.
    pub fn with_config(rst: RST, busy: BUSY, delay: D, config: &LinkConfig) -> Self {
        let mut controller = Self::new(rst, busy, delay);
        controller.timing = config.reset;
        controller.policy = config.busy;
        controller
    }

    /// Replace the BUSY wait policy
    pub fn set_busy_policy(&mut self, policy: BusyPolicy) {
        self.policy = policy;
    }

    /// State reached by the last [`run`](Self::run)
    ///
    /// A standalone [`wait_ready`](Self::wait_ready) leaves this unchanged.
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Run the complete reset sequence
    ///
    /// Always starts again from `Idle`. Returns once BUSY has read ready
    /// and the settle delay has elapsed. Under a bounded policy the
    /// controller is left in `AwaitingBusy` when the wait times out.
    pub fn run(&mut self) -> Result<ResetReport, BusyTimeout> {
        self.state = ResetState::Idle;
        let mut busy_polls = 0;

        while let Some(next) = self.state.next() {
            self.state = next;
            match next {
                ResetState::AwaitingBusy => {
                    busy_polls = self.poll_busy()?;
                }
                ResetState::Ready => {
                    self.delay.delay_ms(self.timing.settle_ms);
                }
                _ => self.pulse(next),
            }
        }

        Ok(ResetReport { busy_polls })
    }

    /// Block until BUSY reads ready
    ///
    /// Returns the number of samples taken. Used on its own after commands
    /// that keep the controller busy.
    pub fn wait_ready(&mut self) -> Result<u32, BusyTimeout> {
        self.poll_busy()
    }

    /// Destroy the controller and return the owned lines and delay
    pub fn release(self) -> (RST, BUSY, D) {
        (self.rst, self.busy, self.delay)
    }

    fn pulse(&mut self, state: ResetState) {
        match state.reset_level() {
            Some(false) => {
                self.rst.set_low();
                self.delay.delay_ms(self.timing.assert_ms);
            }
            Some(true) => {
                self.rst.set_high();
                self.delay.delay_ms(self.timing.release_ms);
            }
            None => {}
        }
    }

    fn poll_busy(&mut self) -> Result<u32, BusyTimeout> {
        let interval = self.timing.poll_interval_ms.max(1);
        let max_polls = self.policy.max_polls(interval);

        #[cfg(feature = "defmt")]
        defmt::debug!("Waiting for BUSY to go HIGH...");

        let mut polls = 0u32;
        loop {
            polls = polls.saturating_add(1);
            if self.busy.is_high() {
                break;
            }
            if max_polls.is_some_and(|max| polls >= max) {
                #[cfg(feature = "defmt")]
                defmt::warn!("BUSY still low after {} polls, giving up", polls);
                return Err(BusyTimeout { polls });
            }
            self.delay.delay_ms(interval);

            #[cfg(feature = "defmt")]
            {
                if polls & 127 == 0 {
                    defmt::debug!("BUSY still low, polls={}", polls);
                }
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("BUSY is HIGH after {} polls", polls);

        Ok(polls)
    }
}
