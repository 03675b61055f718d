//! GPIO line abstractions
//!
//! Provides traits for the logical lines the link engine drives and samples.
//! Lines are owned handles; whoever holds the `&mut` is the only user.

/// Direction of a line that can be reconfigured at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Line is driven by the host
    Output,
    /// Line is sampled by the host
    Input,
}

/// Digital output line
///
/// Implementations should handle the actual register writes for the
/// specific chip.
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the line was last driven high
    fn is_set_high(&self) -> bool;

    /// Check if the line was last driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input line
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Line whose direction is switched at runtime
///
/// Used for the shared data line of a half-duplex link. A line is never
/// driven and sampled at the same time: callers must switch direction
/// before changing roles.
pub trait FlexPin: OutputPin + InputPin {
    /// Configure the line as a driven output
    fn set_as_output(&mut self);

    /// Configure the line as a sampled input
    fn set_as_input(&mut self);

    /// Current direction of the line
    fn direction(&self) -> Direction;

    /// Configure the line for the given direction
    fn set_direction(&mut self, direction: Direction) {
        match direction {
            Direction::Output => self.set_as_output(),
            Direction::Input => self.set_as_input(),
        }
    }
}
