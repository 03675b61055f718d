//! GPIO line wrappers
//!
//! Newtypes over the embassy-rp pin drivers. Pins are configured by the
//! caller (initial level, pull) before being wrapped.

use embassy_rp::gpio::{Flex, Input, Output};
use epdlink_hal::Direction;

/// Push-pull output line
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Wrap a configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }

    /// Return the wrapped driver
    pub fn into_inner(self) -> Output<'d> {
        self.0
    }
}

impl epdlink_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input line
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Wrap a configured input
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }

    /// Return the wrapped driver
    pub fn into_inner(self) -> Input<'d> {
        self.0
    }
}

impl epdlink_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Bidirectional line for the half-duplex data signal
///
/// Starts as an input so nothing is driven until the link claims it.
pub struct RpFlex<'d> {
    pin: Flex<'d>,
    direction: Direction,
}

impl<'d> RpFlex<'d> {
    /// Wrap a flex pin and switch it to input
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input();
        Self {
            pin,
            direction: Direction::Input,
        }
    }

    /// Return the wrapped driver
    pub fn into_inner(self) -> Flex<'d> {
        self.pin
    }
}

impl epdlink_hal::OutputPin for RpFlex<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl epdlink_hal::InputPin for RpFlex<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

impl epdlink_hal::FlexPin for RpFlex<'_> {
    fn set_as_output(&mut self) {
        self.pin.set_as_output();
        self.direction = Direction::Output;
    }

    fn set_as_input(&mut self) {
        self.pin.set_as_input();
        self.direction = Direction::Input;
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}
