//! Bit-banged half-duplex link
//!
//! Shifts bytes over a clock line and a single data line whose direction
//! is switched between writes and reads. Data changes while the clock is
//! low and is sampled on the rising edge, in both directions.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use epdlink_hal::{FlexPin, OutputPin};

use super::Link;
use crate::config::{LinkConfig, DEFAULT_EDGE_DELAY_NS};
use crate::error::LinkError;

/// Software link engine
pub struct BitBangLink<CLK, DATA, D> {
    clk: CLK,
    data: DATA,
    delay: D,
    /// Busy-wait between clock edges (ns)
    edge_delay_ns: u32,
}

impl<CLK, DATA, D> BitBangLink<CLK, DATA, D>
where
    CLK: OutputPin,
    DATA: FlexPin,
    D: DelayNs,
{
    /// Create a new bit-banged link with the default edge delay
    ///
    /// The clock is driven low so the first edge of a transfer is a
    /// rising one.
    pub fn new(mut clk: CLK, data: DATA, delay: D) -> Self {
        clk.set_low();
        Self {
            clk,
            data,
            delay,
            edge_delay_ns: DEFAULT_EDGE_DELAY_NS,
        }
    }

    /// Create a new bit-banged link using the configured edge delay
    pub fn with_config(clk: CLK, data: DATA, delay: D, config: &LinkConfig) -> Self {
        let mut link = Self::new(clk, data, delay);
        link.set_edge_delay_ns(config.edge_delay_ns);
        link
    }

    /// Set the busy-wait between clock edges
    pub fn set_edge_delay_ns(&mut self, ns: u32) {
        self.edge_delay_ns = ns;
    }

    /// Current busy-wait between clock edges
    pub fn edge_delay_ns(&self) -> u32 {
        self.edge_delay_ns
    }

    /// Destroy the link and return the owned lines and delay
    pub fn release(self) -> (CLK, DATA, D) {
        (self.clk, self.data, self.delay)
    }

    #[inline(always)]
    fn edge_delay(&mut self) {
        self.delay.delay_ns(self.edge_delay_ns);
    }
}

impl<CLK, DATA, D> Link for BitBangLink<CLK, DATA, D>
where
    CLK: OutputPin,
    DATA: FlexPin,
    D: DelayNs,
{
    type Error = Infallible;

    const CAN_READ: bool = true;

    fn write_byte(&mut self, mut value: u8) -> Result<(), LinkError> {
        self.data.set_as_output();
        for _ in 0..8 {
            self.clk.set_low();
            self.data.set_state(value & 0x80 != 0);
            self.edge_delay();
            self.clk.set_high();
            self.edge_delay();
            value <<= 1;
        }
        self.clk.set_low();
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, LinkError> {
        let mut value = 0u8;
        self.data.set_as_input();
        for _ in 0..8 {
            self.clk.set_low();
            self.edge_delay();
            self.clk.set_high();
            value <<= 1;
            if self.data.is_high() {
                value |= 0x01;
            }
            self.edge_delay();
        }
        self.clk.set_low();
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Event, SimClock, SimData, SimDelay, Wire};
    use epdlink_hal::Direction;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_write_then_loopback_read(value: u8) {
            let wire = Wire::new().with_loopback();
            let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

            link.write_byte(value).unwrap();
            prop_assert_eq!(wire.frames().len(), 1);
            prop_assert_eq!(wire.frames()[0].value, value);
            prop_assert_eq!(link.read_byte().unwrap(), value);
        }

        #[test]
        fn test_msb_first(value: u8) {
            let wire = Wire::new();
            let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

            link.write_byte(value).unwrap();

            let edges = wire.write_edges();
            prop_assert_eq!(edges.len(), 8);
            for (i, &bit) in edges.iter().enumerate() {
                // Pulse i carries bit 7 - i
                prop_assert_eq!(bit, value & (0x80 >> i) != 0);
            }
        }
    }

    #[test]
    fn test_write_leaves_clock_low() {
        let wire = Wire::new();
        let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

        link.write_byte(0xFF).unwrap();
        assert!(!wire.clock_is_high());

        link.read_byte().unwrap();
        assert!(!wire.clock_is_high());
    }

    #[test]
    fn test_direction_switched_before_each_transfer() {
        let wire = Wire::new().with_loopback();
        let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

        link.write_byte(0xA5).unwrap();
        link.read_byte().unwrap();
        link.write_byte(0x5A).unwrap();

        let directions: Vec<_> = wire
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::DataDirection(d) => Some(d),
                _ => None,
            })
            .collect();
        assert_eq!(
            directions,
            [Direction::Output, Direction::Input, Direction::Output]
        );
        // Never drove the line while it was an input
        assert_eq!(wire.contention(), 0);
    }

    #[test]
    fn test_read_queued_response() {
        let wire = Wire::new();
        wire.queue_response(&[0x80, 0x01]);
        let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

        assert_eq!(link.read_byte().unwrap(), 0x80);
        assert_eq!(link.read_byte().unwrap(), 0x01);
        // Nothing queued: an undriven line reads as all ones
        assert_eq!(link.read_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_edge_delay_applied_per_edge() {
        let wire = Wire::new();
        let config = LinkConfig {
            edge_delay_ns: 250,
            ..LinkConfig::default()
        };
        let mut link = BitBangLink::with_config(wire.clock(), wire.data(), wire.delay(), &config);
        assert_eq!(link.edge_delay_ns(), 250);

        link.write_byte(0x00).unwrap();
        // Two delays per bit
        assert_eq!(wire.total_delay_ns(), 8 * 2 * 250);
    }

    #[test]
    fn test_write_bytes_in_order() {
        let wire = Wire::new();
        let mut link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());

        link.write_bytes(&[0x00, 0xFF, 0x3C]).unwrap();

        let values: Vec<u8> = wire.frames().iter().map(|f| f.value).collect();
        assert_eq!(values, [0x00, 0xFF, 0x3C]);
    }

    #[test]
    fn test_release_returns_lines() {
        let wire = Wire::new();
        let link = BitBangLink::new(wire.clock(), wire.data(), wire.delay());
        assert!(<BitBangLink<SimClock<'_>, SimData<'_>, SimDelay<'_>> as Link>::CAN_READ);

        let (clk, _data, _delay) = link.release();
        assert!(clk.is_set_low());
    }
}
