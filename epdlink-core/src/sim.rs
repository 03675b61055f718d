//! Simulated display controller for host tests
//!
//! A [`Wire`] holds the shared state of every line. Pin handles borrow it,
//! so one test can hand the clock, data, select, mode, reset and BUSY lines
//! to different components and still inspect the whole bus afterwards.
//!
//! Device model:
//! - while the host drives data, each clock rising edge latches one bit into
//!   a shadow register; eight bits complete a [`Frame`]
//! - while the host samples data, each rising edge puts the next bit of the
//!   device's transmit queue on the line
//! - a command frame carrying [`CHIP_ID_OPCODE`] queues the chip ID
//! - de-asserting select resets both shift registers

use core::cell::RefCell;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use epdlink_hal::{Direction, FlexPin, InputPin, OutputPin, SpiBus};

use crate::interface::CHIP_ID_OPCODE;

/// Chip ID the simulated controller reports
pub const SIM_CHIP_ID: [u8; 2] = [0x12, 0x34];

/// Byte received by the simulated controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub value: u8,
    /// Mode line level when the last bit was latched (true = data)
    pub data_mode: bool,
    /// Select asserted when the last bit was latched
    pub selected: bool,
}

/// Observable bus activity, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Select line driven (true = asserted/low)
    Select(bool),
    /// Mode line driven (true = data)
    Mode(bool),
    /// Reset line driven (true = high)
    Reset(bool),
    /// Data line direction changed
    DataDirection(Direction),
    /// Millisecond delay requested
    HoldMs(u32),
    /// BUSY sampled (true = ready)
    BusyPoll(bool),
    /// SPI peripheral transfer
    Transfer(u8),
}

#[derive(Default)]
struct WireState {
    clk: bool,
    data_dir: Option<Direction>,
    host_data: bool,
    device_data: bool,
    cs_high: bool,
    dc_high: bool,
    rst_high: bool,

    shift_in: u8,
    bits_in: u8,
    tx_queue: VecDeque<u8>,
    tx_byte: u8,
    tx_bits: u8,
    loopback: bool,

    busy_ready_after: Option<u32>,
    busy_polls: u32,
    spi_fail: bool,

    frames: Vec<Frame>,
    /// Data level at each rising edge while the host drives
    write_edges: Vec<bool>,
    events: Vec<Event>,
    delay_ns: u64,
    contention: u32,
}

/// Shared simulated bus
pub struct Wire {
    state: RefCell<WireState>,
}

impl Wire {
    /// New bus with select and mode idle high and BUSY never ready
    pub fn new() -> Self {
        Self {
            state: RefCell::new(WireState {
                cs_high: true,
                dc_high: true,
                rst_high: true,
                ..WireState::default()
            }),
        }
    }

    /// Echo every received byte back on the next read
    pub fn with_loopback(self) -> Self {
        self.state.borrow_mut().loopback = true;
        self
    }

    /// BUSY reads low for `polls` samples, then high
    pub fn with_busy_ready_after(self, polls: u32) -> Self {
        self.state.borrow_mut().busy_ready_after = Some(polls);
        self
    }

    /// Make every SPI transfer fail
    pub fn with_failing_spi(self) -> Self {
        self.state.borrow_mut().spi_fail = true;
        self
    }

    pub fn clock(&self) -> SimClock<'_> {
        SimClock { wire: self }
    }

    pub fn data(&self) -> SimData<'_> {
        SimData { wire: self }
    }

    pub fn select(&self) -> SimLine<'_> {
        SimLine { wire: self, line: Line::Select }
    }

    pub fn mode(&self) -> SimLine<'_> {
        SimLine { wire: self, line: Line::Mode }
    }

    pub fn reset(&self) -> SimLine<'_> {
        SimLine { wire: self, line: Line::Reset }
    }

    pub fn busy(&self) -> SimBusy<'_> {
        SimBusy { wire: self }
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { wire: self }
    }

    pub fn spi(&self) -> SimSpi<'_> {
        SimSpi { wire: self }
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.state.borrow().frames.clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn write_edges(&self) -> Vec<bool> {
        self.state.borrow().write_edges.clone()
    }

    pub fn clear_trace(&self) {
        let mut s = self.state.borrow_mut();
        s.frames.clear();
        s.write_edges.clear();
        s.events.clear();
    }

    pub fn clock_is_high(&self) -> bool {
        self.state.borrow().clk
    }

    pub fn select_is_high(&self) -> bool {
        self.state.borrow().cs_high
    }

    pub fn busy_polls(&self) -> u32 {
        self.state.borrow().busy_polls
    }

    pub fn total_delay_ns(&self) -> u64 {
        self.state.borrow().delay_ns
    }

    /// Times the host drove the data line while it was configured as input
    pub fn contention(&self) -> u32 {
        self.state.borrow().contention
    }

    /// Queue bytes for the device to shift out
    pub fn queue_response(&self, bytes: &[u8]) {
        self.state.borrow_mut().tx_queue.extend(bytes.iter().copied());
    }

    fn rising_edge(s: &mut WireState) {
        match s.data_dir {
            Some(Direction::Output) => {
                let bit = s.host_data;
                s.write_edges.push(bit);
                s.shift_in = (s.shift_in << 1) | u8::from(bit);
                s.bits_in += 1;
                if s.bits_in == 8 {
                    let frame = Frame {
                        value: s.shift_in,
                        data_mode: s.dc_high,
                        selected: !s.cs_high,
                    };
                    s.frames.push(frame);
                    s.bits_in = 0;
                    s.shift_in = 0;
                    if s.loopback {
                        s.tx_queue.push_back(frame.value);
                    } else if !frame.data_mode && frame.value == CHIP_ID_OPCODE {
                        s.tx_queue.extend(SIM_CHIP_ID);
                    }
                }
            }
            Some(Direction::Input) => {
                if s.tx_bits == 0 {
                    s.tx_byte = s.tx_queue.pop_front().unwrap_or(0xFF);
                    s.tx_bits = 8;
                }
                s.device_data = s.tx_byte & 0x80 != 0;
                s.tx_byte <<= 1;
                s.tx_bits -= 1;
            }
            None => {}
        }
    }
}

pub struct SimClock<'a> {
    wire: &'a Wire,
}

impl OutputPin for SimClock<'_> {
    fn set_high(&mut self) {
        let mut s = self.wire.state.borrow_mut();
        if !s.clk {
            s.clk = true;
            Wire::rising_edge(&mut s);
        }
    }

    fn set_low(&mut self) {
        self.wire.state.borrow_mut().clk = false;
    }

    fn is_set_high(&self) -> bool {
        self.wire.state.borrow().clk
    }
}

pub struct SimData<'a> {
    wire: &'a Wire,
}

impl OutputPin for SimData<'_> {
    fn set_high(&mut self) {
        let mut s = self.wire.state.borrow_mut();
        if s.data_dir != Some(Direction::Output) {
            s.contention += 1;
        }
        s.host_data = true;
    }

    fn set_low(&mut self) {
        let mut s = self.wire.state.borrow_mut();
        if s.data_dir != Some(Direction::Output) {
            s.contention += 1;
        }
        s.host_data = false;
    }

    fn is_set_high(&self) -> bool {
        self.wire.state.borrow().host_data
    }
}

impl InputPin for SimData<'_> {
    fn is_high(&self) -> bool {
        let s = self.wire.state.borrow();
        match s.data_dir {
            Some(Direction::Input) => s.device_data,
            _ => s.host_data,
        }
    }
}

impl FlexPin for SimData<'_> {
    fn set_as_output(&mut self) {
        let mut s = self.wire.state.borrow_mut();
        s.data_dir = Some(Direction::Output);
        s.events.push(Event::DataDirection(Direction::Output));
    }

    fn set_as_input(&mut self) {
        let mut s = self.wire.state.borrow_mut();
        s.data_dir = Some(Direction::Input);
        s.events.push(Event::DataDirection(Direction::Input));
    }

    fn direction(&self) -> Direction {
        self.wire.state.borrow().data_dir.unwrap_or(Direction::Input)
    }
}

#[derive(Clone, Copy)]
enum Line {
    Select,
    Mode,
    Reset,
}

pub struct SimLine<'a> {
    wire: &'a Wire,
    line: Line,
}

impl SimLine<'_> {
    fn drive(&mut self, high: bool) {
        let mut s = self.wire.state.borrow_mut();
        match self.line {
            Line::Select => {
                s.cs_high = high;
                if high {
                    s.bits_in = 0;
                    s.shift_in = 0;
                    s.tx_bits = 0;
                }
                s.events.push(Event::Select(!high));
            }
            Line::Mode => {
                s.dc_high = high;
                s.events.push(Event::Mode(high));
            }
            Line::Reset => {
                s.rst_high = high;
                s.events.push(Event::Reset(high));
            }
        }
    }
}

impl OutputPin for SimLine<'_> {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        let s = self.wire.state.borrow();
        match self.line {
            Line::Select => s.cs_high,
            Line::Mode => s.dc_high,
            Line::Reset => s.rst_high,
        }
    }
}

pub struct SimBusy<'a> {
    wire: &'a Wire,
}

impl InputPin for SimBusy<'_> {
    fn is_high(&self) -> bool {
        let mut s = self.wire.state.borrow_mut();
        let polls = s.busy_polls;
        let ready = s.busy_ready_after.is_some_and(|after| polls >= after);
        s.busy_polls += 1;
        s.events.push(Event::BusyPoll(ready));
        ready
    }
}

pub struct SimDelay<'a> {
    wire: &'a Wire,
}

impl DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wire.state.borrow_mut().delay_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        let mut s = self.wire.state.borrow_mut();
        s.delay_ns += u64::from(ms) * 1_000_000;
        s.events.push(Event::HoldMs(ms));
    }
}

/// Simulated SPI peripheral error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimSpiError;

pub struct SimSpi<'a> {
    wire: &'a Wire,
}

impl SpiBus for SimSpi<'_> {
    type Error = SimSpiError;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        read.fill(0xFF);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut s = self.wire.state.borrow_mut();
        if s.spi_fail {
            return Err(SimSpiError);
        }
        for &byte in data {
            s.events.push(Event::Transfer(byte));
            let frame = Frame {
                value: byte,
                data_mode: s.dc_high,
                selected: !s.cs_high,
            };
            s.frames.push(frame);
        }
        Ok(())
    }
}
