//! Write-only SPI bring-up
//!
//! SPI0 drives SCK and MOSI; MISO is not wired, so nothing is ever read
//! back. Resets the panel and sends one command and one data byte.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use epdlink_core::{Epd, Interface, ResetController, SpiLink};
use epdlink_firmware::{board, epd_lines, park};
use epdlink_hal_rp2040::gpio::{RpInput, RpOutput};
use epdlink_hal_rp2040::spi::{default_config, RpSpi};

/// Example command written after reset
const EXAMPLE_COMMAND: u8 = 0x01;

/// Example data byte written after the command
const EXAMPLE_DATA: u8 = 0xAA;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    epdlink_firmware::init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Hello Epaper! {}", board::NAME);

    let config = epdlink_firmware::config::load();
    let lines = epd_lines!(p);

    let spi = Spi::new_blocking_txonly(p.SPI0, lines.sclk, lines.sdin, default_config());
    let link = SpiLink::new(RpSpi::new(spi));

    let cs = RpOutput::new(Output::new(lines.cs, Level::High));
    let dc = RpOutput::new(Output::new(lines.dc, Level::Low));
    let rst = RpOutput::new(Output::new(lines.rst, Level::High));
    let busy = RpInput::new(Input::new(lines.busy, Pull::None));

    let interface = Interface::new(link, cs, dc);
    let reset = ResetController::with_config(rst, busy, Delay, &config);
    let mut epd = Epd::new(interface, reset);

    info!("Resetting display...");
    match epd.init() {
        Ok(report) => info!("Display ready after {} BUSY polls", report.busy_polls),
        Err(e) => {
            error!("Display reset failed: {:?}", e);
            park().await
        }
    }

    if let Err(e) = epd.send_command(EXAMPLE_COMMAND) {
        error!("Command write failed: {:?}", e);
    } else {
        info!("Sent command 0x{=u8:02X}", EXAMPLE_COMMAND);
    }

    if let Err(e) = epd.send_data(EXAMPLE_DATA) {
        error!("Data write failed: {:?}", e);
    } else {
        info!("Sent data 0x{=u8:02X}", EXAMPLE_DATA);
    }

    park().await
}
