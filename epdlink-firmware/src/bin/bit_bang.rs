//! Bit-banged bring-up
//!
//! Drives SCLK and a half-duplex SDIN line by hand, resets the panel and
//! reads back its chip ID.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use epdlink_core::{BitBangLink, Epd, Interface, ResetController};
use epdlink_firmware::{board, epd_lines, park};
use epdlink_hal_rp2040::gpio::{RpFlex, RpInput, RpOutput};
use epdlink_hal_rp2040::FlexPin;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    epdlink_firmware::init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Hello Epaper! {}", board::NAME);

    let config = epdlink_firmware::config::load();
    let lines = epd_lines!(p);

    // SDIN starts out driven; the link turns it around for reads
    let mut sdin = RpFlex::new(Flex::new(lines.sdin));
    sdin.set_as_output();

    let sclk = RpOutput::new(Output::new(lines.sclk, Level::Low));
    let cs = RpOutput::new(Output::new(lines.cs, Level::High));
    let dc = RpOutput::new(Output::new(lines.dc, Level::Low));
    let rst = RpOutput::new(Output::new(lines.rst, Level::High));
    let busy = RpInput::new(Input::new(lines.busy, Pull::None));

    let link = BitBangLink::with_config(sclk, sdin, Delay, &config);
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

    match epd.read_chip_id() {
        Ok((id0, id1)) => info!("Chip ID: 0x{=u8:02X} 0x{=u8:02X}", id0, id1),
        Err(e) => error!("Chip ID read failed: {:?}", e),
    }

    park().await
}
