//! Board pin assignment
//!
//! Raspberry Pi Pico wired to the display header:
//!
//! | Signal | GPIO | Notes                          |
//! |--------|------|--------------------------------|
//! | SCLK   | 18   | SPI0 SCK in the SPI variant    |
//! | SDIN   | 19   | SPI0 TX (MOSI) in the SPI variant |
//! | CS     | 17   | active low                     |
//! | DC     | 20   | low = command, high = data     |
//! | RST    | 21   | active low                     |
//! | BUSY   | 22   | high = ready                   |

use embassy_rp::peripherals::{PIN_17, PIN_18, PIN_19, PIN_20, PIN_21, PIN_22};
use embassy_rp::Peri;

/// Board name printed in the startup banner
pub const NAME: &str = "rpi_pico/rp2040";

/// Display lines, taken out of the peripheral set by [`epd_lines!`]
///
/// [`epd_lines!`]: crate::epd_lines
pub struct EpdLines {
    pub sclk: Peri<'static, PIN_18>,
    pub sdin: Peri<'static, PIN_19>,
    pub cs: Peri<'static, PIN_17>,
    pub dc: Peri<'static, PIN_20>,
    pub rst: Peri<'static, PIN_21>,
    pub busy: Peri<'static, PIN_22>,
}

/// Move the display pins out of `embassy_rp::Peripherals`
#[macro_export]
macro_rules! epd_lines {
    ($p:ident) => {
        $crate::board::EpdLines {
            sclk: $p.PIN_18,
            sdin: $p.PIN_19,
            cs: $p.PIN_17,
            dc: $p.PIN_20,
            rst: $p.PIN_21,
            busy: $p.PIN_22,
        }
    };
}
