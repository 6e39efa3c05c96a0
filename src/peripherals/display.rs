//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26},
    spim::{self, Spim},
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use mipidsi::{models::ST7789, Builder, Orientation};
use pinetime_watchface::ui::watchface::{LCD_H, LCD_W};

use super::Error;

/// ST7789 LCD on the SPI bus
pub type Lcd<SPI> = mipidsi::Display<
    SPIInterface<Spim<'static, SPI>, Output<'static, P0_18>, Output<'static, P0_25>>,
    ST7789,
    Output<'static, P0_26>,
>;

/// Configure display settings on boot
pub fn init<SPI>(
    spim: Spim<'static, SPI>,
    cs_pin: Output<'static, P0_25>,
    dc_pin: Output<'static, P0_18>,
    rst_pin: Output<'static, P0_26>,
) -> Result<Lcd<SPI>, Error>
where
    SPI: spim::Instance,
{
    Builder::st7789(SPIInterface::new(spim, dc_pin, cs_pin))
        .with_display_size(LCD_W as u16, LCD_H as u16)
        .with_orientation(Orientation::Portrait(false))
        .init(&mut Delay, Some(rst_pin))
        .map_err(|_| Error::Display)
}
