//! Battery icon assets
//!
//! 16×16 pixel 1-bpp bitmaps, rows stored MSB first, two bytes per row.

use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::{Rgb565, RgbColor},
    prelude::DrawTarget,
    Pixel,
};

use crate::status::BatteryIcon;

/// Icon edge length in pixels
pub const ICON_SIZE: u32 = 16;

const BYTES_PER_ROW: usize = (ICON_SIZE as usize + 7) / 8;

/// Asset table indexed by [`BatteryIcon`]
///
/// Filled once at startup, read-only afterwards.
pub struct IconTable<A> {
    assets: [A; BatteryIcon::COUNT],
}

impl<A> IconTable<A> {
    /// Load one asset per icon.
    pub fn from_fn<F>(mut load: F) -> Self
    where
        F: FnMut(BatteryIcon) -> A,
    {
        Self {
            assets: core::array::from_fn(|index| load(BatteryIcon::ALL[index])),
        }
    }

    pub fn get(&self, icon: BatteryIcon) -> &A {
        &self.assets[icon.index()]
    }
}

impl IconTable<Icon> {
    /// Table with the built-in bitmaps
    pub fn builtin() -> Self {
        Self::from_fn(Icon::builtin)
    }
}

/// Single color bitmap icon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Icon {
    data: &'static [u8],
    color: Rgb565,
}

impl Icon {
    pub const fn new(data: &'static [u8], color: Rgb565) -> Self {
        Self { data, color }
    }

    /// Built-in bitmap and tint for `icon`
    pub fn builtin(icon: BatteryIcon) -> Self {
        match icon {
            BatteryIcon::NotConnected => Self::new(&NOT_CONNECTED, Rgb565::RED),
            BatteryIcon::Charging => Self::new(&CHARGING, Rgb565::YELLOW),
            BatteryIcon::Full => Self::new(&FULL, Rgb565::GREEN),
            BatteryIcon::High => Self::new(&HIGH, Rgb565::GREEN),
            BatteryIcon::Mid => Self::new(&MID, Rgb565::YELLOW),
            BatteryIcon::Low => Self::new(&LOW, Rgb565::YELLOW),
            BatteryIcon::Critical => Self::new(&CRITICAL, Rgb565::RED),
        }
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn size(&self) -> Size {
        Size::new(ICON_SIZE, ICON_SIZE)
    }

    /// Draw the icon with its top left corner at `position`.
    ///
    /// Cleared bits are drawn in `background`.
    pub fn draw<D>(
        &self,
        target: &mut D,
        position: Point,
        background: Rgb565,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let size = ICON_SIZE as usize;
        let pixels = (0..size).flat_map(move |y| {
            (0..size).map(move |x| {
                let byte = self.data.get(y * BYTES_PER_ROW + x / 8).copied().unwrap_or(0);
                let color = if byte & (0x80 >> (x % 8)) != 0 {
                    self.color
                } else {
                    background
                };
                Pixel(position + Point::new(x as i32, y as i32), color)
            })
        });
        target.draw_iter(pixels)
    }
}

const NOT_CONNECTED: [u8; 32] = [
    0b00000000, 0b00000000,
    0b01100000, 0b00000110,
    0b01110000, 0b00001110,
    0b00111000, 0b00011100,
    0b00011100, 0b00111000,
    0b00001110, 0b01110000,
    0b00000111, 0b11100000,
    0b00000011, 0b11000000,
    0b00000011, 0b11000000,
    0b00000111, 0b11100000,
    0b00001110, 0b01110000,
    0b00011100, 0b00111000,
    0b00111000, 0b00011100,
    0b01110000, 0b00001110,
    0b01100000, 0b00000110,
    0b00000000, 0b00000000,
];

const CHARGING: [u8; 32] = [
    0b00000000, 0b01100000,
    0b00000000, 0b11000000,
    0b00000001, 0b11000000,
    0b00000011, 0b10000000,
    0b00000111, 0b00000000,
    0b00001111, 0b11100000,
    0b00011111, 0b11000000,
    0b00000011, 0b10000000,
    0b00000111, 0b00000000,
    0b00001110, 0b00000000,
    0b00011100, 0b00000000,
    0b00110000, 0b00000000,
    0b01100000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];

const FULL: [u8; 32] = [
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b11111111, 0b11111100,
    0b10000000, 0b00000100,
    0b10110110, 0b11011100,
    0b10110110, 0b11011111,
    0b10110110, 0b11011111,
    0b10110110, 0b11011111,
    0b10110110, 0b11011111,
    0b10110110, 0b11011100,
    0b10000000, 0b00000100,
    0b11111111, 0b11111100,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];

const HIGH: [u8; 32] = [
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b11111111, 0b11111100,
    0b10000000, 0b00000100,
    0b10110110, 0b11000100,
    0b10110110, 0b11000111,
    0b10110110, 0b11000111,
    0b10110110, 0b11000111,
    0b10110110, 0b11000111,
    0b10110110, 0b11000100,
    0b10000000, 0b00000100,
    0b11111111, 0b11111100,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];

const MID: [u8; 32] = [
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b11111111, 0b11111100,
    0b10000000, 0b00000100,
    0b10110110, 0b00000100,
    0b10110110, 0b00000111,
    0b10110110, 0b00000111,
    0b10110110, 0b00000111,
    0b10110110, 0b00000111,
    0b10110110, 0b00000100,
    0b10000000, 0b00000100,
    0b11111111, 0b11111100,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];

const LOW: [u8; 32] = [
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b11111111, 0b11111100,
    0b10000000, 0b00000100,
    0b10110000, 0b00000100,
    0b10110000, 0b00000111,
    0b10110000, 0b00000111,
    0b10110000, 0b00000111,
    0b10110000, 0b00000111,
    0b10110000, 0b00000100,
    0b10000000, 0b00000100,
    0b11111111, 0b11111100,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];

const CRITICAL: [u8; 32] = [
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b11111111, 0b11111100,
    0b10000000, 0b00000100,
    0b10100000, 0b00000100,
    0b10100000, 0b00000111,
    0b10100000, 0b00000111,
    0b10100000, 0b00000111,
    0b10100000, 0b00000111,
    0b10100000, 0b00000100,
    0b10000000, 0b00000100,
    0b11111111, 0b11111100,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
    0b00000000, 0b00000000,
];
