//! PineTime peripherals used by the watchface

pub(super) mod backlight;
pub(super) mod battery;
pub(super) mod display;
pub(super) mod vibrator;

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Display did not initialize or rejected a draw call
    Display,
    /// Backlight level outside of 0–7
    OutOfBounds,
}
