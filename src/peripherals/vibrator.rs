//! Control the vibration motor
//!
//! Implementation based upon https://github.com/tstellanova/cst816s/blob/master/examples/touchpad.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Output, peripherals::P0_16};
use embassy_time::Timer;

/// Pause between two pulses in milliseconds
const PULSE_GAP_MS: u64 = 150;

#[allow(unused)]
#[derive(Clone, Copy)]
/// Pulse length in milliseconds
pub enum PulseLength {
    /// 200ms pulse
    SHORT = 200,
    /// 400 ms pulse
    LONG = 400,
}

struct VibratorConfig<'a> {
    /// Motor enable pin (inverted)
    pin_enable: Output<'a, P0_16>,
}

pub struct Vibrator {
    /// Vibrator configuration
    config: VibratorConfig<'static>,
}

impl Vibrator {
    /// Configure vibrator on boot, motor off
    pub fn init(mut enable_pin: Output<'static, P0_16>) -> Self {
        enable_pin.set_high();
        Self {
            config: VibratorConfig {
                pin_enable: enable_pin,
            },
        }
    }

    /// Pulse the vibrator for the set amount of times and
    /// the specified pulse length.
    pub async fn pulse(&mut self, length: PulseLength, times: u8) {
        for i in 0..times {
            if i > 0 {
                Timer::after_millis(PULSE_GAP_MS).await;
            }
            self.config.pin_enable.set_low();
            Timer::after_millis(length as u64).await;
            self.config.pin_enable.set_high();
        }
    }
}
