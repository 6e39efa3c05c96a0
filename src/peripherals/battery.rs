//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use pinetime_watchface::{BatteryReporter, BatteryState};

/// Battery configuration
struct BatteryConfig<'a> {
    /// ADC instance for battery voltage measurement
    adc: Saadc<'a, 1>,
    /// Charge indication pin:
    /// high = battery, low = charging
    pin_charge_indication: Input<'a, P0_12>,
}

/// Battery API
pub struct Battery {
    /// Battery configuration
    config: BatteryConfig<'static>,
    /// Last reported state
    reporter: BatteryReporter,
}

impl Battery {
    /// Configure battery settings on boot
    pub fn init(adc: Saadc<'static, 1>, charge_pin: Input<'static, P0_12>) -> Self {
        Self {
            config: BatteryConfig {
                adc,
                pin_charge_indication: charge_pin,
            },
            reporter: BatteryReporter::new(),
        }
    }

    /// Charging state of the battery
    pub fn is_charging(&self) -> bool {
        self.config.pin_charge_indication.is_low()
    }

    /// Sample the battery. Return the new state if it differs from the
    /// last reported one, the first call always reports.
    pub async fn update(&mut self) -> Option<BatteryState> {
        let state = self.sample().await;
        self.reporter.report(state)
    }

    /// Sample the battery without reporting it
    pub async fn sample(&mut self) -> BatteryState {
        let voltage = self.get_voltage().await;
        BatteryState::from_millivolts(voltage, self.is_charging())
    }

    /// Battery voltage in millivolts
    async fn get_voltage(&mut self) -> u16 {
        let mut buf = [0; 1];
        self.config.adc.sample(&mut buf).await;
        // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
        // Use u32 during calculation to prevent overflow
        (buf[0].max(0) as u32 * 2000 / 1241) as u16
    }
}
