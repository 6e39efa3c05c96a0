//! Observed watch status and the decisions derived from it

use chrono::NaiveDateTime;

/// Battery readout is drawn in the alert color below this charge.
pub const LOW_BATTERY_PERCENT: u8 = 30;

/// Width of one charge band in percent
const BAND_WIDTH: u8 = 20;

/// Battery indicator icons, one visible at a time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryIcon {
    NotConnected,
    Charging,
    Full,
    High,
    Mid,
    Low,
    Critical,
}

impl BatteryIcon {
    /// Number of icon variants
    pub const COUNT: usize = 7;

    /// All icons, in asset table order
    pub const ALL: [BatteryIcon; Self::COUNT] = [
        BatteryIcon::NotConnected,
        BatteryIcon::Charging,
        BatteryIcon::Full,
        BatteryIcon::High,
        BatteryIcon::Mid,
        BatteryIcon::Low,
        BatteryIcon::Critical,
    ];

    /// Select the icon for the given status.
    ///
    /// A lost connection wins over charging, charging wins over the
    /// charge level.
    pub fn select(connected: bool, charging: bool, percent: u8) -> Self {
        if !connected {
            BatteryIcon::NotConnected
        } else if charging {
            BatteryIcon::Charging
        } else {
            Self::from_percent(percent)
        }
    }

    /// Charge band of `percent`, boundaries belong to the higher band.
    pub fn from_percent(percent: u8) -> Self {
        match percent.min(100) / BAND_WIDTH {
            0 => BatteryIcon::Critical,
            1 => BatteryIcon::Low,
            2 => BatteryIcon::Mid,
            3 => BatteryIcon::High,
            _ => BatteryIcon::Full,
        }
    }

    /// Position in the asset table
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Color of the battery readout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextColor {
    #[default]
    Normal,
    Alert,
}

impl TextColor {
    pub fn for_percent(percent: u8) -> Self {
        if percent < LOW_BATTERY_PERCENT {
            TextColor::Alert
        } else {
            TextColor::Normal
        }
    }
}

/// Battery state as reported by the battery service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Battery percentage (0–100)
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

impl BatteryState {
    pub const fn new(percent: u8, charging: bool) -> Self {
        Self { percent, charging }
    }

    /// Estimate the battery state from the cell voltage.
    pub fn from_millivolts(voltage: u16, charging: bool) -> Self {
        Self::new(percent_from_millivolts(voltage), charging)
    }
}

/// Tracks which battery state was last published to the watchface and the
/// battery service.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatteryReporter {
    last: Option<BatteryState>,
}

impl BatteryReporter {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Return `state` if it has not been published yet.
    ///
    /// The first state is always returned.
    pub fn report(&mut self, state: BatteryState) -> Option<BatteryState> {
        if self.last == Some(state) {
            return None;
        }
        self.last = Some(state);
        Some(state)
    }
}

/// Battery capacity in percent for a cell voltage in millivolts.
///
/// Uses fixed data points and linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Current state of the watch as seen by the watchface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchStatus {
    /// Last reported battery percentage
    pub battery_percent: u8,
    pub is_charging: bool,
    /// Connected to the companion app
    pub is_connected: bool,
    /// Local wall clock time
    pub current_time: NaiveDateTime,
}

impl WatchStatus {
    pub fn new(current_time: NaiveDateTime, battery: BatteryState, is_connected: bool) -> Self {
        Self {
            battery_percent: battery.percent,
            is_charging: battery.charging,
            is_connected,
            current_time,
        }
    }

    pub fn battery(&self) -> BatteryState {
        BatteryState::new(self.battery_percent, self.is_charging)
    }

    /// Icon for the current status
    pub fn icon(&self) -> BatteryIcon {
        BatteryIcon::select(self.is_connected, self.is_charging, self.battery_percent)
    }

    /// Color for the battery readout
    pub fn battery_text_color(&self) -> TextColor {
        TextColor::for_percent(self.battery_percent)
    }
}
