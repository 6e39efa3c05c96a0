//! Watchface configuration

/// Clock style used for the time label
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    /// `01`–`12`, without AM/PM suffix
    TwelveHour,
    /// `00`–`23`
    #[default]
    TwentyFourHour,
}

impl TimeFormat {
    /// Build from the host's "24 hour style" flag.
    pub const fn from_24h_style(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }

    pub const fn is_24h_style(self) -> bool {
        matches!(self, Self::TwentyFourHour)
    }
}

/// User facing settings of the watchface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchFaceConfig {
    /// 12 or 24 hour clock
    pub time_format: TimeFormat,
    /// Offset of local time to UTC in seconds
    pub utc_offset_secs: i32,
}

impl WatchFaceConfig {
    /// Create new watchface configuration
    pub const fn new(time_format: TimeFormat, utc_offset_secs: i32) -> Self {
        Self {
            time_format,
            utc_offset_secs,
        }
    }
}
