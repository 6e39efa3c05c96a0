//! Watchface view and label formatting

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::{
    config::TimeFormat,
    error::Error,
    status::{BatteryIcon, TextColor, WatchStatus},
};

pub mod icons;
pub mod watchface;

/// Output side of the watchface.
///
/// Each call replaces what is currently shown for that element.
pub trait WatchFaceView {
    type Error;

    /// Set the time label
    fn set_time_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Set the date label
    fn set_date_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Set the battery percentage label
    fn set_battery_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Set the color of the battery percentage label
    fn set_battery_text_color(&mut self, color: TextColor) -> Result<(), Self::Error>;

    /// Show `icon` in place of the current battery icon
    fn show_icon(&mut self, icon: BatteryIcon) -> Result<(), Self::Error>;
}

/// Fixed capacity text buffer
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Label<const N: usize> {
    str_buf: [u8; N],
    len: usize,
}

impl<const N: usize> Label<N> {
    /// Create empty label
    pub const fn new() -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
        }
    }

    /// Create label from formatting arguments
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self, Error> {
        let mut str_buf = [0; N];
        let len = format_no_std::show(&mut str_buf, args)
            .map_err(|_| Error::LabelOverflow)?
            .len();
        Ok(Self { str_buf, len })
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// `HH:MM`
pub type TimeLabel = Label<8>;
/// `MM/DD`
pub type DateLabel = Label<8>;
/// `0`–`100`
pub type BatteryLabel = Label<4>;

/// Format the time of day as `HH:MM`.
pub fn format_time(time: &NaiveDateTime, format: TimeFormat) -> Result<TimeLabel, Error> {
    let hour = match format {
        TimeFormat::TwentyFourHour => time.hour(),
        TimeFormat::TwelveHour => time.hour12().1,
    };
    Label::format(format_args!("{:02}:{:02}", hour, time.minute()))
}

/// Format the calendar date as `MM/DD`.
pub fn format_date(time: &NaiveDateTime) -> Result<DateLabel, Error> {
    Label::format(format_args!("{:02}/{:02}", time.month(), time.day()))
}

/// Format the battery percentage without padding or suffix.
pub fn format_battery(percent: u8) -> Result<BatteryLabel, Error> {
    Label::format(format_args!("{}", percent))
}

/// Everything shown on the watchface, derived from the watch status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceContent {
    pub time: TimeLabel,
    pub date: DateLabel,
    pub battery: BatteryLabel,
    pub battery_color: TextColor,
    pub icon: BatteryIcon,
}

impl FaceContent {
    /// Derive the face content from `status`
    pub fn derive(status: &WatchStatus, format: TimeFormat) -> Result<Self, Error> {
        Ok(Self {
            time: format_time(&status.current_time, format)?,
            date: format_date(&status.current_time)?,
            battery: format_battery(status.battery_percent)?,
            battery_color: status.battery_text_color(),
            icon: status.icon(),
        })
    }

    /// Push all elements to `view`.
    ///
    /// A failing element does not keep the others from being shown, the
    /// first error is returned.
    pub fn show<V: WatchFaceView>(&self, view: &mut V) -> Result<(), V::Error> {
        let results = [
            view.set_time_text(self.time.as_str()),
            view.set_date_text(self.date.as_str()),
            view.set_battery_text(self.battery.as_str()),
            view.set_battery_text_color(self.battery_color),
            view.show_icon(self.icon),
        ];
        results.into_iter().collect()
    }
}
