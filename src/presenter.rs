//! Event driven watchface presenter

use chrono::{NaiveDateTime, Timelike};

use crate::{
    config::{TimeFormat, WatchFaceConfig},
    status::{BatteryState, WatchStatus},
    ui::{FaceContent, WatchFaceView},
};

/// Events delivered by the host, one at a time
pub trait WatchEvents {
    /// Called once per minute with the current local time
    fn on_tick(&mut self, now: NaiveDateTime);

    /// Called when battery charge or charging state changed
    fn on_battery_changed(&mut self, percent: u8, charging: bool);

    /// Called when the connection to the companion app changed
    fn on_connectivity_changed(&mut self, connected: bool);
}

/// Haptic feedback
pub trait Haptics {
    /// Two short vibration pulses
    fn double_pulse(&mut self);
}

/// Owns the watch status and pushes the derived face content to a view
/// whenever an event changes it.
pub struct StatusPresenter<V, H> {
    status: WatchStatus,
    config: WatchFaceConfig,
    view: V,
    haptics: H,
}

impl<V, H> StatusPresenter<V, H>
where
    V: WatchFaceView,
    H: Haptics,
{
    /// Create the presenter from the state peeked at startup and draw the
    /// first frame.
    ///
    /// Starting out disconnected does not trigger an alert.
    pub fn new(
        view: V,
        haptics: H,
        config: WatchFaceConfig,
        now: NaiveDateTime,
        battery: BatteryState,
        connected: bool,
    ) -> Self {
        let mut presenter = Self {
            status: WatchStatus::new(now, battery, connected),
            config,
            view,
            haptics,
        };
        presenter.render();
        presenter
    }

    pub fn status(&self) -> &WatchStatus {
        &self.status
    }

    pub fn config(&self) -> &WatchFaceConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Switch between 12 and 24 hour clock
    pub fn set_time_format(&mut self, time_format: TimeFormat) {
        if self.config.time_format != time_format {
            self.config.time_format = time_format;
            self.render();
        }
    }

    /// Content for the current status
    pub fn content(&self) -> Result<FaceContent, crate::Error> {
        FaceContent::derive(&self.status, self.config.time_format)
    }

    /// Push the full face content to the view.
    fn render(&mut self) {
        let content = match self.content() {
            Ok(content) => content,
            Err(_) => {
                warn!("Face content does not fit its labels, keeping last frame");
                return;
            }
        };
        if content.show(&mut self.view).is_err() {
            warn!("Failed to update watchface");
        }
    }
}

impl<V, H> WatchEvents for StatusPresenter<V, H>
where
    V: WatchFaceView,
    H: Haptics,
{
    fn on_tick(&mut self, now: NaiveDateTime) {
        debug!("Tick {}:{}", now.hour(), now.minute());
        self.status.current_time = now;
        self.render();
    }

    fn on_battery_changed(&mut self, percent: u8, charging: bool) {
        info!(
            "Battery status: {} ({})",
            percent,
            if charging { "charging" } else { "discharging" }
        );
        self.status.battery_percent = percent;
        self.status.is_charging = charging;
        self.render();
    }

    fn on_connectivity_changed(&mut self, connected: bool) {
        let was_connected = self.status.is_connected;
        self.status.is_connected = connected;

        if was_connected && !connected {
            info!("Connection lost");
            self.haptics.double_pulse();
        } else if !was_connected && connected {
            info!("Connection established");
        }

        self.render();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        error::Error,
        status::{BatteryIcon, TextColor},
    };

    #[derive(Default)]
    struct Recorder {
        time: String,
        battery: String,
        color: Option<TextColor>,
        icon: Option<BatteryIcon>,
        fail_time: bool,
    }

    impl WatchFaceView for Recorder {
        type Error = ();

        fn set_time_text(&mut self, text: &str) -> Result<(), ()> {
            if self.fail_time {
                return Err(());
            }
            self.time = text.into();
            Ok(())
        }

        fn set_date_text(&mut self, _text: &str) -> Result<(), ()> {
            Ok(())
        }

        fn set_battery_text(&mut self, text: &str) -> Result<(), ()> {
            self.battery = text.into();
            Ok(())
        }

        fn set_battery_text_color(&mut self, color: TextColor) -> Result<(), ()> {
            self.color = Some(color);
            Ok(())
        }

        fn show_icon(&mut self, icon: BatteryIcon) -> Result<(), ()> {
            self.icon = Some(icon);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pulses(usize);

    impl Haptics for Pulses {
        fn double_pulse(&mut self) {
            self.0 += 1;
        }
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 8, 4)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn startup_draws_first_frame() {
        let presenter = StatusPresenter::new(
            Recorder::default(),
            Pulses::default(),
            WatchFaceConfig::default(),
            noon(),
            BatteryState::new(64, false),
            true,
        );
        assert_eq!(presenter.view().time, "12:00");
        assert_eq!(presenter.view().battery, "64");
        assert_eq!(presenter.view().icon, Some(BatteryIcon::High));
        assert_eq!(presenter.view().color, Some(TextColor::Normal));
    }

    #[test]
    fn starting_disconnected_does_not_alert() {
        let presenter = StatusPresenter::new(
            Recorder::default(),
            Pulses::default(),
            WatchFaceConfig::default(),
            noon(),
            BatteryState::new(64, false),
            false,
        );
        assert_eq!(presenter.haptics().0, 0);
        assert_eq!(presenter.view().icon, Some(BatteryIcon::NotConnected));
    }

    #[test]
    fn view_error_does_not_block_other_outputs() {
        let view = Recorder {
            fail_time: true,
            ..Default::default()
        };
        let mut presenter = StatusPresenter::new(
            view,
            Pulses::default(),
            WatchFaceConfig::default(),
            noon(),
            BatteryState::new(64, false),
            true,
        );
        presenter.on_battery_changed(10, false);
        assert_eq!(presenter.view().battery, "10");
        assert_eq!(presenter.view().icon, Some(BatteryIcon::Critical));
    }

    #[test]
    fn switching_time_format_redraws() {
        let mut presenter = StatusPresenter::new(
            Recorder::default(),
            Pulses::default(),
            WatchFaceConfig::default(),
            noon() + chrono::Duration::hours(3),
            BatteryState::new(64, false),
            true,
        );
        assert_eq!(presenter.view().time, "15:00");
        presenter.set_time_format(TimeFormat::TwelveHour);
        assert_eq!(presenter.view().time, "03:00");
        assert_eq!(presenter.content().map(|c| c.time.as_str() == "03:00"), Ok(true));
    }

    #[test]
    fn content_reflects_status() {
        let presenter = StatusPresenter::new(
            Recorder::default(),
            Pulses::default(),
            WatchFaceConfig::default(),
            noon(),
            BatteryState::new(100, true),
            true,
        );
        let content: Result<_, Error> = presenter.content();
        assert_eq!(content.map(|c| c.icon), Ok(BatteryIcon::Charging));
    }
}
