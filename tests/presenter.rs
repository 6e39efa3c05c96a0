use chrono::{NaiveDate, NaiveDateTime};
use pinetime_watchface::{
    BatteryIcon, BatteryState, Haptics, StatusPresenter, TextColor, TimeFormat, WatchEvents,
    WatchFaceConfig, WatchFaceView,
};

/// Output recorded from one call to the view
#[derive(Clone, Debug, PartialEq, Eq)]
enum Output {
    Time(String),
    Date(String),
    Battery(String),
    Color(TextColor),
    Icon(BatteryIcon),
}

#[derive(Default)]
struct RecordingView {
    outputs: Vec<Output>,
}

impl RecordingView {
    fn last_icon(&self) -> Option<BatteryIcon> {
        self.outputs.iter().rev().find_map(|output| match output {
            Output::Icon(icon) => Some(*icon),
            _ => None,
        })
    }

    fn last_color(&self) -> Option<TextColor> {
        self.outputs.iter().rev().find_map(|output| match output {
            Output::Color(color) => Some(*color),
            _ => None,
        })
    }

    fn last_text(&self, pick: fn(&Output) -> Option<&String>) -> Option<String> {
        self.outputs.iter().rev().find_map(pick).cloned()
    }
}

impl WatchFaceView for RecordingView {
    type Error = core::convert::Infallible;

    fn set_time_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.outputs.push(Output::Time(text.into()));
        Ok(())
    }

    fn set_date_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.outputs.push(Output::Date(text.into()));
        Ok(())
    }

    fn set_battery_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.outputs.push(Output::Battery(text.into()));
        Ok(())
    }

    fn set_battery_text_color(&mut self, color: TextColor) -> Result<(), Self::Error> {
        self.outputs.push(Output::Color(color));
        Ok(())
    }

    fn show_icon(&mut self, icon: BatteryIcon) -> Result<(), Self::Error> {
        self.outputs.push(Output::Icon(icon));
        Ok(())
    }
}

#[derive(Default)]
struct CountingHaptics {
    pulses: usize,
}

impl Haptics for CountingHaptics {
    fn double_pulse(&mut self) {
        self.pulses += 1;
    }
}

type Presenter = StatusPresenter<RecordingView, CountingHaptics>;

fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn presenter(time_format: TimeFormat, battery: BatteryState, connected: bool) -> Presenter {
    StatusPresenter::new(
        RecordingView::default(),
        CountingHaptics::default(),
        WatchFaceConfig::new(time_format, 0),
        at(8, 4, 9, 5),
        battery,
        connected,
    )
}

fn connected_presenter() -> Presenter {
    presenter(TimeFormat::TwentyFourHour, BatteryState::new(100, false), true)
}

#[test]
fn icon_follows_percent_bands() {
    let mut presenter = connected_presenter();
    let bands = [
        (0..=19, BatteryIcon::Critical),
        (20..=39, BatteryIcon::Low),
        (40..=59, BatteryIcon::Mid),
        (60..=79, BatteryIcon::High),
        (80..=100, BatteryIcon::Full),
    ];
    for (range, expected) in bands {
        for percent in range {
            presenter.on_battery_changed(percent, false);
            assert_eq!(presenter.view().last_icon(), Some(expected), "{percent}%");
            assert_eq!(presenter.status().battery_percent, percent);
        }
    }
}

#[test]
fn disconnected_overrides_percent_and_charging() {
    let mut presenter = connected_presenter();
    presenter.on_connectivity_changed(false);
    for percent in 0..=100 {
        presenter.on_battery_changed(percent, percent % 2 == 0);
        assert_eq!(presenter.view().last_icon(), Some(BatteryIcon::NotConnected));
    }
}

#[test]
fn charging_overrides_percent() {
    let mut presenter = connected_presenter();
    for percent in 0..=100 {
        presenter.on_battery_changed(percent, true);
        assert_eq!(presenter.view().last_icon(), Some(BatteryIcon::Charging));
    }
}

#[test]
fn alert_color_is_independent_of_icon() {
    let mut presenter = connected_presenter();

    presenter.on_battery_changed(25, true);
    assert_eq!(presenter.view().last_icon(), Some(BatteryIcon::Charging));
    assert_eq!(presenter.view().last_color(), Some(TextColor::Alert));

    presenter.on_battery_changed(29, false);
    assert_eq!(presenter.view().last_color(), Some(TextColor::Alert));

    presenter.on_battery_changed(30, false);
    assert_eq!(presenter.view().last_color(), Some(TextColor::Normal));
}

#[test]
fn battery_text_is_plain_decimal() {
    let mut presenter = connected_presenter();
    for (percent, expected) in [(0, "0"), (5, "5"), (42, "42"), (100, "100")] {
        presenter.on_battery_changed(percent, false);
        let text = presenter.view().last_text(|output| match output {
            Output::Battery(text) => Some(text),
            _ => None,
        });
        assert_eq!(text.as_deref(), Some(expected));
    }
}

#[test]
fn one_alert_per_disconnect() {
    let mut presenter = connected_presenter();

    presenter.on_connectivity_changed(false);
    assert_eq!(presenter.haptics().pulses, 1);

    // Staying disconnected
    presenter.on_connectivity_changed(false);
    presenter.on_battery_changed(50, false);
    presenter.on_battery_changed(49, true);
    presenter.on_tick(at(8, 4, 9, 6));
    assert_eq!(presenter.haptics().pulses, 1);

    // Reconnecting is silent
    presenter.on_connectivity_changed(true);
    assert_eq!(presenter.haptics().pulses, 1);
    assert_ne!(presenter.view().last_icon(), Some(BatteryIcon::NotConnected));

    // Next loss alerts again
    presenter.on_connectivity_changed(false);
    assert_eq!(presenter.haptics().pulses, 2);
}

#[test]
fn quick_reconnect_still_alerts_once() {
    let mut presenter = connected_presenter();

    // Both edges arrive before the next frame
    for connected in [false, true] {
        presenter.on_connectivity_changed(connected);
    }
    assert_eq!(presenter.haptics().pulses, 1);
    assert!(presenter
        .view()
        .outputs
        .contains(&Output::Icon(BatteryIcon::NotConnected)));
    assert_eq!(presenter.view().last_icon(), Some(BatteryIcon::Full));
}

#[test]
fn repeated_battery_event_is_idempotent() {
    let mut presenter = connected_presenter();

    presenter.on_battery_changed(57, false);
    let first = presenter.view().outputs.len();
    presenter.on_battery_changed(57, false);
    let outputs = &presenter.view().outputs;

    let frame = outputs.len() - first;
    assert_eq!(outputs[first - frame..first], outputs[first..]);
    assert_eq!(presenter.view().last_icon(), Some(BatteryIcon::Mid));
}

#[test]
fn every_event_renders_full_frame() {
    let mut presenter = connected_presenter();
    let frame = presenter.view().outputs.len();
    assert_eq!(frame, 5);

    presenter.on_tick(at(8, 4, 9, 6));
    presenter.on_battery_changed(10, false);
    presenter.on_connectivity_changed(false);
    assert_eq!(presenter.view().outputs.len(), 4 * frame);
}

#[test]
fn tick_updates_time_and_date() {
    let mut presenter = connected_presenter();
    assert_eq!(
        presenter.view().outputs[..2],
        [Output::Time("09:05".into()), Output::Date("08/04".into())]
    );

    presenter.on_tick(at(12, 31, 23, 59));
    assert_eq!(presenter.status().current_time, at(12, 31, 23, 59));
    let time = presenter.view().last_text(|output| match output {
        Output::Time(text) => Some(text),
        _ => None,
    });
    let date = presenter.view().last_text(|output| match output {
        Output::Date(text) => Some(text),
        _ => None,
    });
    assert_eq!(time.as_deref(), Some("23:59"));
    assert_eq!(date.as_deref(), Some("12/31"));
}

#[test]
fn twelve_hour_clock_wraps_afternoon() {
    let mut presenter = presenter(TimeFormat::TwelveHour, BatteryState::new(80, false), true);
    presenter.on_tick(at(8, 4, 13, 5));
    let time = presenter.view().last_text(|output| match output {
        Output::Time(text) => Some(text),
        _ => None,
    });
    assert_eq!(time.as_deref(), Some("01:05"));
}
