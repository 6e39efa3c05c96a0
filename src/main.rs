#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Ticker, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    battery::Battery,
    display::{self, Lcd},
    vibrator::{PulseLength, Vibrator},
};
use system::{
    bluetooth::{self, Server},
    config::{SystemConfig, BACKLIGHT_LEVEL, WATCHFACE},
    time::Clock,
};

// Watchface
use pinetime_watchface::{
    ui::{icons::IconTable, watchface::StatusFace},
    BatteryState, Haptics, StatusPresenter, WatchEvents,
};

// Others
use chrono::NaiveDateTime;

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static BATTERY_STATUS: Signal<ThreadModeRawMutex, BatteryState> = Signal::new();
static NOTIFY: Signal<ThreadModeRawMutex, u8> = Signal::new();
static TIME: Signal<ThreadModeRawMutex, NaiveDateTime> = Signal::new();

static BACKLIGHT: StaticCell<Backlight> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();

type Presenter = StatusPresenter<StatusFace<Lcd<SPI2>>, NotifyHaptics>;

/// Haptics forwarded to the `notify` task
struct NotifyHaptics;

impl Haptics for NotifyHaptics {
    fn double_pulse(&mut self) {
        NOTIFY.signal(2);
    }
}

/// Run the SoftDevice event loop
#[embassy_executor::task(pool_size = 1)]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Keep the watch visible to the companion app
#[embassy_executor::task(pool_size = 1)]
async fn advertise(sd: &'static Softdevice, server: &'static Server) -> ! {
    bluetooth::run(sd, server).await
}

/// Vibrate whenever a notification is signaled
#[embassy_executor::task(pool_size = 1)]
async fn notify(mut vibrator: Vibrator) {
    loop {
        let count = NOTIFY.wait().await;
        vibrator.pulse(PulseLength::SHORT, count).await;
    }
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task(pool_size = 1)]
async fn update_battery_status(mut battery: Battery, server: &'static Server) {
    loop {
        if let Some(state) = battery.update().await {
            // Battery status changed
            defmt::info!("Battery status updated");
            BATTERY_STATUS.signal(state);
            if let Err(e) = server.bas.battery_level_set(&state.percent) {
                defmt::warn!("Failed to update battery service: {:?}", e);
            }
        };

        // Re-schedule the timer interrupt in 10s
        Timer::after(Duration::from_secs(10)).await;
    }
}

/// Signal the current time at every full minute.
#[embassy_executor::task(pool_size = 1)]
async fn update_time(clock: Clock) {
    loop {
        Timer::after(clock.until_next_minute()).await;
        TIME.signal(clock.now());
    }
}

/// Feed the watchface with the signaled events
#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(mut presenter: Presenter) {
    let mut tick = Ticker::every(Duration::from_millis(250));
    loop {
        // Every edge counts, a quick reconnect must not hide the disconnect
        while let Ok(connected) = bluetooth::CONNECTION.try_receive() {
            presenter.on_connectivity_changed(connected);
        }

        if let Some(status) = BATTERY_STATUS.try_take() {
            presenter.on_battery_changed(status.percent, status.charging);
        }

        if let Some(time) = TIME.try_take() {
            presenter.on_tick(time);
        }

        tick.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Keep peripheral interrupts clear of the SoftDevice priorities
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Backlight
    // Kept alive for the whole runtime, dropping it would release the pins
    let backlight = BACKLIGHT.init(unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        BACKLIGHT_LEVEL,
    )));
    defmt::debug!("Backlight at level {}", backlight.get_brightness());

    // Initalize Battery
    let mut battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None));
    let battery_state = battery.sample().await;

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let lcd = unwrap!(display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));
    let face = unwrap!(StatusFace::new(lcd, IconTable::builtin())
        .map_err(|_| peripherals::Error::Display));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    if let Err(e) = server.bas.battery_level_set(&battery_state.percent) {
        defmt::warn!("Failed to initialize battery service: {:?}", e);
    }
    let sd: &'static Softdevice = sd;

    // Initialize clock
    let clock = Clock::new(UTC_EPOCH, WATCHFACE.utc_offset_secs);

    // Draw the first frame from the current state
    let presenter = StatusPresenter::new(
        face,
        NotifyHaptics,
        WATCHFACE,
        clock.now(),
        battery_state,
        bluetooth::is_connected(),
    );

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(advertise(sd, server)));
    unwrap!(spawner.spawn(notify(vibrator)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(update_time(clock)));
    unwrap!(spawner.spawn(update_lcd(presenter)));
}
