//! Bluetooth module
//!
//! Advertises the watch as connectable peripheral with a battery service
//! and reports whether a central is connected.

// Core
use core::{
    mem,
    sync::atomic::{AtomicBool, Ordering},
};

// BLE
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use nrf_softdevice::{
    self,
    ble::{
        advertisement_builder::{
            Flag, LegacyAdvertisementBuilder, LegacyAdvertisementPayload, ServiceList,
            ServiceUuid16,
        },
        gatt_server, peripheral,
    },
    raw, Config, Softdevice,
};

const DEVICE_NAME: &[u8] = b"PineTime";

/// Connection state changes, in order
pub static CONNECTION: Channel<ThreadModeRawMutex, bool, 4> = Channel::new();

/// Current connection state
static CONNECTED: AtomicBool = AtomicBool::new(false);

pub static ADV_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .flags(&[Flag::GeneralDiscovery, Flag::LE_Only])
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .full_name("PineTime")
    .build();

pub static SCAN_DATA: LegacyAdvertisementPayload = LegacyAdvertisementBuilder::new()
    .services_16(ServiceList::Complete, &[ServiceUuid16::BATTERY])
    .build();

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub bas: BatteryService,
}

#[nrf_softdevice::gatt_service(uuid = "180f")]
pub struct BatteryService {
    #[characteristic(uuid = "2a19", read, notify)]
    pub battery_level: u8,
}

pub fn generate_config() -> Config {
    Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 256 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: DEVICE_NAME.as_ptr() as _,
            current_len: DEVICE_NAME.len() as u16,
            max_len: DEVICE_NAME.len() as u16,
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Whether a central is connected right now
pub fn is_connected() -> bool {
    CONNECTED.load(Ordering::Relaxed)
}

fn set_connected(connected: bool) {
    CONNECTED.store(connected, Ordering::Relaxed);
    if CONNECTION.try_send(connected).is_err() {
        defmt::warn!("Connection event queue full, dropping {}", connected);
    }
}

/// Advertise, serve the connected central until it disconnects, repeat.
pub async fn run(sd: &'static Softdevice, server: &'static Server) -> ! {
    let config = peripheral::Config::default();
    loop {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &ADV_DATA,
            scan_data: &SCAN_DATA,
        };
        let conn = match peripheral::advertise_connectable(sd, adv, &config).await {
            Ok(conn) => conn,
            Err(e) => {
                defmt::warn!("Advertising failed: {:?}", e);
                continue;
            }
        };

        defmt::info!("Central connected");
        set_connected(true);

        let e = gatt_server::run(&conn, server, |_| {}).await;

        defmt::info!("Central disconnected: {:?}", e);
        set_connected(false);
    }
}
