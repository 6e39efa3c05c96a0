//! Status watchface for the PineTime
//!
//! The library holds everything that does not touch the hardware: the
//! observed watch status, the presenter reacting to clock, battery and
//! connectivity events, and the face drawn onto any `embedded-graphics`
//! draw target. The firmware binary (`firmware` feature) wires it to the
//! PineTime peripherals.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod clock;
pub mod config;
pub mod error;
pub mod presenter;
pub mod status;
pub mod ui;

pub use config::{TimeFormat, WatchFaceConfig};
pub use error::Error;
pub use presenter::{Haptics, StatusPresenter, WatchEvents};
pub use status::{BatteryIcon, BatteryReporter, BatteryState, TextColor, WatchStatus};
pub use ui::{FaceContent, WatchFaceView};
