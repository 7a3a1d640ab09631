//! High-level embedded-controller device access.
//!
//! This is the "just works" layer. Probe a channel to get an [`EcDevice`]
//! carrying an immutable descriptor, then issue typed operations or render
//! the multi-field diagnostic reports. A scriptable simulated controller
//! ([`SimEc`]) stands in for hardware in tests and demos; on Linux the
//! [`dev::DevChannel`] backend talks to the real EC character device.

pub mod device;
pub mod discovery;
pub mod error;
pub mod report;
pub mod sim;

#[cfg(target_os = "linux")]
pub mod dev;

pub use device::EcDevice;
pub use discovery::probe;
pub use error::{DeviceError, Result};
pub use report::{ap_mode_entry_line, flash_report, usb_pd_mux_report, version_report};
pub use sim::{SimEc, SimFailure};

#[cfg(target_os = "linux")]
pub use dev::DevChannel;
