//! Capability registry and text surfaces for embedded-controller commands.
//!
//! Maps symbolic capability names to command codes, versions, and guard
//! predicates evaluated against the immutable device descriptor, and owns
//! the two text surfaces: the reboot keyword parser and the numeric
//! keyboard wake-angle value.

pub mod error;
pub mod reboot;
pub mod registry;
pub mod wake_angle;

pub use error::{RegistryError, Result};
pub use reboot::{parse_reboot, RebootRequest, REBOOT_USAGE};
pub use registry::{capabilities, resolve, Access, Capability};
pub use wake_angle::{encode_query, encode_set, parse_angle, WAKE_ANGLE_PARAM_SIZE};
