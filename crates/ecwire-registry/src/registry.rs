use ecwire_proto::commands::{
    CMD_FLASH_INFO, CMD_GET_FEATURES, CMD_GET_VERSION, CMD_MOTION_SENSE, CMD_REBOOT_EC,
    CMD_USB_PD_MUX_INFO, MOTIONSENSE_VERSION,
};
use ecwire_proto::{DeviceDescriptor, Feature};

use crate::error::{RegistryError, Result};

/// How a capability's surface can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// One entry in the static capability table.
///
/// The guard predicate is evaluated against the immutable device descriptor
/// at query time; a capability whose guard is false is reported as
/// unavailable, never attempted.
pub struct Capability {
    pub name: &'static str,
    pub command: u16,
    pub version: u8,
    pub access: Access,
    guard: fn(&DeviceDescriptor) -> bool,
}

impl Capability {
    /// Whether this capability is visible on the described device.
    pub fn available(&self, desc: &DeviceDescriptor) -> bool {
        (self.guard)(desc)
    }

    /// Fail with `Unavailable` when the guard rejects the device.
    pub fn ensure_available(&self, desc: &DeviceDescriptor) -> Result<()> {
        if self.available(desc) {
            Ok(())
        } else {
            Err(RegistryError::Unavailable { name: self.name })
        }
    }
}

fn any_device(_: &DeviceDescriptor) -> bool {
    true
}

fn needs_motion_sense(desc: &DeviceDescriptor) -> bool {
    desc.features.has(Feature::MotionSense)
}

fn primary_only(desc: &DeviceDescriptor) -> bool {
    desc.is_primary()
}

const CAPABILITIES: &[Capability] = &[
    Capability {
        name: "kb_wake_angle",
        command: CMD_MOTION_SENSE,
        version: MOTIONSENSE_VERSION,
        access: Access::ReadWrite,
        guard: needs_motion_sense,
    },
    Capability {
        name: "reboot",
        command: CMD_REBOOT_EC,
        version: 0,
        access: Access::ReadWrite,
        guard: any_device,
    },
    Capability {
        name: "version",
        command: CMD_GET_VERSION,
        version: 0,
        access: Access::ReadOnly,
        guard: any_device,
    },
    Capability {
        name: "flashinfo",
        command: CMD_FLASH_INFO,
        version: 0,
        access: Access::ReadOnly,
        guard: any_device,
    },
    Capability {
        name: "usbpdmuxinfo",
        command: CMD_USB_PD_MUX_INFO,
        version: 0,
        access: Access::ReadOnly,
        guard: primary_only,
    },
    Capability {
        name: "ap_mode_entry",
        command: CMD_GET_FEATURES,
        version: 0,
        access: Access::ReadOnly,
        guard: primary_only,
    },
];

/// The full capability table, in surface order.
pub fn capabilities() -> &'static [Capability] {
    CAPABILITIES
}

/// Resolve a symbolic capability name.
pub fn resolve(name: &str) -> Result<&'static Capability> {
    CAPABILITIES
        .iter()
        .find(|cap| cap.name == name)
        .ok_or_else(|| RegistryError::UnknownCapability(name.to_string()))
}
