use std::fmt;
use std::io;

use ecwire_channel::ChannelError;
use ecwire_device::DeviceError;
use ecwire_proto::ProtoError;
use ecwire_registry::RegistryError;

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn channel_error(context: &str, err: ChannelError) -> CliError {
    match err {
        ChannelError::Open { source, .. } | ChannelError::Io(source) => io_error(context, source),
        other => CliError::new(TRANSPORT_ERROR, format!("{context}: {other}")),
    }
}

pub fn device_error(context: &str, err: DeviceError) -> CliError {
    match err {
        DeviceError::Proto(ProtoError::Transfer(err)) => channel_error(context, err),
        DeviceError::Proto(ProtoError::Device { .. }) => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        DeviceError::Proto(ProtoError::OutOfMemory { .. }) => {
            CliError::new(INTERNAL, format!("{context}: {err}"))
        }
        DeviceError::Proto(_) => CliError::new(TRANSPORT_ERROR, format!("{context}: {err}")),
        DeviceError::Registry(RegistryError::Unavailable { .. }) => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
        DeviceError::Registry(_) => CliError::new(USAGE, format!("{context}: {err}")),
        DeviceError::HelloMismatch { .. } | DeviceError::NoPorts => {
            CliError::new(FAILURE, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_maps_to_usage() {
        let err = device_error("reboot", DeviceError::Registry(RegistryError::NoAction));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn unavailable_capability_maps_to_failure() {
        let err = device_error(
            "wake-angle",
            DeviceError::Registry(RegistryError::Unavailable { name: "kb_wake_angle" }),
        );
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn transport_and_device_failures_stay_distinct() {
        let transport = device_error(
            "info",
            DeviceError::Proto(ProtoError::Transfer(ChannelError::TransferFailed {
                code: -110,
            })),
        );
        assert_eq!(transport.code, TRANSPORT_ERROR);

        let device = device_error("info", DeviceError::Proto(ProtoError::Device { code: 4 }));
        assert_eq!(device.code, FAILURE);
    }

    #[test]
    fn permission_denied_on_open_maps_to_its_own_code() {
        let err = channel_error(
            "open",
            ChannelError::Open {
                path: "/dev/cros_ec".into(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            },
        );
        assert_eq!(err.code, PERMISSION_DENIED);
    }
}
