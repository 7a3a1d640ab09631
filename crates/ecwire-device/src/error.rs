use ecwire_proto::ProtoError;
use ecwire_registry::RegistryError;

const EPROTO: i32 = 71;

/// Errors surfaced by high-level device operations.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// A command exchange failed (transport, device result, or framing).
    #[error(transparent)]
    Proto(#[from] ProtoError),

    /// Capability resolution or text parsing failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The controller answered the hello probe with the wrong echo.
    #[error("hello echo mismatch (expected {expected:#010x}, got {got:#010x})")]
    HelloMismatch { expected: u32, got: u32 },

    /// Every enumerated USB-PD port failed its detail query.
    #[error("no USB-PD port reported mux state")]
    NoPorts,
}

impl DeviceError {
    /// Transport-column code for diagnostic annotations.
    pub fn xfer_code(&self) -> i32 {
        match self {
            DeviceError::Proto(err) => err.xfer_code(),
            _ => -EPROTO,
        }
    }

    /// Device result code, or zero when the device never answered.
    pub fn device_result(&self) -> u32 {
        match self {
            DeviceError::Proto(err) => err.device_result(),
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeviceError>;
