use ecwire_channel::ChannelError;

use crate::commands::result_name;

const EPROTO: i32 = 71;
const ENOMEM: i32 = 12;

/// Errors that can occur while executing a host command.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// The transaction cannot fit the channel's transfer capacity.
    ///
    /// Raised before the link is touched; the single operation is abandoned.
    #[error("transaction too large for channel ({requested} bytes, limit {limit})")]
    OutOfMemory { requested: usize, limit: usize },

    /// The transport layer failed. Distinct from a device-reported error.
    #[error("transfer error: {0}")]
    Transfer(#[from] ChannelError),

    /// The transport succeeded but the device reported non-success.
    #[error("device reported {} (result {code})", result_name(*code))]
    Device { code: u32 },

    /// A payload exceeds what the wire format can describe.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A frame was shorter than its header or declared payload size.
    #[error("frame truncated (expected {expected} bytes, got {got})")]
    FrameTruncated { expected: usize, got: usize },

    /// A response declared more payload than the request allowed for.
    #[error("response too big ({size} bytes, max {max})")]
    ResponseTooBig { size: usize, max: usize },
}

impl ProtoError {
    /// Transport-column code for diagnostic annotations, negative-errno
    /// style. Device-reported failures render as protocol errors here, with
    /// the device code available from [`device_result`](Self::device_result).
    pub fn xfer_code(&self) -> i32 {
        match self {
            ProtoError::Transfer(err) => err.code(),
            ProtoError::OutOfMemory { .. } => -ENOMEM,
            _ => -EPROTO,
        }
    }

    /// Device result code, or zero when the failure never reached the device.
    pub fn device_result(&self) -> u32 {
        match self {
            ProtoError::Device { code } => *code,
            _ => 0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProtoError>;
