use std::path::PathBuf;

const EIO: i32 = 5;
const EINVAL: i32 = 22;

/// Errors that can occur on an embedded-controller link.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Failed to open the device backing the channel.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An I/O error occurred while the transfer was in flight.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The link reported a transfer failure (link down, timeout, malformed
    /// frame). `code` is the transport's native error code.
    #[error("transfer failed (code {code})")]
    TransferFailed { code: i32 },

    /// The caller's response buffer cannot hold the framed response.
    #[error("response buffer too small ({capacity} bytes, need {needed})")]
    BufferTooSmall { needed: usize, capacity: usize },
}

impl ChannelError {
    /// Numeric transport code, negative-errno style.
    ///
    /// Diagnostic surfaces embed this raw code in rendered text instead of
    /// translating it to prose.
    pub fn code(&self) -> i32 {
        match self {
            ChannelError::Open { source, .. } | ChannelError::Io(source) => {
                source.raw_os_error().map(|e| -e).unwrap_or(-EIO)
            }
            ChannelError::TransferFailed { code } => *code,
            ChannelError::BufferTooSmall { .. } => -EINVAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
