/// Errors produced while resolving capabilities or parsing their text
/// surfaces. These are all caller-input failures; nothing here touches the
/// link.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No capability is registered under this name.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// The capability exists but its guard rejects this device.
    #[error("capability {name} unavailable on this device")]
    Unavailable { name: &'static str },

    /// A reboot command line contained no action keyword.
    #[error("no reboot action keyword given")]
    NoAction,

    /// A numeric value did not parse as an unsigned 16-bit integer.
    #[error("invalid numeric value: {input:?}")]
    InvalidNumber { input: String },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
