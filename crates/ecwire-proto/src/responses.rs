//! Typed views over response payloads.
//!
//! Response layouts are fixed little-endian structs with trailing string
//! fields of fixed width. The controller does not guarantee that string
//! fields are null-terminated, so decoding stops at the first NUL and never
//! reads past the field boundary.

use bytes::Buf;

use crate::commands::{IMAGE_RO, IMAGE_RW, IMAGE_UNKNOWN};
use crate::error::{ProtoError, Result};

/// RO/RW version strings and the running image copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcVersion {
    pub version_string_ro: String,
    pub version_string_rw: String,
    pub current_image: u32,
}

impl EcVersion {
    /// Two 32-byte version strings, a reserved 32-byte field, and the
    /// running-image word.
    pub const SIZE: usize = 32 + 32 + 32 + 4;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        let ro = fixed_str(&buf[..32]);
        buf.advance(32);
        let rw = fixed_str(&buf[..32]);
        buf.advance(32);
        buf.advance(32); // reserved
        let current_image = buf.get_u32_le();
        Ok(Self {
            version_string_ro: ro,
            version_string_rw: rw,
            current_image,
        })
    }
}

/// Returns the display name of a firmware image copy.
pub fn image_name(image: u32) -> &'static str {
    match image {
        IMAGE_UNKNOWN => "unknown",
        IMAGE_RO => "RO",
        IMAGE_RW => "RW",
        _ => "?",
    }
}

/// Chip vendor, name, and revision strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    pub vendor: String,
    pub name: String,
    pub revision: String,
}

impl ChipInfo {
    pub const SIZE: usize = 32 * 3;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            vendor: fixed_str(&buf[..32]),
            name: fixed_str(&buf[32..64]),
            revision: fixed_str(&buf[64..96]),
        })
    }
}

/// Numeric board version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardVersion {
    pub board_version: u16,
}

impl BoardVersion {
    pub const SIZE: usize = 2;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            board_version: buf.get_u16_le(),
        })
    }
}

/// Flash geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashInfo {
    pub flash_size: u32,
    pub write_block_size: u32,
    pub erase_block_size: u32,
    pub protect_block_size: u32,
}

impl FlashInfo {
    pub const SIZE: usize = 4 * 4;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            flash_size: buf.get_u32_le(),
            write_block_size: buf.get_u32_le(),
            erase_block_size: buf.get_u32_le(),
            protect_block_size: buf.get_u32_le(),
        })
    }
}

/// Capability bitmask words, as reported by the features query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureWords {
    pub flags: [u32; 2],
}

impl FeatureWords {
    pub const SIZE: usize = 8;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            flags: [buf.get_u32_le(), buf.get_u32_le()],
        })
    }
}

/// USB-PD port count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbPdPorts {
    pub num_ports: u8,
}

impl UsbPdPorts {
    pub const SIZE: usize = 1;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            num_ports: buf.get_u8(),
        })
    }
}

/// Per-port USB-PD mux state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsbPdMuxInfo {
    pub flags: u8,
}

impl UsbPdMuxInfo {
    pub const SIZE: usize = 1;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self { flags: buf.get_u8() })
    }
}

/// Keyboard wake-angle echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeAngle {
    pub ret: i16,
}

impl WakeAngle {
    pub const SIZE: usize = 2;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            ret: buf.get_i16_le(),
        })
    }
}

/// Hello echo word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelloResponse {
    pub out_data: u32,
}

impl HelloResponse {
    pub const SIZE: usize = 4;

    pub fn decode(payload: &[u8]) -> Result<Self> {
        let mut buf = checked(payload, Self::SIZE)?;
        Ok(Self {
            out_data: buf.get_u32_le(),
        })
    }
}

/// Decode a free-form text payload (build info).
///
/// The whole payload is one string field: terminate at the first NUL, or at
/// the payload end if the controller never terminated it.
pub fn decode_text(payload: &[u8]) -> String {
    fixed_str(payload)
}

fn checked(payload: &[u8], size: usize) -> Result<&[u8]> {
    if payload.len() < size {
        return Err(ProtoError::FrameTruncated {
            expected: size,
            got: payload.len(),
        });
    }
    Ok(payload)
}

fn fixed_str(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
