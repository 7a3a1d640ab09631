//! Keyboard wake-angle sub-command of the composite motion-sense command.
//!
//! One command code multiplexes many motion-sense operations; the
//! sub-opcode and a signed angle field select this one. The sentinel
//! `NO_VALUE` (-1) means "read the current angle, do not modify"; any other
//! value is a set whose response echoes the value now in effect.

use ecwire_proto::commands::{MOTIONSENSE_KB_WAKE_ANGLE, MOTION_SENSE_NO_VALUE};

use crate::error::{RegistryError, Result};

/// Motion-sense kb-wake-angle parameter size: sub-opcode + angle.
pub const WAKE_ANGLE_PARAM_SIZE: usize = 3;

/// Encode a read-only query: sentinel value, no write takes place.
pub fn encode_query() -> [u8; WAKE_ANGLE_PARAM_SIZE] {
    encode(MOTION_SENSE_NO_VALUE)
}

/// Encode a set request for `angle` degrees.
///
/// The wire field is signed 16-bit: 65535 bit-casts to the `NO_VALUE`
/// sentinel and degrades into a read.
pub fn encode_set(angle: u16) -> [u8; WAKE_ANGLE_PARAM_SIZE] {
    encode(angle as i16)
}

fn encode(data: i16) -> [u8; WAKE_ANGLE_PARAM_SIZE] {
    let bytes = data.to_le_bytes();
    [MOTIONSENSE_KB_WAKE_ANGLE, bytes[0], bytes[1]]
}

/// Parse the wake-angle text surface: an unsigned 16-bit value in decimal,
/// hex (`0x` prefix), or octal (leading zero).
pub fn parse_angle(input: &str) -> Result<u16> {
    let text = input.trim();

    let invalid = || RegistryError::InvalidNumber {
        input: input.to_string(),
    };

    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };

    if digits.is_empty() {
        return Err(invalid());
    }
    u16::from_str_radix(digits, radix).map_err(|_| invalid())
}
