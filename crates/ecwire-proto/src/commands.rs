//! Device-defined command, result, and flag constants.
//!
//! Values follow the ChromeOS EC host command set. A per-device command
//! offset may be added to any command code when one physical link
//! multiplexes several logical controllers.

/// Query lowest/highest supported protocol version.
pub const CMD_PROTO_VERSION: u16 = 0x0000;
/// Echo check used to probe that the controller is alive.
pub const CMD_HELLO: u16 = 0x0001;
/// RO/RW version strings and the currently running image.
pub const CMD_GET_VERSION: u16 = 0x0002;
/// Free-form build information string.
pub const CMD_GET_BUILD_INFO: u16 = 0x0004;
/// Chip vendor/name/revision strings.
pub const CMD_GET_CHIP_INFO: u16 = 0x0005;
/// Numeric board version.
pub const CMD_GET_BOARD_VERSION: u16 = 0x0006;
/// Capability bitmask words.
pub const CMD_GET_FEATURES: u16 = 0x000d;
/// Flash geometry.
pub const CMD_FLASH_INFO: u16 = 0x0010;
/// Composite motion-sense command (sub-opcode in the payload).
pub const CMD_MOTION_SENSE: u16 = 0x002b;
/// Reboot the controller.
pub const CMD_REBOOT_EC: u16 = 0x00d2;
/// Number of USB-PD ports.
pub const CMD_USB_PD_PORTS: u16 = 0x0102;
/// Per-port USB-PD mux state.
pub const CMD_USB_PD_MUX_INFO: u16 = 0x011a;

/// Largest command payload carried in one exchange.
pub const MAX_PARAM_SIZE: usize = 0xfc;

// Result codes reported by the controller.
pub const RES_SUCCESS: u32 = 0;
pub const RES_INVALID_COMMAND: u32 = 1;
pub const RES_ERROR: u32 = 2;
pub const RES_INVALID_PARAM: u32 = 3;
pub const RES_ACCESS_DENIED: u32 = 4;
pub const RES_INVALID_RESPONSE: u32 = 5;
pub const RES_INVALID_VERSION: u32 = 6;
pub const RES_INVALID_CHECKSUM: u32 = 7;
pub const RES_IN_PROGRESS: u32 = 8;
pub const RES_UNAVAILABLE: u32 = 9;
pub const RES_TIMEOUT: u32 = 10;
pub const RES_OVERFLOW: u32 = 11;
pub const RES_INVALID_HEADER: u32 = 12;
pub const RES_REQUEST_TRUNCATED: u32 = 13;
pub const RES_RESPONSE_TOO_BIG: u32 = 14;
pub const RES_BUS_ERROR: u32 = 15;
pub const RES_BUSY: u32 = 16;

/// Returns a human-readable name for a result code.
pub fn result_name(code: u32) -> &'static str {
    match code {
        RES_SUCCESS => "SUCCESS",
        RES_INVALID_COMMAND => "INVALID_COMMAND",
        RES_ERROR => "ERROR",
        RES_INVALID_PARAM => "INVALID_PARAM",
        RES_ACCESS_DENIED => "ACCESS_DENIED",
        RES_INVALID_RESPONSE => "INVALID_RESPONSE",
        RES_INVALID_VERSION => "INVALID_VERSION",
        RES_INVALID_CHECKSUM => "INVALID_CHECKSUM",
        RES_IN_PROGRESS => "IN_PROGRESS",
        RES_UNAVAILABLE => "UNAVAILABLE",
        RES_TIMEOUT => "TIMEOUT",
        RES_OVERFLOW => "OVERFLOW",
        RES_INVALID_HEADER => "INVALID_HEADER",
        RES_REQUEST_TRUNCATED => "REQUEST_TRUNCATED",
        RES_RESPONSE_TOO_BIG => "RESPONSE_TOO_BIG",
        RES_BUS_ERROR => "BUS_ERROR",
        RES_BUSY => "BUSY",
        _ => "UNKNOWN",
    }
}

// Reboot command ordinals (ec_params_reboot_ec.cmd).
pub const REBOOT_CANCEL: u8 = 0;
pub const REBOOT_JUMP_RO: u8 = 1;
pub const REBOOT_JUMP_RW: u8 = 2;
pub const REBOOT_COLD: u8 = 4;
pub const REBOOT_DISABLE_JUMP: u8 = 5;
pub const REBOOT_HIBERNATE: u8 = 6;
pub const REBOOT_COLD_AP_OFF: u8 = 7;

/// Defer the requested reboot until the AP shuts down.
pub const REBOOT_FLAG_ON_AP_SHUTDOWN: u8 = 1 << 1;

// Motion-sense sub-opcodes.
pub const MOTIONSENSE_KB_WAKE_ANGLE: u8 = 5;
/// Motion-sense command version carrying the kb-wake-angle sub-command.
pub const MOTIONSENSE_VERSION: u8 = 2;
/// Sentinel meaning "read current state, do not modify".
pub const MOTION_SENSE_NO_VALUE: i16 = -1;

// USB-PD mux state flag bits.
pub const USB_PD_MUX_USB_ENABLED: u8 = 1 << 0;
pub const USB_PD_MUX_DP_ENABLED: u8 = 1 << 1;
pub const USB_PD_MUX_POLARITY_INVERTED: u8 = 1 << 2;
pub const USB_PD_MUX_HPD_IRQ: u8 = 1 << 3;
pub const USB_PD_MUX_HPD_LVL: u8 = 1 << 4;
pub const USB_PD_MUX_SAFE_MODE: u8 = 1 << 5;
pub const USB_PD_MUX_TBT_COMPAT_ENABLED: u8 = 1 << 6;
pub const USB_PD_MUX_USB4_ENABLED: u8 = 1 << 7;

// Firmware image copies (ec_response_get_version.current_image).
pub const IMAGE_UNKNOWN: u32 = 0;
pub const IMAGE_RO: u32 = 1;
pub const IMAGE_RW: u32 = 2;

/// Expected hello echo delta: `out_data = in_data + HELLO_DELTA`.
pub const HELLO_DELTA: u32 = 0x0102_0304;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_names_cover_defined_codes() {
        assert_eq!(result_name(RES_SUCCESS), "SUCCESS");
        assert_eq!(result_name(RES_BUSY), "BUSY");
        assert_eq!(result_name(99), "UNKNOWN");
    }

    #[test]
    fn mux_flag_bits_are_distinct() {
        let all = [
            USB_PD_MUX_USB_ENABLED,
            USB_PD_MUX_DP_ENABLED,
            USB_PD_MUX_POLARITY_INVERTED,
            USB_PD_MUX_HPD_IRQ,
            USB_PD_MUX_HPD_LVL,
            USB_PD_MUX_SAFE_MODE,
            USB_PD_MUX_TBT_COMPAT_ENABLED,
            USB_PD_MUX_USB4_ENABLED,
        ];
        let mut seen = 0u8;
        for bit in all {
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0xff);
    }
}
