//! Scriptable in-process controller.
//!
//! Speaks the real wire format over [`EcChannel`], so everything above the
//! channel boundary — codec, registry, device operations, reports, the CLI
//! `--sim` mode — runs unmodified against it. Individual commands and
//! USB-PD ports can be scripted to fail at either the transport or the
//! device layer.

use std::collections::HashMap;

use bytes::BytesMut;
use ecwire_channel::{ChannelError, EcChannel};
use ecwire_proto::codec::{decode_request, encode_response};
use ecwire_proto::commands::{
    CMD_FLASH_INFO, CMD_GET_BOARD_VERSION, CMD_GET_BUILD_INFO, CMD_GET_CHIP_INFO,
    CMD_GET_FEATURES, CMD_GET_VERSION, CMD_HELLO, CMD_MOTION_SENSE, CMD_REBOOT_EC,
    CMD_USB_PD_MUX_INFO, CMD_USB_PD_PORTS, HELLO_DELTA, MOTIONSENSE_KB_WAKE_ANGLE,
    MOTION_SENSE_NO_VALUE, RES_INVALID_COMMAND, RES_INVALID_PARAM, RES_SUCCESS,
    USB_PD_MUX_DP_ENABLED, USB_PD_MUX_HPD_LVL, USB_PD_MUX_USB_ENABLED,
};
use ecwire_proto::{Feature, FeatureSet};

/// How a scripted command should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimFailure {
    /// Fail below the protocol: the transfer itself errors with this code.
    Transport(i32),
    /// Transport succeeds but the device reports this non-zero result.
    Device(u32),
}

/// A simulated embedded controller.
pub struct SimEc {
    version_ro: String,
    version_rw: String,
    current_image: u32,
    build_info: String,
    chip_vendor: String,
    chip_name: String,
    chip_revision: String,
    board_version: u16,
    flash: [u32; 4],
    features: FeatureSet,
    wake_angle: u16,
    wake_angle_writes: usize,
    num_ports: u8,
    mux_flags: Vec<u8>,
    fail: HashMap<u16, SimFailure>,
    fail_mux_port: HashMap<u8, SimFailure>,
    reboots: Vec<(u8, u8)>,
}

impl SimEc {
    /// A controller with a plausible default personality.
    pub fn new() -> Self {
        Self {
            version_ro: "host_v2.0.5-ro".to_string(),
            version_rw: "host_v2.0.17-rw".to_string(),
            current_image: 2,
            build_info: "host_v2.0.17 2026-06-11 09:14:02 builder@ec".to_string(),
            chip_vendor: "nuvoton".to_string(),
            chip_name: "npcx796fc".to_string(),
            chip_revision: "A1".to_string(),
            board_version: 4,
            flash: [0x0008_0000, 4, 0x1000, 0x8000],
            features: FeatureSet::with(&[
                Feature::Flash,
                Feature::Keyboard,
                Feature::MotionSense,
                Feature::UsbPd,
            ]),
            wake_angle: 180,
            wake_angle_writes: 0,
            num_ports: 2,
            mux_flags: vec![
                USB_PD_MUX_USB_ENABLED,
                USB_PD_MUX_USB_ENABLED | USB_PD_MUX_DP_ENABLED | USB_PD_MUX_HPD_LVL,
            ],
            fail: HashMap::new(),
            fail_mux_port: HashMap::new(),
            reboots: Vec::new(),
        }
    }

    /// Replace the advertised feature words.
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    /// Set the stored wake angle.
    pub fn with_wake_angle(mut self, angle: u16) -> Self {
        self.wake_angle = angle;
        self
    }

    /// Set the number of USB-PD ports; flags default to USB-enabled.
    pub fn with_num_ports(mut self, num_ports: u8) -> Self {
        self.num_ports = num_ports;
        self.mux_flags = vec![USB_PD_MUX_USB_ENABLED; num_ports as usize];
        self
    }

    /// Set one port's mux flags.
    pub fn with_mux_flags(mut self, port: u8, flags: u8) -> Self {
        if let Some(slot) = self.mux_flags.get_mut(port as usize) {
            *slot = flags;
        }
        self
    }

    /// Script a failure for every exchange of `command`.
    pub fn fail_command(mut self, command: u16, failure: SimFailure) -> Self {
        self.fail.insert(command, failure);
        self
    }

    /// Script a failure for one port's mux detail query only.
    pub fn fail_mux_port(mut self, port: u8, failure: SimFailure) -> Self {
        self.fail_mux_port.insert(port, failure);
        self
    }

    /// The advertised feature words.
    pub fn feature_set(&self) -> FeatureSet {
        self.features
    }

    /// The stored wake angle.
    pub fn wake_angle(&self) -> u16 {
        self.wake_angle
    }

    /// How many wake-angle writes the controller has accepted.
    pub fn wake_angle_writes(&self) -> usize {
        self.wake_angle_writes
    }

    /// Reboot requests received, as `(cmd, flags)` pairs.
    pub fn reboots(&self) -> &[(u8, u8)] {
        &self.reboots
    }

    fn handle(&mut self, command: u16, version: u8, payload: &[u8]) -> (u32, Vec<u8>) {
        match command {
            CMD_HELLO => {
                if payload.len() < 4 {
                    return (RES_INVALID_PARAM, Vec::new());
                }
                let mut word = [0u8; 4];
                word.copy_from_slice(&payload[..4]);
                let out = u32::from_le_bytes(word).wrapping_add(HELLO_DELTA);
                (RES_SUCCESS, out.to_le_bytes().to_vec())
            }
            CMD_GET_VERSION => {
                let mut data = Vec::with_capacity(100);
                data.extend(str_field(&self.version_ro, 32));
                data.extend(str_field(&self.version_rw, 32));
                data.extend([0u8; 32]);
                data.extend(self.current_image.to_le_bytes());
                (RES_SUCCESS, data)
            }
            CMD_GET_BUILD_INFO => {
                let mut data = self.build_info.as_bytes().to_vec();
                data.push(0);
                (RES_SUCCESS, data)
            }
            CMD_GET_CHIP_INFO => {
                let mut data = Vec::with_capacity(96);
                data.extend(str_field(&self.chip_vendor, 32));
                data.extend(str_field(&self.chip_name, 32));
                data.extend(str_field(&self.chip_revision, 32));
                (RES_SUCCESS, data)
            }
            CMD_GET_BOARD_VERSION => (RES_SUCCESS, self.board_version.to_le_bytes().to_vec()),
            CMD_GET_FEATURES => {
                let words = self.features.words();
                let mut data = Vec::with_capacity(8);
                data.extend(words[0].to_le_bytes());
                data.extend(words[1].to_le_bytes());
                (RES_SUCCESS, data)
            }
            CMD_FLASH_INFO => {
                let mut data = Vec::with_capacity(16);
                for word in self.flash {
                    data.extend(word.to_le_bytes());
                }
                (RES_SUCCESS, data)
            }
            CMD_MOTION_SENSE => self.motion_sense(version, payload),
            CMD_REBOOT_EC => {
                if payload.len() < 2 {
                    return (RES_INVALID_PARAM, Vec::new());
                }
                self.reboots.push((payload[0], payload[1]));
                (RES_SUCCESS, Vec::new())
            }
            CMD_USB_PD_PORTS => (RES_SUCCESS, vec![self.num_ports]),
            CMD_USB_PD_MUX_INFO => {
                let Some(&port) = payload.first() else {
                    return (RES_INVALID_PARAM, Vec::new());
                };
                match self.mux_flags.get(port as usize) {
                    Some(&flags) => (RES_SUCCESS, vec![flags]),
                    None => (RES_INVALID_PARAM, Vec::new()),
                }
            }
            _ => (RES_INVALID_COMMAND, Vec::new()),
        }
    }

    fn motion_sense(&mut self, version: u8, payload: &[u8]) -> (u32, Vec<u8>) {
        if version != 2 || payload.len() < 3 || payload[0] != MOTIONSENSE_KB_WAKE_ANGLE {
            return (RES_INVALID_PARAM, Vec::new());
        }
        let data = i16::from_le_bytes([payload[1], payload[2]]);
        if data != MOTION_SENSE_NO_VALUE {
            self.wake_angle = data as u16;
            self.wake_angle_writes += 1;
        }
        let ret = self.wake_angle as i16;
        (RES_SUCCESS, ret.to_le_bytes().to_vec())
    }
}

impl Default for SimEc {
    fn default() -> Self {
        Self::new()
    }
}

impl EcChannel for SimEc {
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> ecwire_channel::Result<usize> {
        let frame = decode_request(request)
            .map_err(|_| ChannelError::TransferFailed { code: -71 })?;

        let scripted = match self.fail.get(&frame.command).copied() {
            failure @ Some(_) => failure,
            None if frame.command == CMD_USB_PD_MUX_INFO => frame
                .payload
                .first()
                .and_then(|port| self.fail_mux_port.get(port).copied()),
            None => None,
        };

        let (result, data) = match scripted {
            Some(SimFailure::Transport(code)) => {
                return Err(ChannelError::TransferFailed { code });
            }
            Some(SimFailure::Device(code)) => (code, Vec::new()),
            None => self.handle(frame.command, frame.version, &frame.payload),
        };

        let mut framed = BytesMut::new();
        encode_response(result, &data, &mut framed)
            .map_err(|_| ChannelError::TransferFailed { code: -71 })?;
        if framed.len() > response.len() {
            return Err(ChannelError::BufferTooSmall {
                needed: framed.len(),
                capacity: response.len(),
            });
        }
        response[..framed.len()].copy_from_slice(&framed);
        Ok(framed.len())
    }
}

fn str_field(text: &str, width: usize) -> Vec<u8> {
    let mut field = vec![0u8; width];
    let len = text.len().min(width);
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
    field
}

#[cfg(test)]
mod tests {
    use ecwire_proto::execute;

    use super::*;

    #[test]
    fn answers_hello_with_the_expected_delta() {
        let mut sim = SimEc::new();
        let payload = execute(&mut sim, CMD_HELLO, 0, &0xa0b0_c0d0u32.to_le_bytes(), 4).unwrap();
        assert_eq!(payload.as_ref(), &0xa1b2_c3d4u32.to_le_bytes());
    }

    #[test]
    fn unknown_command_reports_invalid_command() {
        let mut sim = SimEc::new();
        let err = execute(&mut sim, 0x7fff, 0, &[], 0).unwrap_err();
        assert!(matches!(
            err,
            ecwire_proto::ProtoError::Device { code } if code == RES_INVALID_COMMAND
        ));
    }

    #[test]
    fn scripted_device_failure_answers_with_result_code() {
        let mut sim = SimEc::new().fail_command(CMD_GET_CHIP_INFO, SimFailure::Device(9));
        let err = execute(&mut sim, CMD_GET_CHIP_INFO, 0, &[], 96).unwrap_err();
        assert!(matches!(err, ecwire_proto::ProtoError::Device { code: 9 }));
    }

    #[test]
    fn scripted_transport_failure_errors_below_the_protocol() {
        let mut sim = SimEc::new().fail_command(CMD_GET_CHIP_INFO, SimFailure::Transport(-71));
        let err = execute(&mut sim, CMD_GET_CHIP_INFO, 0, &[], 96).unwrap_err();
        assert!(matches!(err, ecwire_proto::ProtoError::Transfer(_)));
    }

    #[test]
    fn wake_angle_echo_and_bookkeeping() {
        let mut sim = SimEc::new();

        // Set 45: one write, echoed back.
        let set = [MOTIONSENSE_KB_WAKE_ANGLE, 45, 0];
        let payload = execute(&mut sim, CMD_MOTION_SENSE, 2, &set, 2).unwrap();
        assert_eq!(payload.as_ref(), &45i16.to_le_bytes());
        assert_eq!(sim.wake_angle_writes(), 1);

        // Sentinel query: no further writes.
        let query = [MOTIONSENSE_KB_WAKE_ANGLE, 0xff, 0xff];
        let payload = execute(&mut sim, CMD_MOTION_SENSE, 2, &query, 2).unwrap();
        assert_eq!(payload.as_ref(), &45i16.to_le_bytes());
        assert_eq!(sim.wake_angle_writes(), 1);
    }

    #[test]
    fn mux_query_for_unknown_port_is_a_device_error() {
        let mut sim = SimEc::new().with_num_ports(1);
        let err = execute(&mut sim, CMD_USB_PD_MUX_INFO, 0, &[5], 1).unwrap_err();
        assert!(matches!(
            err,
            ecwire_proto::ProtoError::Device { code } if code == RES_INVALID_PARAM
        ));
    }
}
