use bytes::Bytes;
use ecwire_channel::EcChannel;
use ecwire_proto::commands::{
    CMD_FLASH_INFO, CMD_GET_BOARD_VERSION, CMD_GET_BUILD_INFO, CMD_GET_CHIP_INFO,
    CMD_GET_FEATURES, CMD_GET_VERSION, CMD_HELLO, CMD_MOTION_SENSE, CMD_REBOOT_EC,
    CMD_USB_PD_MUX_INFO, CMD_USB_PD_PORTS, HELLO_DELTA, MAX_PARAM_SIZE, MOTIONSENSE_VERSION,
};
use ecwire_proto::responses::{
    BoardVersion, ChipInfo, EcVersion, FeatureWords, FlashInfo, HelloResponse, UsbPdMuxInfo,
    UsbPdPorts, WakeAngle,
};
use ecwire_proto::{execute, DeviceDescriptor, Feature, FeatureSet};
use ecwire_registry::{encode_query, encode_set, parse_reboot, resolve};

use crate::error::{DeviceError, Result};

/// One logical controller behind a channel.
///
/// Owns the channel — `&mut self` on every operation is what keeps
/// transactions non-overlapping — and carries the immutable descriptor
/// discovered at probe time. The per-device command offset is applied to
/// every command code issued through [`command`](Self::command).
pub struct EcDevice<C> {
    channel: C,
    descriptor: DeviceDescriptor,
}

impl<C> core::fmt::Debug for EcDevice<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EcDevice")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl<C: EcChannel> EcDevice<C> {
    /// Wrap a channel with an already-known descriptor.
    ///
    /// Most callers should use [`crate::discovery::probe`] instead, which
    /// fills the feature snapshot from the device itself.
    pub fn new(channel: C, descriptor: DeviceDescriptor) -> Self {
        Self {
            channel,
            descriptor,
        }
    }

    /// The immutable device descriptor.
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub(crate) fn with_features(mut self, features: FeatureSet) -> Self {
        self.descriptor.features = features;
        self
    }

    /// Issue one raw command, offset applied.
    pub fn command(
        &mut self,
        code: u16,
        version: u8,
        request: &[u8],
        max_insize: usize,
    ) -> Result<Bytes> {
        let code = code.wrapping_add(self.descriptor.cmd_offset);
        Ok(execute(&mut self.channel, code, version, request, max_insize)?)
    }

    /// Echo probe; verifies the controller is alive and speaking the
    /// protocol.
    pub fn hello(&mut self) -> Result<()> {
        const TOKEN: u32 = 0xa0b0_c0d0;
        let payload = self.command(CMD_HELLO, 0, &TOKEN.to_le_bytes(), HelloResponse::SIZE)?;
        let resp = HelloResponse::decode(&payload)?;
        let expected = TOKEN.wrapping_add(HELLO_DELTA);
        if resp.out_data != expected {
            return Err(DeviceError::HelloMismatch {
                expected,
                got: resp.out_data,
            });
        }
        Ok(())
    }

    /// RO/RW version strings and the running image. RW may change between
    /// calls.
    pub fn version(&mut self) -> Result<EcVersion> {
        let payload = self.command(CMD_GET_VERSION, 0, &[], EcVersion::SIZE)?;
        Ok(EcVersion::decode(&payload)?)
    }

    /// Free-form build information string.
    pub fn build_info(&mut self) -> Result<String> {
        let payload = self.command(CMD_GET_BUILD_INFO, 0, &[], MAX_PARAM_SIZE)?;
        Ok(ecwire_proto::responses::decode_text(&payload))
    }

    /// Chip vendor/name/revision.
    pub fn chip_info(&mut self) -> Result<ChipInfo> {
        let payload = self.command(CMD_GET_CHIP_INFO, 0, &[], ChipInfo::SIZE)?;
        Ok(ChipInfo::decode(&payload)?)
    }

    /// Numeric board version.
    pub fn board_version(&mut self) -> Result<BoardVersion> {
        let payload = self.command(CMD_GET_BOARD_VERSION, 0, &[], BoardVersion::SIZE)?;
        Ok(BoardVersion::decode(&payload)?)
    }

    /// Flash geometry. Should never change, but is queried each time anyway.
    pub fn flash_info(&mut self) -> Result<FlashInfo> {
        let payload = self.command(CMD_FLASH_INFO, 0, &[], FlashInfo::SIZE)?;
        Ok(FlashInfo::decode(&payload)?)
    }

    /// Fresh feature words from the device (not the snapshot).
    pub fn features(&mut self) -> Result<FeatureSet> {
        let payload = self.command(CMD_GET_FEATURES, 0, &[], FeatureWords::SIZE)?;
        Ok(FeatureWords::decode(&payload)?.into())
    }

    /// Parse a reboot command line and send it. A pure control exchange:
    /// no response payload is expected.
    pub fn reboot(&mut self, input: &str) -> Result<()> {
        let request = parse_reboot(input)?;
        self.command(CMD_REBOOT_EC, 0, &request.encode(), 0)?;
        Ok(())
    }

    /// Current keyboard wake angle, in degrees.
    pub fn kb_wake_angle(&mut self) -> Result<i16> {
        resolve("kb_wake_angle")?.ensure_available(&self.descriptor)?;
        let payload =
            self.command(CMD_MOTION_SENSE, MOTIONSENSE_VERSION, &encode_query(), WakeAngle::SIZE)?;
        Ok(WakeAngle::decode(&payload)?.ret)
    }

    /// Set the keyboard wake angle; returns the value the controller
    /// acknowledges.
    pub fn set_kb_wake_angle(&mut self, angle: u16) -> Result<i16> {
        resolve("kb_wake_angle")?.ensure_available(&self.descriptor)?;
        let payload =
            self.command(CMD_MOTION_SENSE, MOTIONSENSE_VERSION, &encode_set(angle), WakeAngle::SIZE)?;
        Ok(WakeAngle::decode(&payload)?.ret)
    }

    /// Number of USB-PD ports.
    pub fn usb_pd_ports(&mut self) -> Result<u8> {
        resolve("usbpdmuxinfo")?.ensure_available(&self.descriptor)?;
        let payload = self.command(CMD_USB_PD_PORTS, 0, &[], UsbPdPorts::SIZE)?;
        Ok(UsbPdPorts::decode(&payload)?.num_ports)
    }

    /// Mux state flags for one USB-PD port.
    pub fn usb_pd_mux_info(&mut self, port: u8) -> Result<u8> {
        resolve("usbpdmuxinfo")?.ensure_available(&self.descriptor)?;
        let payload = self.command(CMD_USB_PD_MUX_INFO, 0, &[port], UsbPdMuxInfo::SIZE)?;
        Ok(UsbPdMuxInfo::decode(&payload)?.flags)
    }

    /// Whether alternate-mode entry is driven by the AP, from the feature
    /// snapshot.
    pub fn ap_mode_entry(&mut self) -> Result<bool> {
        resolve("ap_mode_entry")?.ensure_available(&self.descriptor)?;
        Ok(self.descriptor.features.has(Feature::RequireApModeEntry))
    }
}

#[cfg(test)]
mod tests {
    use ecwire_proto::{ProtoError, CROS_EC_DEV_NAME};
    use ecwire_registry::RegistryError;

    use super::*;
    use crate::sim::SimEc;

    fn device(sim: SimEc) -> EcDevice<SimEc> {
        let features = sim.feature_set();
        EcDevice::new(
            sim,
            DeviceDescriptor::new(CROS_EC_DEV_NAME, 0, features),
        )
    }

    #[test]
    fn hello_roundtrip() {
        let mut dev = device(SimEc::new());
        dev.hello().unwrap();
    }

    #[test]
    fn version_strings_come_back_typed() {
        let mut dev = device(SimEc::new());
        let version = dev.version().unwrap();
        assert_eq!(version.version_string_ro, "host_v2.0.5-ro");
        assert_eq!(version.version_string_rw, "host_v2.0.17-rw");
    }

    #[test]
    fn reboot_sends_parsed_payload() {
        let mut dev = device(SimEc::new());
        dev.reboot("ro at-shutdown").unwrap();
        assert_eq!(dev.channel.reboots(), &[(1, 2)]);
    }

    #[test]
    fn reboot_with_no_action_never_touches_the_link() {
        let mut dev = device(SimEc::new());
        let err = dev.reboot("bogus").unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Registry(RegistryError::NoAction)
        ));
        assert!(dev.channel.reboots().is_empty());
    }

    #[test]
    fn wake_angle_set_echoes_value() {
        let mut dev = device(SimEc::new());
        assert_eq!(dev.set_kb_wake_angle(45).unwrap(), 45);
        assert_eq!(dev.kb_wake_angle().unwrap(), 45);
        assert_eq!(dev.channel.wake_angle_writes(), 1);
    }

    #[test]
    fn wake_angle_query_never_writes() {
        let mut dev = device(SimEc::new().with_wake_angle(120));
        assert_eq!(dev.kb_wake_angle().unwrap(), 120);
        assert_eq!(dev.kb_wake_angle().unwrap(), 120);
        assert_eq!(dev.channel.wake_angle_writes(), 0);
    }

    #[test]
    fn guarded_op_fails_unavailable_without_touching_the_link() {
        let sim = SimEc::new();
        let mut dev = EcDevice::new(
            sim,
            DeviceDescriptor::new("cros_pd", 0x4000, FeatureSet::empty()),
        );

        let err = dev.usb_pd_ports().unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Registry(RegistryError::Unavailable { name: "usbpdmuxinfo" })
        ));
    }

    #[test]
    fn device_result_is_distinct_from_transport_failure() {
        let sim = SimEc::new().fail_command(
            CMD_GET_CHIP_INFO,
            crate::sim::SimFailure::Device(ecwire_proto::commands::RES_ACCESS_DENIED),
        );
        let mut dev = device(sim);
        let err = dev.chip_info().unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Proto(ProtoError::Device { code: 4 })
        ));

        let sim = SimEc::new().fail_command(
            CMD_GET_CHIP_INFO,
            crate::sim::SimFailure::Transport(-110),
        );
        let mut dev = device(sim);
        let err = dev.chip_info().unwrap_err();
        assert!(matches!(err, DeviceError::Proto(ProtoError::Transfer(_))));
    }

    #[test]
    fn command_offset_is_applied() {
        // The sim only answers un-offset codes, so a probe through a
        // non-zero offset must come back INVALID_COMMAND.
        let sim = SimEc::new();
        let mut dev = EcDevice::new(
            sim,
            DeviceDescriptor::new("cros_fp", 0x4000, FeatureSet::empty()),
        );
        let err = dev.version().unwrap_err();
        assert!(matches!(
            err,
            DeviceError::Proto(ProtoError::Device { code: 1 })
        ));
    }
}
