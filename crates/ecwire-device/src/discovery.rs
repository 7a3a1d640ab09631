use ecwire_channel::EcChannel;
use ecwire_proto::{DeviceDescriptor, FeatureSet};

use crate::device::EcDevice;
use crate::error::Result;

/// Probe a channel and produce a ready-to-use device.
///
/// Runs the hello echo check, then takes the one-time feature snapshot that
/// seeds the immutable descriptor. `name` and `cmd_offset` identify which
/// logical controller on the link this device is.
pub fn probe<C: EcChannel>(
    channel: C,
    name: impl Into<String>,
    cmd_offset: u16,
) -> Result<EcDevice<C>> {
    let descriptor = DeviceDescriptor::new(name, cmd_offset, FeatureSet::empty());
    let mut device = EcDevice::new(channel, descriptor);

    device.hello()?;
    let features = device.features()?;
    tracing::debug!(words = ?features.words(), "discovered feature snapshot");

    Ok(device.with_features(features))
}

#[cfg(test)]
mod tests {
    use ecwire_channel::FnChannel;
    use ecwire_proto::commands::CMD_HELLO;
    use ecwire_proto::{Feature, FeatureSet, CROS_EC_DEV_NAME};

    use super::*;
    use crate::error::DeviceError;
    use crate::sim::{SimEc, SimFailure};

    #[test]
    fn probe_snapshots_features() {
        let sim = SimEc::new().with_features(FeatureSet::with(&[
            Feature::MotionSense,
            Feature::RequireApModeEntry,
        ]));

        let device = probe(sim, CROS_EC_DEV_NAME, 0).unwrap();
        assert!(device.descriptor().features.has(Feature::MotionSense));
        assert!(device.descriptor().features.has(Feature::RequireApModeEntry));
        assert!(!device.descriptor().features.has(Feature::UsbPd));
    }

    #[test]
    fn probe_fails_when_hello_does_not_echo() {
        let chan = FnChannel::new(|req: &[u8], resp: &mut [u8]| {
            let frame = ecwire_proto::decode_request(req).unwrap();
            assert_eq!(frame.command, CMD_HELLO);
            let mut buf = bytes::BytesMut::new();
            ecwire_proto::encode_response(0, &0xdead_beefu32.to_le_bytes(), &mut buf).unwrap();
            resp[..buf.len()].copy_from_slice(&buf);
            Ok(buf.len())
        });

        let err = probe(chan, CROS_EC_DEV_NAME, 0).unwrap_err();
        assert!(matches!(err, DeviceError::HelloMismatch { .. }));
    }

    #[test]
    fn probe_propagates_transport_failure() {
        let sim = SimEc::new().fail_command(CMD_HELLO, SimFailure::Transport(-110));
        let err = probe(sim, CROS_EC_DEV_NAME, 0).unwrap_err();
        assert!(matches!(err, DeviceError::Proto(_)));
    }
}
