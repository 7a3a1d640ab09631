//! Linux EC character-device backend.
//!
//! Bridges wire frames onto the kernel's command-transfer ioctl: the framed
//! request is unpacked into the kernel's exchange struct, and the kernel's
//! result/data come back as a framed response. A non-zero device result is
//! a successful transfer here; the codec above decides how it surfaces.

use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;

use bytes::BytesMut;
use ecwire_channel::{ChannelError, EcChannel};
use ecwire_proto::codec::{decode_request, encode_response, RESPONSE_HEADER_SIZE};
use ecwire_proto::commands::MAX_PARAM_SIZE;

/// Default EC character device node.
pub const DEFAULT_DEV_PATH: &str = "/dev/cros_ec";

// Kernel exchange header: version, command, outsize, insize, result (u32
// each), flexible data array after.
const XCMD_HEADER_SIZE: usize = 20;

// _IOWR(0xEC, 0, <exchange header>).
const IOCTL_XCMD: libc::c_ulong =
    ((3u64 << 30) | ((XCMD_HEADER_SIZE as u64) << 16) | (0xec_u64 << 8)) as libc::c_ulong;

/// Channel over the EC character device.
#[derive(Debug)]
pub struct DevChannel {
    file: File,
}

impl DevChannel {
    /// Open the default device node.
    pub fn open_default() -> ecwire_channel::Result<Self> {
        Self::open(DEFAULT_DEV_PATH)
    }

    /// Open an EC character device node.
    pub fn open(path: impl AsRef<Path>) -> ecwire_channel::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| ChannelError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { file })
    }
}

impl EcChannel for DevChannel {
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> ecwire_channel::Result<usize> {
        let frame = decode_request(request).map_err(|_| ChannelError::TransferFailed { code: -71 })?;
        if response.len() < RESPONSE_HEADER_SIZE {
            return Err(ChannelError::BufferTooSmall {
                needed: RESPONSE_HEADER_SIZE,
                capacity: response.len(),
            });
        }
        let insize = response.len() - RESPONSE_HEADER_SIZE;

        let mut xcmd = xcmd_buffer(frame.version, frame.command, &frame.payload, insize);

        // SAFETY: `xcmd` is a live, writable allocation covering the full
        // exchange header plus the larger of the outbound payload and the
        // declared inbound budget, and `fd` is an open descriptor owned by
        // `self.file`. The kernel reads and writes only within the sizes
        // declared in the header.
        let rc = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                IOCTL_XCMD,
                xcmd.as_mut_ptr().cast::<libc::c_void>(),
            )
        };
        if rc < 0 {
            return Err(ChannelError::Io(std::io::Error::last_os_error()));
        }

        let received = (rc as usize).min(insize);
        let result = xcmd_result(&xcmd);
        let data = xcmd_data(&xcmd, received);

        let mut framed = BytesMut::new();
        encode_response(result, data, &mut framed)
            .map_err(|_| ChannelError::TransferFailed { code: -71 })?;
        response[..framed.len()].copy_from_slice(&framed);
        tracing::trace!(command = frame.command, received, result, "ioctl exchange");
        Ok(framed.len())
    }

    fn max_transfer(&self) -> usize {
        RESPONSE_HEADER_SIZE + MAX_PARAM_SIZE
    }
}

// The exchange buffer is u64-backed so the kernel sees an aligned struct.
fn xcmd_buffer(version: u8, command: u16, payload: &[u8], insize: usize) -> Vec<u64> {
    let data_len = payload.len().max(insize);
    let total = XCMD_HEADER_SIZE + data_len;
    let mut buf = vec![0u64; total.div_ceil(8)];

    let bytes = xcmd_bytes_mut(&mut buf);
    bytes[0..4].copy_from_slice(&u32::from(version).to_ne_bytes());
    bytes[4..8].copy_from_slice(&u32::from(command).to_ne_bytes());
    bytes[8..12].copy_from_slice(&(payload.len() as u32).to_ne_bytes());
    bytes[12..16].copy_from_slice(&(insize as u32).to_ne_bytes());
    bytes[16..20].copy_from_slice(&0xffu32.to_ne_bytes());
    bytes[XCMD_HEADER_SIZE..XCMD_HEADER_SIZE + payload.len()].copy_from_slice(payload);
    buf
}

fn xcmd_result(buf: &[u64]) -> u32 {
    let bytes = xcmd_bytes(buf);
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[16..20]);
    u32::from_ne_bytes(word)
}

fn xcmd_data(buf: &[u64], len: usize) -> &[u8] {
    &xcmd_bytes(buf)[XCMD_HEADER_SIZE..XCMD_HEADER_SIZE + len]
}

fn xcmd_bytes(buf: &[u64]) -> &[u8] {
    // SAFETY: reinterpreting u64 storage as bytes; the slice stays within
    // the allocation and u8 has no alignment requirement.
    unsafe { std::slice::from_raw_parts(buf.as_ptr().cast::<u8>(), buf.len() * 8) }
}

fn xcmd_bytes_mut(buf: &mut [u64]) -> &mut [u8] {
    // SAFETY: as above, with exclusive access inherited from `buf`.
    unsafe { std::slice::from_raw_parts_mut(buf.as_mut_ptr().cast::<u8>(), buf.len() * 8) }
}
