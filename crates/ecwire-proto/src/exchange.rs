use bytes::{Bytes, BytesMut};
use ecwire_channel::EcChannel;

use crate::codec::{
    decode_response, encode_request, REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE,
};
use crate::commands::{result_name, RES_SUCCESS};
use crate::error::{ProtoError, Result};

/// Execute one host command over a channel.
///
/// Frames `request` with `command`/`version`, sends it, receives the framed
/// response, and checks the device result code. Blocks while the physical
/// transport completes.
///
/// `max_insize` is the largest inbound payload this command may produce;
/// the response buffer is sized to it before the transfer, and the payload
/// is never read beyond the transport-reported actual size.
///
/// Failure modes are kept distinct: a transaction that cannot fit the link
/// fails [`ProtoError::OutOfMemory`] before the link is touched, a transport
/// failure surfaces as [`ProtoError::Transfer`], and a non-zero device
/// result with a healthy transport surfaces as [`ProtoError::Device`].
pub fn execute<C: EcChannel>(
    channel: &mut C,
    command: u16,
    version: u8,
    request: &[u8],
    max_insize: usize,
) -> Result<Bytes> {
    let out_frame = REQUEST_HEADER_SIZE + request.len();
    let in_frame = RESPONSE_HEADER_SIZE + max_insize;
    let needed = out_frame.max(in_frame);
    let limit = channel.max_transfer();
    if needed > limit {
        return Err(ProtoError::OutOfMemory {
            requested: needed,
            limit,
        });
    }

    let mut framed = BytesMut::with_capacity(out_frame);
    encode_request(version, command, request, &mut framed)?;

    let mut response = vec![0u8; in_frame];
    let received = channel.transfer(&framed, &mut response)?;

    let frame = decode_response(&response[..received], max_insize)?;
    if frame.result != RES_SUCCESS {
        tracing::debug!(
            command,
            result = frame.result,
            name = result_name(frame.result),
            "device rejected command"
        );
        return Err(ProtoError::Device { code: frame.result });
    }

    tracing::trace!(command, outsize = request.len(), insize = frame.payload.len(), "exchange");
    Ok(frame.payload)
}
