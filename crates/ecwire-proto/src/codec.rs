use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ProtoError, Result};

/// Request header: version (1) + command (2 LE) + outsize (2 LE) = 5 bytes.
pub const REQUEST_HEADER_SIZE: usize = 5;

/// Response header: result (4 LE) + insize (2 LE) = 6 bytes.
pub const RESPONSE_HEADER_SIZE: usize = 6;

/// A decoded request frame.
#[derive(Debug, Clone)]
pub struct RequestFrame {
    /// Command structure version.
    pub version: u8,
    /// Command code, offset already applied by the sender.
    pub command: u16,
    /// Outbound payload.
    pub payload: Bytes,
}

/// A decoded response frame.
#[derive(Debug, Clone)]
pub struct ResponseFrame {
    /// Device-reported result code. Zero is success; the codec's caller
    /// decides how non-zero results surface.
    pub result: u32,
    /// Inbound payload, exactly as long as the declared inbound size.
    pub payload: Bytes,
}

/// Encode a request frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬──────────────┬──────────────┬──────────────────┐
/// │ Version (1B) │ Command      │ Outsize      │ Payload           │
/// │              │ (2B LE)      │ (2B LE)      │ (Outsize bytes)   │
/// └──────────────┴──────────────┴──────────────┴──────────────────┘
/// ```
pub fn encode_request(version: u8, command: u16, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u16::MAX as usize {
        return Err(ProtoError::PayloadTooLarge {
            size: payload.len(),
            max: u16::MAX as usize,
        });
    }
    dst.reserve(REQUEST_HEADER_SIZE + payload.len());
    dst.put_u8(version);
    dst.put_u16_le(command);
    dst.put_u16_le(payload.len() as u16);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a complete request frame.
///
/// The declared outbound size must match the bytes actually present; a
/// frame that declares more than it carries is malformed.
pub fn decode_request(src: &[u8]) -> Result<RequestFrame> {
    if src.len() < REQUEST_HEADER_SIZE {
        return Err(ProtoError::FrameTruncated {
            expected: REQUEST_HEADER_SIZE,
            got: src.len(),
        });
    }

    let mut header = &src[..REQUEST_HEADER_SIZE];
    let version = header.get_u8();
    let command = header.get_u16_le();
    let outsize = header.get_u16_le() as usize;

    let total = REQUEST_HEADER_SIZE + outsize;
    if src.len() < total {
        return Err(ProtoError::FrameTruncated {
            expected: total,
            got: src.len(),
        });
    }

    Ok(RequestFrame {
        version,
        command,
        payload: Bytes::copy_from_slice(&src[REQUEST_HEADER_SIZE..total]),
    })
}

/// Encode a response frame into the wire format.
pub fn encode_response(result: u32, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u16::MAX as usize {
        return Err(ProtoError::PayloadTooLarge {
            size: payload.len(),
            max: u16::MAX as usize,
        });
    }
    dst.reserve(RESPONSE_HEADER_SIZE + payload.len());
    dst.put_u32_le(result);
    dst.put_u16_le(payload.len() as u16);
    dst.put_slice(payload);
    Ok(())
}

/// Decode a complete response frame.
///
/// `max_insize` is the inbound payload budget the request declared; a
/// response claiming more is rejected before any payload byte is read.
/// Bytes past the declared inbound size are ignored, never read.
pub fn decode_response(src: &[u8], max_insize: usize) -> Result<ResponseFrame> {
    if src.len() < RESPONSE_HEADER_SIZE {
        return Err(ProtoError::FrameTruncated {
            expected: RESPONSE_HEADER_SIZE,
            got: src.len(),
        });
    }

    let mut header = &src[..RESPONSE_HEADER_SIZE];
    let result = header.get_u32_le();
    let insize = header.get_u16_le() as usize;

    if insize > max_insize {
        return Err(ProtoError::ResponseTooBig {
            size: insize,
            max: max_insize,
        });
    }

    let total = RESPONSE_HEADER_SIZE + insize;
    if src.len() < total {
        return Err(ProtoError::FrameTruncated {
            expected: total,
            got: src.len(),
        });
    }

    Ok(ResponseFrame {
        result,
        payload: Bytes::copy_from_slice(&src[RESPONSE_HEADER_SIZE..total]),
    })
}
