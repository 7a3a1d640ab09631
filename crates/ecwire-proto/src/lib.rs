//! Host command codec and wire contract for embedded-controller links.
//!
//! This is the core value-add layer of ecwire. Every host command is framed
//! with:
//! - A 1-byte protocol version
//! - A 2-byte little-endian command code
//! - A 2-byte little-endian outbound payload length
//!
//! and every response with a 4-byte little-endian result code and a 2-byte
//! little-endian inbound payload length. [`execute`] drives one complete
//! exchange over an [`ecwire_channel::EcChannel`]: no partial response ever
//! reaches the caller as success.

pub mod codec;
pub mod commands;
pub mod descriptor;
pub mod error;
pub mod exchange;
pub mod responses;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, RequestFrame, ResponseFrame,
    REQUEST_HEADER_SIZE, RESPONSE_HEADER_SIZE,
};
pub use descriptor::{DeviceDescriptor, Feature, FeatureSet, CROS_EC_DEV_NAME};
pub use error::{ProtoError, Result};
pub use exchange::execute;
