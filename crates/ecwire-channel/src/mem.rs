use crate::error::{ChannelError, Result};
use crate::traits::{EcChannel, DEFAULT_MAX_TRANSFER};

/// In-memory channel backed by a handler closure.
///
/// The handler receives the framed request and a response buffer and plays
/// the controller's side of the exchange. Useful for exercising the layers
/// above without hardware; the full simulated controller lives in
/// `ecwire-device`.
pub struct FnChannel<F> {
    handler: F,
    max_transfer: usize,
}

impl<F> FnChannel<F>
where
    F: FnMut(&[u8], &mut [u8]) -> Result<usize>,
{
    /// Create a channel with the default transfer capacity.
    pub fn new(handler: F) -> Self {
        Self::with_max_transfer(handler, DEFAULT_MAX_TRANSFER)
    }

    /// Create a channel with an explicit transfer capacity.
    pub fn with_max_transfer(handler: F, max_transfer: usize) -> Self {
        Self {
            handler,
            max_transfer,
        }
    }
}

impl<F> EcChannel for FnChannel<F>
where
    F: FnMut(&[u8], &mut [u8]) -> Result<usize>,
{
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize> {
        if request.len() > self.max_transfer {
            return Err(ChannelError::TransferFailed { code: -90 }); // EMSGSIZE
        }
        let written = (self.handler)(request, response)?;
        if written > response.len() {
            return Err(ChannelError::BufferTooSmall {
                needed: written,
                capacity: response.len(),
            });
        }
        tracing::trace!(request = request.len(), response = written, "transfer");
        Ok(written)
    }

    fn max_transfer(&self) -> usize {
        self.max_transfer
    }
}
