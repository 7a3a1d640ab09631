use crate::error::Result;

/// Default transfer capacity for links that do not declare their own.
///
/// Generous compared to real EC links (which typically carry a few hundred
/// bytes per packet); concrete backends narrow it.
pub const DEFAULT_MAX_TRANSFER: usize = 4 * 1024;

/// A blocking, transactional link to an embedded controller.
///
/// Each call to [`transfer`](EcChannel::transfer) is one complete exchange:
/// the framed request is sent in full, then the framed response is received
/// in full, before the call returns. There is no async or cancellable
/// variant. Timeouts and retry policy, if any, belong to the implementation.
///
/// The channel is the sole shared resource between concurrent callers; the
/// `&mut self` receiver is what serializes physical transfers — holding the
/// channel is holding the transaction slot.
pub trait EcChannel {
    /// Execute one request/response transaction.
    ///
    /// `request` holds the fully framed request. The framed response is
    /// written to the front of `response`; the return value is the number
    /// of response bytes written. Blocks until the transfer completes.
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize>;

    /// Largest framed request or response this link can carry.
    fn max_transfer(&self) -> usize {
        DEFAULT_MAX_TRANSFER
    }
}

impl<C: EcChannel + ?Sized> EcChannel for &mut C {
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize> {
        (**self).transfer(request, response)
    }

    fn max_transfer(&self) -> usize {
        (**self).max_transfer()
    }
}

impl<C: EcChannel + ?Sized> EcChannel for Box<C> {
    fn transfer(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize> {
        (**self).transfer(request, response)
    }

    fn max_transfer(&self) -> usize {
        (**self).max_transfer()
    }
}
