//! `embedded-io` transport adapter
//!
//! Any chip HAL that exposes its serial port through the `embedded-io`
//! traits can be handed to the interpreter through [`IoUart`].

use embedded_io::{Read, ReadReady, Write};

use crate::uart::{UartRx, UartTx};

/// Serial link over an `embedded-io` stream
///
/// Holds at most one byte of lookahead so that [`UartRx::peek`] works on
/// streams that have no native peek.
pub struct IoUart<T> {
    inner: T,
    lookahead: Option<u8>,
}

impl<T> IoUart<T> {
    /// Wrap a stream
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            lookahead: None,
        }
    }

    /// Borrow the wrapped stream
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Borrow the wrapped stream mutably
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the stream
    ///
    /// A peeked but unread byte is lost.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + ReadReady> IoUart<T> {
    fn fill_lookahead(&mut self) -> Result<Option<u8>, T::Error> {
        if self.lookahead.is_none() && self.inner.read_ready()? {
            let mut buf = [0u8; 1];
            if self.inner.read(&mut buf)? == 1 {
                self.lookahead = Some(buf[0]);
            }
        }
        Ok(self.lookahead)
    }
}

impl<T: Read + ReadReady> UartRx for IoUart<T> {
    type Error = T::Error;

    fn bytes_available(&mut self) -> Result<bool, Self::Error> {
        if self.lookahead.is_some() {
            return Ok(true);
        }
        self.inner.read_ready()
    }

    fn peek(&mut self) -> Result<Option<u8>, Self::Error> {
        self.fill_lookahead()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        self.fill_lookahead()?;
        Ok(self.lookahead.take())
    }
}

impl<T: Write> UartTx for IoUart<T> {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}
