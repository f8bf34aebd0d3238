//! Serial transport abstractions
//!
//! The interpreter consumes the host link one byte at a time and writes
//! short report lines back.

/// Serial transmitter
///
/// Used for touch reports and diagnostic dumps.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the link
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Serial receiver
///
/// Polled once per scheduler tick; none of these calls may block waiting
/// for the host.
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether at least one byte can be read without blocking
    fn bytes_available(&mut self) -> Result<bool, Self::Error>;

    /// Look at the next byte without consuming it
    ///
    /// Returns `Ok(None)` when nothing is buffered.
    fn peek(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Consume the next byte
    ///
    /// Returns `Ok(None)` when nothing is buffered.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Consume the next byte only if one is already waiting
    fn poll_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if self.bytes_available()? {
            self.read_byte()
        } else {
            Ok(None)
        }
    }
}

/// Combined serial interface
///
/// For links that provide both directions on one peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// Adapter that lets `core::fmt` output go straight to a transmitter
///
/// The first transmit error is latched; later writes are skipped and the
/// error can be recovered with [`TxWriter::finish`].
pub struct TxWriter<'a, T: UartTx> {
    tx: &'a mut T,
    error: Option<T::Error>,
}

impl<'a, T: UartTx> TxWriter<'a, T> {
    /// Wrap a transmitter
    pub fn new(tx: &'a mut T) -> Self {
        Self { tx, error: None }
    }

    /// Flush the transmitter and return the first error seen, if any
    pub fn finish(self) -> Result<(), T::Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.tx.flush()
    }
}

impl<T: UartTx> core::fmt::Write for TxWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        if self.error.is_some() {
            return Err(core::fmt::Error);
        }
        match self.tx.write_blocking(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Some(e);
                Err(core::fmt::Error)
            }
        }
    }
}
