//! Terminal poll loop
//!
//! Ties a [`Session`] to a serial link and a touch controller. Each call
//! to [`Terminal::tick`] handles at most one received byte and then one
//! touch poll, so the caller decides how often the terminal runs.

use touchwire_display::Renderer;
use touchwire_hal::{RawPoint, TouchSource, TxWriter, UartRx, UartTx};
use touchwire_protocol::{TouchReport, NO_GROUP};

use crate::config::{ConfigError, TerminalConfig};
use crate::registry::Unbound;
use crate::session::Session;

/// Terminal errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminalError<T, S> {
    /// Serial link failed
    Transport(T),
    /// Touch controller failed
    Touch(S),
}

/// Serial-driven display terminal
pub struct Terminal<U, S, R = Unbound> {
    uart: U,
    touch: S,
    session: Session<R>,
    config: TerminalConfig,
    /// Last reported position while pressed
    last_touch: Option<(i32, i32)>,
}

impl<U, S> Terminal<U, S>
where
    U: UartRx + UartTx<Error = <U as UartRx>::Error>,
    S: TouchSource,
{
    /// Create a terminal that tracks shapes without drawing them
    ///
    /// Fails if `config` does not pass [`TerminalConfig::validate`].
    pub fn new(uart: U, touch: S, config: TerminalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::new(&config);
        Ok(Self::with_session(uart, touch, session, config))
    }
}

impl<U, S, R> Terminal<U, S, R>
where
    U: UartRx + UartTx<Error = <U as UartRx>::Error>,
    S: TouchSource,
    R: Renderer,
{
    /// Create a terminal that draws on `renderer`
    ///
    /// Fails if `config` does not pass [`TerminalConfig::validate`].
    pub fn with_renderer(
        uart: U,
        touch: S,
        renderer: R,
        config: TerminalConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::with_renderer(&config, renderer);
        Ok(Self::with_session(uart, touch, session, config))
    }

    fn with_session(uart: U, touch: S, session: Session<R>, config: TerminalConfig) -> Self {
        Self {
            uart,
            touch,
            session,
            config,
            last_touch: None,
        }
    }

    /// Run one scheduler step
    ///
    /// Returns the touch report sent during this step, if any.
    pub fn tick(
        &mut self,
    ) -> Result<Option<TouchReport>, TerminalError<<U as UartRx>::Error, S::Error>> {
        if let Some(byte) = self.uart.poll_byte().map_err(TerminalError::Transport)? {
            let mut tx = TxWriter::new(&mut self.uart);
            let written = self.session.feed(byte, &mut tx);
            tx.finish().map_err(TerminalError::Transport)?;
            if written.is_err() {
                warn!("reply for byte {=u8:#x} not sent", byte);
            }
        }
        self.poll_touch()
    }

    fn poll_touch(
        &mut self,
    ) -> Result<Option<TouchReport>, TerminalError<<U as UartRx>::Error, S::Error>> {
        if !self.touch.is_touched().map_err(TerminalError::Touch)? {
            if self.last_touch.take().is_some() && self.config.report_releases {
                let report = TouchReport::new(NO_GROUP, -1, -1);
                self.send(&report)?;
                return Ok(Some(report));
            }
            return Ok(None);
        }

        let raw = self.touch.read_raw().map_err(TerminalError::Touch)?;
        let position = self.to_display(raw);
        if self.last_touch == Some(position) {
            return Ok(None);
        }
        self.last_touch = Some(position);

        let (x, y) = position;
        let report = TouchReport::new(self.session.find_group_at(x, y), x, y);
        debug!("touch ({}, {}) -> {}", x, y, report.group);
        self.send(&report)?;
        Ok(Some(report))
    }

    /// Raw controller reading to display coordinates
    pub fn to_display(&self, raw: RawPoint) -> (i32, i32) {
        let width = self.config.display.width as i32;
        let height = self.config.display.height as i32;
        let (px, py) = self.config.touch.calibration.to_panel(raw, width, height);
        self.config.touch.rotation.remap(px, py, width, height)
    }

    fn send(
        &mut self,
        report: &TouchReport,
    ) -> Result<(), TerminalError<<U as UartRx>::Error, S::Error>> {
        let mut tx = TxWriter::new(&mut self.uart);
        // A write error is latched in the writer and surfaces from finish
        let _ = report.write_to(&mut tx);
        tx.finish().map_err(TerminalError::Transport)
    }

    /// Borrow the interpreter session mutably
    pub fn session_mut(&mut self) -> &mut Session<R> {
        &mut self.session
    }
}

impl<U, S, R> Terminal<U, S, R> {
    /// Borrow the interpreter session
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// Validated configuration the terminal runs with
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Borrow the serial link
    pub fn uart(&self) -> &U {
        &self.uart
    }

    /// Borrow the serial link mutably
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Borrow the touch controller mutably
    pub fn touch_mut(&mut self) -> &mut S {
        &mut self.touch
    }

    /// Split into link, touch controller and session
    pub fn release(self) -> (U, S, Session<R>) {
        (self.uart, self.touch, self.session)
    }
}
