// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Driver, NativeDriver, SerialConfig, SerialLink};
use crate::rtu::MAX_FRAME_LEN;
use std::{
    fmt,
    io::{self, Read, Write},
    time::Duration,
};
use thiserror::Error;

/// Transport failure, wrapping the error of the serial driver.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connect error: {0}")]
    Connect(#[source] io::Error),
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
    #[error("close error: {0}")]
    Close(#[source] io::Error),
}

/// A link that performs request/response exchanges of raw frames.
pub trait Transport {
    /// Open the underlying connection.
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Write `request` and return the response.
    ///
    /// Connects first if necessary. Nothing is retried.
    fn send(&mut self, request: &[u8]) -> Result<Vec<u8>, TransportError>;

    /// Close the underlying connection.
    fn close(&mut self) -> Result<(), TransportError>;

    fn is_connected(&self) -> bool;
}

/// RTU transport over a serial line.
///
/// Every exchange is a single write followed by a single read that is
/// bounded by the read timeout of the line.
pub struct SerialTransport<D: Driver = NativeDriver> {
    config: SerialConfig,
    driver: D,
    timeout: Option<Duration>,
    link: Option<D::Link>,
}

impl<D: Driver> fmt::Debug for SerialTransport<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialTransport")
            .field("config", &self.config)
            .field("timeout", &self.timeout)
            .field("connected", &self.link.is_some())
            .finish_non_exhaustive()
    }
}

impl SerialTransport {
    /// Transport for an OS serial port. The port is opened lazily.
    #[must_use]
    pub fn new(config: SerialConfig) -> Self {
        Self::with_driver(config, NativeDriver)
    }
}

impl<D: Driver> SerialTransport<D> {
    #[must_use]
    pub fn with_driver(config: SerialConfig, driver: D) -> Self {
        Self {
            config,
            driver,
            timeout: None,
            link: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Replace the configuration; it takes effect on the next connect.
    pub fn set_config(&mut self, config: SerialConfig) {
        self.config = config;
    }

    /// The read timeout resolved by the last successful connect.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    fn open(&mut self) -> Result<D::Link, TransportError> {
        log::debug!("modbus: connecting '{}'", self.config.path);
        let timeout = self.config.effective_timeout();
        let link = self
            .driver
            .open(&self.config, timeout)
            .map_err(TransportError::Connect)?;
        self.timeout = Some(timeout);
        Ok(link)
    }
}

impl<D: Driver> Transport for SerialTransport<D> {
    fn connect(&mut self) -> Result<(), TransportError> {
        if self.link.is_none() {
            let link = self.open()?;
            self.link = Some(link);
        }
        Ok(())
    }

    fn send(&mut self, request: &[u8]) -> Result<Vec<u8>, TransportError> {
        let link = match self.link {
            Some(ref mut link) => {
                // drop stale data of previous exchanges
                link.clear_input().map_err(TransportError::Io)?;
                link
            }
            None => {
                let link = self.open()?;
                self.link.insert(link)
            }
        };
        log::trace!("modbus: sending {request:02X?}");
        link.write_all(request).map_err(TransportError::Io)?;
        link.flush().map_err(TransportError::Io)?;

        let mut buf = [0u8; MAX_FRAME_LEN];
        let cnt = link.read(&mut buf).map_err(TransportError::Io)?;
        if cnt == 0 {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "no response received",
            )));
        }
        let response = buf[..cnt].to_vec();
        log::trace!("modbus: received {response:02X?}");
        Ok(response)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let res = match self.link.take() {
            Some(link) => link.close().map_err(TransportError::Close),
            None => Ok(()),
        };
        log::debug!("modbus: closed connection '{}'", self.config.path);
        res
    }

    fn is_connected(&self) -> bool {
        self.link.is_some()
    }
}
