// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::SerialConfig;
use serialport::{ClearBuffer, SerialPort};
use std::{
    fmt,
    io::{self, Read, Write},
    time::Duration,
};

/// An open serial line.
pub trait SerialLink: Read + Write {
    /// Discard bytes that have been received but not read yet.
    fn clear_input(&mut self) -> io::Result<()>;

    /// Release the line.
    fn close(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Opens serial lines.
pub trait Driver {
    type Link: SerialLink;

    /// Open the line described by `config`. Reads on the returned link
    /// give up after `timeout`.
    fn open(&mut self, config: &SerialConfig, timeout: Duration) -> io::Result<Self::Link>;
}

/// [`Driver`] for the serial ports of the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeDriver;

impl Driver for NativeDriver {
    type Link = NativeLink;

    fn open(&mut self, config: &SerialConfig, timeout: Duration) -> io::Result<NativeLink> {
        serialport::new(config.path.as_str(), config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(config.flow_control)
            .timeout(timeout)
            .open()
            .map(NativeLink)
            .map_err(io::Error::from)
    }
}

/// A serial port opened by [`NativeDriver`].
pub struct NativeLink(Box<dyn SerialPort>);

impl fmt::Debug for NativeLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeLink").field(&self.0.name()).finish()
    }
}

impl Read for NativeLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Write for NativeLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl SerialLink for NativeLink {
    fn clear_input(&mut self) -> io::Result<()> {
        self.0.clear(ClearBuffer::Input).map_err(io::Error::from)
    }

    fn close(self) -> io::Result<()> {
        // The port is closed when its handle is dropped.
        drop(self.0);
        Ok(())
    }
}
