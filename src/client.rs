// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus client (master) combining a frame codec with a transport.

use crate::{
    Error, FrameCodec, FunctionCode, Pdu, SlaveId,
    rtu::RtuCodec,
    serial::{SerialConfig, SerialTransport, Transport, TransportError},
};

/// Failure of a client request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("frame error: {0}")]
    Frame(#[from] Error),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// A PDU that owns its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePdu {
    pub function: FunctionCode,
    pub data: Vec<u8>,
}

impl ResponsePdu {
    #[must_use]
    pub fn as_pdu(&self) -> Pdu<'_> {
        Pdu::new(self.function, &self.data)
    }
}

impl From<Pdu<'_>> for ResponsePdu {
    fn from(pdu: Pdu<'_>) -> Self {
        Self {
            function: pdu.function,
            data: pdu.data.to_vec(),
        }
    }
}

/// Client (master) performing one request/response round trip at a time.
///
/// Exchanges are serialized through `&mut self`.
#[derive(Debug)]
pub struct Client<C = RtuCodec, T = SerialTransport> {
    codec: C,
    transport: T,
}

impl Client {
    /// RTU client for the serial device at `path` with default line
    /// settings, talking to `slave`.
    #[must_use]
    pub fn rtu(path: impl Into<String>, slave: SlaveId) -> Self {
        Self::new(
            RtuCodec::new(slave),
            SerialTransport::new(SerialConfig::new(path)),
        )
    }
}

impl<C, T> Client<C, T> {
    pub const fn new(codec: C, transport: T) -> Self {
        Self { codec, transport }
    }

    pub const fn codec(&self) -> &C {
        &self.codec
    }

    pub const fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<C, T> Client<C, T>
where
    C: FrameCodec,
    T: Transport,
{
    pub fn connect(&mut self) -> Result<(), ClientError> {
        self.transport.connect().map_err(Into::into)
    }

    pub fn close(&mut self) -> Result<(), ClientError> {
        self.transport.close().map_err(Into::into)
    }

    /// Send `pdu` and return the PDU of the response.
    ///
    /// Exception responses are returned like any other PDU.
    pub fn send_pdu(&mut self, pdu: Pdu<'_>) -> Result<ResponsePdu, ClientError> {
        let adu = self.codec.encode(pdu)?;
        let request = adu.as_ref();
        let response = self.transport.send(request)?;
        self.codec.verify(request, &response)?;
        let pdu = self.codec.decode(&response)?;
        Ok(pdu.into())
    }
}
