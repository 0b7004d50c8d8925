// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{error::*, frame::*};

pub mod rtu;

type Result<T> = core::result::Result<T, Error>;

/// Transformation between PDUs and transport frames.
///
/// Implementations perform no I/O, which allows a transport to be
/// swapped or mocked without touching the framing logic.
pub trait FrameCodec {
    /// The encoded frame type.
    type Adu: AsRef<[u8]>;

    /// Wrap a PDU into an addressed, checksummed frame.
    ///
    /// No frame is produced if the PDU does not fit.
    fn encode(&self, pdu: Pdu<'_>) -> Result<Self::Adu>;

    /// Check that `response` answers `request` on the transport level.
    ///
    /// Integrity of the payload is left to [`FrameCodec::decode`].
    fn verify(&self, request: &[u8], response: &[u8]) -> Result<()>;

    /// Verify the checksum of `adu` and extract its PDU.
    fn decode<'a>(&self, adu: &'a [u8]) -> Result<Pdu<'a>>;
}
