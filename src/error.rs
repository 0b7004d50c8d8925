// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::SlaveId;
use core::fmt;

/// RTU framing error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid buffer size
    BufferSize,
    /// The encoded frame would exceed the maximum RTU frame length
    FrameTooLarge(usize),
    /// The response is shorter than the minimum RTU frame length
    ResponseTooShort(usize),
    /// The responding slave is not the addressed one (request, response)
    UnitMismatch(SlaveId, SlaveId),
    /// Invalid CRC (expected, actual)
    Crc(u16, u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match self {
            BufferSize => write!(f, "Invalid buffer size"),
            FrameTooLarge(len) => write!(
                f,
                "Frame length {len} exceeds maximum of {} bytes",
                crate::rtu::MAX_FRAME_LEN
            ),
            ResponseTooShort(len) => write!(
                f,
                "Response length {len} does not meet minimum of {} bytes",
                crate::rtu::MIN_FRAME_LEN
            ),
            UnitMismatch(request, response) => write!(
                f,
                "Response slave id 0x{response:0>2X} does not match request 0x{request:0>2X}"
            ),
            Crc(expected, actual) => write!(
                f,
                "Invalid CRC: expected = 0x{expected:0>4X}, actual = 0x{actual:0>4X}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
