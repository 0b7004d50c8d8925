// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::{fmt, ops::Deref};

/// Slave ID
pub type SlaveId = u8;

// [MODBUS over Serial Line Specification and Implementation Guide V1.02](http://modbus.org/docs/Modbus_over_serial_line_V1_02.pdf), page 13
// "The maximum size of a MODBUS RTU frame is 256 bytes."
pub const MAX_FRAME_LEN: usize = 256;

/// Slave address, function code and CRC.
pub const MIN_FRAME_LEN: usize = 4;

/// Maximum number of payload bytes following the function code.
pub const MAX_PDU_DATA_LEN: usize = MAX_FRAME_LEN - MIN_FRAME_LEN;

/// An encoded RTU frame (ADU).
///
/// The bytes live inline in a buffer sized to the largest possible
/// frame, so encoding never allocates.
#[derive(Clone, Copy)]
pub struct Adu {
    pub(crate) buf: [u8; MAX_FRAME_LEN],
    pub(crate) len: usize,
}

impl Adu {
    pub(crate) const fn empty() -> Self {
        Self {
            buf: [0; MAX_FRAME_LEN],
            len: 0,
        }
    }

    /// The frame bytes on the wire.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The addressed slave.
    #[must_use]
    pub const fn slave(&self) -> SlaveId {
        self.buf[0]
    }
}

impl Deref for Adu {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Adu {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Adu {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Adu {}

impl fmt::Debug for Adu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Adu").field(&self.as_bytes()).finish()
    }
}

#[cfg(all(feature = "defmt", target_os = "none"))]
impl defmt::Format for Adu {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Adu({=[u8]:X})", self.as_bytes())
    }
}
