// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;

pub(crate) mod rtu;

pub use self::rtu::SlaveId;

/// Function code byte of a PDU.
///
/// The framing layer never interprets it: every value, exception
/// responses included, is carried through unchanged.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionCode(u8);

impl FunctionCode {
    pub const READ_COILS: Self = Self(0x01);
    pub const READ_DISCRETE_INPUTS: Self = Self(0x02);
    pub const READ_HOLDING_REGISTERS: Self = Self(0x03);
    pub const READ_INPUT_REGISTERS: Self = Self(0x04);
    pub const WRITE_SINGLE_COIL: Self = Self(0x05);
    pub const WRITE_SINGLE_REGISTER: Self = Self(0x06);
    pub const WRITE_MULTIPLE_COILS: Self = Self(0x0F);
    pub const WRITE_MULTIPLE_REGISTERS: Self = Self(0x10);

    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for FunctionCode {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<FunctionCode> for u8 {
    fn from(code: FunctionCode) -> Self {
        code.value()
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Raw PDU data
type RawData<'r> = &'r [u8];

/// A protocol data unit: function code and payload, without any
/// transport framing.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pdu<'r> {
    pub function: FunctionCode,
    pub data: RawData<'r>,
}

impl<'r> Pdu<'r> {
    #[must_use]
    pub const fn new(function: FunctionCode, data: &'r [u8]) -> Self {
        Self { function, data }
    }

    /// Number of bytes of the serialized PDU (function code included).
    #[must_use]
    pub const fn len(&self) -> usize {
        1 + self.data.len()
    }

    /// A PDU always carries at least its function code.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
