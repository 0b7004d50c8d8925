// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blocking serial line transport.

mod config;
mod driver;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

pub use self::{config::*, driver::*, transport::*};
pub use serialport::{DataBits, FlowControl, Parity, StopBits};
