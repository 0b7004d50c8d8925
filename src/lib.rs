// SPDX-FileCopyrightText: Copyright (c) 2018-2024 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "serial")]
mod client;
mod codec;
mod error;
mod frame;
#[cfg(feature = "serial")]
pub mod serial;

#[cfg(feature = "serial")]
pub use client::*;
pub use codec::FrameCodec;
pub use codec::rtu;
pub use error::*;
pub use frame::*;
