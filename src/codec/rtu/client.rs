// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU client (master) specific functions.
use super::*;

/// Encode an RTU request.
///
/// The frame is written to the beginning of `buf` and its length is
/// returned. Nothing is written if the frame would exceed
/// [`MAX_FRAME_LEN`] or does not fit into `buf`.
pub fn encode_request(slave: SlaveId, pdu: Pdu<'_>, buf: &mut [u8]) -> Result<usize> {
    let len = pdu.data.len() + MIN_FRAME_LEN;
    if len > MAX_FRAME_LEN {
        return Err(Error::FrameTooLarge(len));
    }
    if buf.len() < len {
        return Err(Error::BufferSize);
    }
    buf[0] = slave;
    buf[1] = pdu.function.value();
    buf[2..len - 2].copy_from_slice(pdu.data);
    let crc = crc16(&buf[..len - 2]);
    BigEndian::write_u16(&mut buf[len - 2..len], crc);
    Ok(len)
}

/// Verify the length and the slave id of an RTU response.
pub fn verify_response(request: &[u8], response: &[u8]) -> Result<()> {
    // Minimum size (including address, function and CRC)
    if response.len() < MIN_FRAME_LEN {
        return Err(Error::ResponseTooShort(response.len()));
    }
    let Some(&requested) = request.first() else {
        return Err(Error::BufferSize);
    };
    // Slave address must match
    if response[0] != requested {
        return Err(Error::UnitMismatch(requested, response[0]));
    }
    Ok(())
}

/// Decode an RTU response.
pub fn decode_response(buf: &[u8]) -> Result<Pdu<'_>> {
    let response = extract_frame(buf).map(|DecodedFrame { pdu, .. }| {
        let (fn_code, data) = pdu.split_at(1);
        Pdu {
            function: FunctionCode::new(fn_code[0]),
            data,
        }
    });
    #[cfg(feature = "log")]
    if let Err(err) = response {
        log::warn!("Failed to decode response frame: {err}");
    }
    response
}
