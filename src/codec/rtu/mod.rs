// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU

use super::*;
use byteorder::{BigEndian, ByteOrder};

pub mod client;
pub use crate::frame::rtu::*;

/// An extracted RTU PDU frame.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    pub slave: SlaveId,
    pub pdu: &'a [u8],
}

/// Extract the PDU out of a complete RTU frame after verifying its CRC.
///
/// The whole buffer is treated as one frame: the trailing two bytes
/// are the CRC of everything before them.
#[allow(clippy::similar_names)]
pub fn extract_frame(buf: &[u8]) -> Result<DecodedFrame<'_>> {
    if buf.len() < MIN_FRAME_LEN {
        return Err(Error::BufferSize);
    }
    let (adu_buf, crc_buf) = buf.split_at(buf.len() - 2);
    // Read trailing CRC and verify ADU
    let expected_crc = BigEndian::read_u16(crc_buf);
    let actual_crc = crc16(adu_buf);
    if expected_crc != actual_crc {
        return Err(Error::Crc(expected_crc, actual_crc));
    }
    let (slave_id, pdu) = adu_buf.split_at(1);
    Ok(DecodedFrame {
        slave: slave_id[0],
        pdu,
    })
}

/// Running Modbus CRC-16 (polynomial `0xA001`, initial value `0xFFFF`,
/// least significant bit first).
///
/// [`Crc16::value`] is the plain register. Frames carry it big-endian,
/// high byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16(u16);

impl Crc16 {
    const INIT: u16 = 0xFFFF;
    const POLY: u16 = 0xA001;

    #[must_use]
    pub const fn new() -> Self {
        Self(Self::INIT)
    }

    /// Start over with a fresh checksum.
    pub fn reset(&mut self) -> &mut Self {
        self.0 = Self::INIT;
        self
    }

    /// Fold `data` into the running checksum.
    pub fn push(&mut self, data: &[u8]) -> &mut Self {
        let mut crc = self.0;
        for x in data {
            crc ^= u16::from(*x);
            for _ in 0..8 {
                // if we followed clippy's suggestion to move out the crc >>= 1, the condition may not be met any more
                // the recommended action therefore makes no sense and it is better to allow this lint
                #[allow(clippy::branches_sharing_code)]
                if (crc & 0x0001) != 0 {
                    crc >>= 1;
                    crc ^= Self::POLY;
                } else {
                    crc >>= 1;
                }
            }
        }
        self.0 = crc;
        self
    }

    /// The current checksum.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate the CRC (Cyclic Redundancy Check) sum.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    Crc16::new().push(data).value()
}

/// RTU frame codec of a client (master) talking to a single slave.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RtuCodec {
    slave: SlaveId,
}

impl RtuCodec {
    #[must_use]
    pub const fn new(slave: SlaveId) -> Self {
        Self { slave }
    }

    /// The slave addressed by encoded requests.
    #[must_use]
    pub const fn slave(&self) -> SlaveId {
        self.slave
    }

    pub fn set_slave(&mut self, slave: SlaveId) {
        self.slave = slave;
    }
}

impl FrameCodec for RtuCodec {
    type Adu = Adu;

    fn encode(&self, pdu: Pdu<'_>) -> Result<Adu> {
        let mut adu = Adu::empty();
        adu.len = client::encode_request(self.slave, pdu, &mut adu.buf)?;
        Ok(adu)
    }

    fn verify(&self, request: &[u8], response: &[u8]) -> Result<()> {
        client::verify_response(request, response)
    }

    fn decode<'a>(&self, adu: &'a [u8]) -> Result<Pdu<'a>> {
        client::decode_response(adu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_crc16() {
        let msg = &[0x01, 0x03, 0x08, 0x2B, 0x00, 0x02];
        assert_eq!(crc16(msg), 0x63B6);

        let msg = &[0x01, 0x03, 0x04, 0x00, 0x20, 0x00, 0x00];
        assert_eq!(crc16(msg), 0xF9FB);

        let msg = &[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03];
        assert_eq!(crc16(msg), 0x8776);
    }

    #[test]
    fn crc_accumulates_across_pushes() {
        let mut crc = Crc16::new();
        crc.push(&[0x01, 0x03]).push(&[0x08, 0x2B]).push(&[0x00, 0x02]);
        assert_eq!(crc.value(), 0x63B6);
    }

    #[test]
    fn crc_reset_restarts_accumulation() {
        let mut crc = Crc16::default();
        crc.push(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_ne!(crc.value(), crc16(&[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03]));
        crc.reset().push(&[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03]);
        assert_eq!(crc.value(), 0x8776);
    }

    #[test]
    fn crc_matches_modbus_check_value() {
        // CRC-16/MODBUS catalogue check value
        assert_eq!(crc16(b"123456789"), 0x4B37);
        let mut crc = Crc16::new();
        crc.push(b"1234").push(b"56789");
        assert_eq!(crc.value(), 0x4B37);
    }

    #[test]
    fn crc_of_nothing_is_initial_value() {
        assert_eq!(Crc16::new().value(), 0xFFFF);
    }

    mod frame_extractor {

        use super::*;

        #[test]
        fn extract_usual_rtu_response_frame() {
            let buf = &[
                0x01, // slave address
                0x03, // function code
                0x04, // byte count
                0x89, //
                0x02, //
                0x42, //
                0xC7, //
                0x9D, // crc
                0x00, // crc
            ];
            let DecodedFrame { slave, pdu } = extract_frame(buf).unwrap();
            assert_eq!(slave, 0x01);
            assert_eq!(pdu, &[0x03, 0x04, 0x89, 0x02, 0x42, 0xC7]);
        }

        #[test]
        fn extract_minimal_frame() {
            let mut buf = [0x12, 0x07, 0, 0];
            let crc = crc16(&buf[..2]);
            BigEndian::write_u16(&mut buf[2..], crc);
            let DecodedFrame { slave, pdu } = extract_frame(&buf).unwrap();
            assert_eq!(slave, 0x12);
            assert_eq!(pdu, &[0x07]);
        }

        #[test]
        fn extract_frame_with_trailing_garbage() {
            let buf = &[0x01, 0x03, 0x04, 0x89, 0x02, 0x42, 0xC7, 0x9D, 0x00, 0x03];
            assert!(matches!(extract_frame(buf), Err(Error::Crc(0x0003, _))));
        }

        #[test]
        fn reject_frames_below_minimum_length() {
            assert_eq!(extract_frame(&[]).err().unwrap(), Error::BufferSize);
            assert_eq!(
                extract_frame(&[0x01, 0x03, 0x00]).err().unwrap(),
                Error::BufferSize
            );
        }
    }

    mod codec {

        use super::*;

        #[test]
        fn encode_uses_configured_slave() {
            let mut codec = RtuCodec::new(0x11);
            assert_eq!(codec.slave(), 0x11);
            let pdu = Pdu::new(FunctionCode::READ_HOLDING_REGISTERS, &[0x00, 0x6B, 0x00, 0x03]);
            let adu = codec.encode(pdu).unwrap();
            assert_eq!(
                adu.as_bytes(),
                &[0x11, 0x03, 0x00, 0x6B, 0x00, 0x03, 0x87, 0x76]
            );
            assert_eq!(adu.slave(), 0x11);

            codec.set_slave(0x12);
            let adu = codec.encode(pdu).unwrap();
            assert_eq!(adu[0], 0x12);
            assert_eq!(adu.len(), 8);
        }

        #[test]
        fn decode_what_was_encoded() {
            let codec = RtuCodec::new(0x05);
            let pdu = Pdu::new(FunctionCode::new(0x41), &[0xAA, 0xBB]);
            let adu = codec.encode(pdu).unwrap();
            assert_eq!(codec.decode(&adu).unwrap(), pdu);
        }

        #[test]
        fn verify_compares_slave_ids_only() {
            let codec = RtuCodec::new(0x01);
            assert!(codec.verify(&[0x01, 0x03], &[0x01, 0xFF, 0xFF, 0xFF]).is_ok());
            assert_eq!(
                codec.verify(&[0x01, 0x03], &[0x02, 0x03, 0x00, 0x00]),
                Err(Error::UnitMismatch(0x01, 0x02))
            );
        }
    }
}
