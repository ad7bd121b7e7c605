//! Dubbo frame header: fixed 16 bytes, big-endian.

use super::{
    Error, FLAG_EVENT, FLAG_REQUEST, FLAG_TWOWAY, HEADER_LENGTH, MAGIC_HIGH, MAGIC_LOW,
    PackageType, RESPONSE_OK, Result, SERIAL_MASK,
};

/// One decoded frame header.
///
/// # Wire Format
///
/// ```text
/// 0      1      2      3      4              11    12            15
/// +------+------+------+------+------ ... ------+------ ... ------+
/// | 0xda | 0xbb | flag |status|  request id (8) |  body len (4)   |
/// +------+------+------+------+------ ... ------+------ ... ------+
/// ```
///
/// The flag byte packs the serialization id in its low 5 bits and the frame
/// shape in the remainder: `0x20` event/heartbeat, `0x40` two-way, `0x80`
/// request (absence implies response). The status byte is meaningful only
/// on response frames.
///
/// Constructed empty by the caller and populated in place by
/// [`DubboCodec::read_header`](crate::protocol::DubboCodec::read_header),
/// then consumed immediately to drive the body read; headers are not kept
/// beyond a single frame's processing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DubboHeader {
    /// Serialization scheme id, 1..=31. Never zero on a valid frame.
    pub serial_id: u8,
    /// Additive package type decoded from the flag byte.
    pub package_type: PackageType,
    /// Correlation id; opaque to the codec, owned by the caller's
    /// correlation table.
    pub request_id: i64,
    /// Exact byte length of the body that follows the header.
    pub body_len: usize,
    /// Meaningful only on responses; a non-[`RESPONSE_OK`] value marks an
    /// exception payload.
    pub response_status: u8,
}

impl DubboHeader {
    /// Decode a header from [`HEADER_LENGTH`] wire bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::HeaderNotEnough {
                available: bytes.len(),
            });
        }

        if bytes[0] != MAGIC_HIGH || bytes[1] != MAGIC_LOW {
            return Err(Error::IllegalMagic {
                found: [bytes[0], bytes[1]],
            });
        }

        let serial_id = bytes[2] & SERIAL_MASK;
        if serial_id == 0 {
            return Err(Error::InvalidSerializationId);
        }

        let mut package_type = PackageType::new();
        let mut response_status = 0;
        if bytes[2] & FLAG_EVENT != 0 {
            package_type = package_type.with(PackageType::HEARTBEAT);
        }
        if bytes[2] & FLAG_REQUEST != 0 {
            package_type = package_type.with(PackageType::REQUEST);
            if bytes[2] & FLAG_TWOWAY != 0 {
                package_type = package_type.with(PackageType::REQUEST_TWO_WAY);
            }
        } else {
            package_type = package_type.with(PackageType::RESPONSE);
            response_status = bytes[3];
            if response_status != RESPONSE_OK {
                package_type = package_type.with(PackageType::RESPONSE_EXCEPTION);
            }
        }

        let request_id = i64::from_be_bytes(bytes[4..12].try_into().unwrap());

        let body_len = i32::from_be_bytes(bytes[12..16].try_into().unwrap());
        if body_len < 0 {
            return Err(Error::IllegalBodyLength { value: body_len });
        }

        Ok(Self {
            serial_id,
            package_type,
            request_id,
            body_len: body_len as usize,
            response_status,
        })
    }

    /// Encode back to wire bytes.
    ///
    /// Body packers prepend this in front of the serialized body; decoding
    /// the result reproduces every field of `self`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0u8; HEADER_LENGTH];
        bytes[0] = MAGIC_HIGH;
        bytes[1] = MAGIC_LOW;

        let mut flag = self.serial_id & SERIAL_MASK;
        if self.package_type.is_heartbeat() {
            flag |= FLAG_EVENT;
        }
        if self.package_type.is_request() {
            flag |= FLAG_REQUEST;
            if self.package_type.is_two_way() {
                flag |= FLAG_TWOWAY;
            }
        }
        bytes[2] = flag;
        bytes[3] = self.response_status;
        bytes[4..12].copy_from_slice(&self.request_id.to_be_bytes());
        bytes[12..16].copy_from_slice(&(self.body_len as u32).to_be_bytes());

        bytes
    }
}
