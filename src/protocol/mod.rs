//! Dubbo wire protocol core implementation.
//!
//! This module provides the frame header model, the package type taxonomy,
//! the per-connection codec session, and the capability boundaries to byte
//! sources and external body (de)serializers.

mod codec;
mod error;
mod header;
mod message;
mod source;
mod types;

pub use codec::DubboCodec;
pub use error::{BodyError, Error, Result};
pub use header::DubboHeader;
pub use message::{
    Attachments, BodyCodec, BodyPacker, BodySlot, RpcInvocation, RpcResponse, Service,
};
pub use source::{BufferedSource, FrameSource, StreamingSource};
pub use types::{FrameKind, PackageType};

/// First byte of the frame magic.
pub const MAGIC_HIGH: u8 = 0xda;

/// Second byte of the frame magic.
pub const MAGIC_LOW: u8 = 0xbb;

/// Fixed frame header length in bytes.
pub const HEADER_LENGTH: usize = 16;

/// Response status of a successful call; any other value marks an exception
/// payload.
pub const RESPONSE_OK: u8 = 20;

// Flag byte layout: low 5 bits serialization id, high bits frame shape.
pub(crate) const SERIAL_MASK: u8 = 0x1f;
pub(crate) const FLAG_EVENT: u8 = 0x20;
pub(crate) const FLAG_TWOWAY: u8 = 0x40;
pub(crate) const FLAG_REQUEST: u8 = 0x80;
