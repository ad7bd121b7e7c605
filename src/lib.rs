//! Wire-protocol codec for the Dubbo RPC frame format.
//!
//! This library turns a connection's byte stream into typed request/response
//! envelopes and routes outgoing calls through external packers producing
//! bytes in the fixed 16-byte frame format. Object serialization itself is
//! out of scope: body bytes cross the [`BodyCodec`] / [`BodyPacker`]
//! boundaries untouched.
//!
//! # Quick Start
//!
//! ```rust
//! use dubbo_wire::{BufferedSource, DubboCodec, DubboHeader, PackageType};
//!
//! // Frame a two-way request header and run it through a buffered session.
//! let mut header = DubboHeader::default();
//! header.serial_id = 2;
//! header.package_type = PackageType::new()
//!     .with(PackageType::REQUEST)
//!     .with(PackageType::REQUEST_TWO_WAY);
//! header.request_id = 1;
//!
//! let mut source = BufferedSource::new();
//! source.feed(&header.to_bytes());
//!
//! let mut codec = DubboCodec::new(source);
//! let mut decoded = DubboHeader::default();
//! codec.read_header(&mut decoded)?;
//! assert_eq!(decoded.request_id, 1);
//! assert!(decoded.package_type.is_two_way());
//! # Ok::<(), dubbo_wire::Error>(())
//! ```
//!
//! # Features
//!
//! - **Bit-exact framing** - 16-byte big-endian header, bitmask type taxonomy
//! - **Two I/O disciplines** - buffered peek/discard vs. blocking streaming reads
//! - **Retryable insufficiency** - short buffers never corrupt protocol state
//! - **Opaque payloads** - serializers and packers stay behind narrow traits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Attachments, BodyCodec, BodyError, BodyPacker, BodySlot, BufferedSource, DubboCodec,
    DubboHeader, Error, FrameKind, FrameSource, HEADER_LENGTH, MAGIC_HIGH, MAGIC_LOW, PackageType,
    RESPONSE_OK, Result, RpcInvocation, RpcResponse, Service, StreamingSource,
};

/// Protocol revision carried in request bodies.
pub const PROTOCOL_VERSION: &str = "2.0.2";

/// Default Dubbo port.
pub const DEFAULT_PORT: u16 = 20880;
