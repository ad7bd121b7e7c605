//! Codec error taxonomy.

use thiserror::Error;

use super::types::PackageType;

/// Errors surfaced by the wire codec.
///
/// Only the insufficient-data variants are designed to be retried, and only
/// by the caller feeding more input and calling the same read again; see
/// [`is_retryable`](Self::is_retryable). Malformed-frame variants lose byte
/// alignment with the stream, so the connection should generally be closed.
#[derive(Error, Debug)]
pub enum Error {
    /// Frame does not start with the protocol magic.
    #[error("illegal package: magic {found:02x?}")]
    IllegalMagic {
        /// First two bytes actually read.
        found: [u8; 2],
    },

    /// Declared body length decodes to a negative value.
    #[error("illegal package: body length {value}")]
    IllegalBodyLength {
        /// The offending signed value.
        value: i32,
    },

    /// Serialization id field of the flag byte decoded to zero.
    #[error("invalid serialization id: 0")]
    InvalidSerializationId,

    /// Buffered source holds fewer than the 16 header bytes; retry after
    /// feeding more input.
    #[error("header not enough: need 16 bytes, {available} buffered")]
    HeaderNotEnough {
        /// Bytes currently buffered.
        available: usize,
    },

    /// Buffered source holds fewer bytes than the declared body length;
    /// retry after feeding more input.
    #[error("body not enough: need {needed} bytes, {available} buffered")]
    BodyNotEnough {
        /// Declared body length.
        needed: usize,
        /// Bytes currently buffered.
        available: usize,
    },

    /// Underlying byte source failed during a read.
    #[error("source I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Write-path header type matches no known packer route.
    #[error("unrecognized message type: {found}")]
    UnrecognizedMessageType {
        /// The offending type value.
        found: PackageType,
    },

    /// A remote exception was decoded but the caller supplied no
    /// response-shaped container to carry it.
    #[error("remote exception: {message}")]
    RemoteException {
        /// Exception text decoded from the body.
        message: String,
    },

    /// External body codec or packer failure.
    #[error(transparent)]
    Body(#[from] BodyError),
}

impl Error {
    /// Whether the caller may retry the same read after more input arrives.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::HeaderNotEnough { .. } | Self::BodyNotEnough { .. }
        )
    }
}

/// Error raised by an external body codec or packer implementation.
#[derive(Debug, Error)]
#[error("body codec: {message}")]
pub struct BodyError {
    message: String,
}

impl BodyError {
    /// Wrap an implementation-specific failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
