//! Per-connection codec session: header, body, and attachment reads plus
//! write-path routing.

use bytes::Bytes;
use tracing::{debug, trace};

use super::header::DubboHeader;
use super::message::{Attachments, BodyCodec, BodyPacker, BodySlot, RpcInvocation, RpcResponse, Service};
use super::source::FrameSource;
use super::types::{FrameKind, PackageType};
use super::{Error, HEADER_LENGTH, Result};

/// Per-connection-read protocol session.
///
/// Wraps a byte source exclusively for the connection's lifetime and walks
/// it one frame at a time: a [`read_header`](Self::read_header) records the
/// package type and body length that the following
/// [`read_body`](Self::read_body) or
/// [`read_attachments`](Self::read_attachments) depends on. Partial frames
/// are never carried across calls.
///
/// A session is bound to one connection's read direction and is not safe
/// for concurrent use; callers serialize header-then-body cycles, e.g. one
/// reader thread per connection.
#[derive(Debug)]
pub struct DubboCodec<S> {
    source: S,
    pkg_type: PackageType,
    body_len: usize,
}

impl<S: FrameSource> DubboCodec<S> {
    /// Bind a session to a connection's byte source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pkg_type: PackageType::new(),
            body_len: 0,
        }
    }

    /// Resume a frame whose header was already decoded elsewhere, seeding
    /// the state a body read depends on.
    pub fn with_frame(source: S, package_type: PackageType, body_len: usize) -> Self {
        Self {
            source,
            pkg_type: package_type,
            body_len,
        }
    }

    /// Access the underlying source, e.g. to feed a
    /// [`BufferedSource`](crate::protocol::BufferedSource) as connection
    /// bytes arrive.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Read and validate one frame header, populating `header` in place.
    ///
    /// On a buffered source this never blocks: fewer than 16 available
    /// bytes fail with [`Error::HeaderNotEnough`] before anything is
    /// consumed, and a declared body length beyond the buffered count fails
    /// with [`Error::BodyNotEnough`] after the header fields and session
    /// state are already populated, so the caller can feed more input and
    /// go straight to the body read. On a streaming source the read blocks
    /// until all 16 bytes arrive.
    pub fn read_header(&mut self, header: &mut DubboHeader) -> Result<()> {
        if let Some(available) = self.source.available() {
            if available < HEADER_LENGTH {
                return Err(Error::HeaderNotEnough { available });
            }
        }

        let buf = self.source.take(HEADER_LENGTH)?;
        *header = DubboHeader::from_bytes(&buf)?;

        self.pkg_type = header.package_type;
        self.body_len = header.body_len;
        trace!(
            id = header.request_id,
            package_type = %header.package_type,
            body_len = header.body_len,
            "decoded frame header"
        );

        if let Some(available) = self.source.available() {
            if available < self.body_len {
                return Err(Error::BodyNotEnough {
                    needed: self.body_len,
                    available,
                });
            }
        }

        Ok(())
    }

    /// Read the frame body recorded by the last header read and dispatch it
    /// to the decode path its package type selects.
    ///
    /// A decoded remote exception is stored on a response-shaped slot and
    /// reported as success; it is application-level failure data, not a
    /// codec failure. Exception frames always require a response-shaped
    /// slot and fail descriptively with any other. Heartbeats and
    /// unrecognized combinations consume the body without interpreting it,
    /// as does a request or response frame whose matching slot is absent
    /// (fire-and-forget).
    pub fn read_body<C: BodyCodec>(
        &mut self,
        body_codec: &C,
        slot: BodySlot<'_, C::Value>,
    ) -> Result<()> {
        let buf = self.acquire_body()?;
        let kind = self.pkg_type.classify();
        trace!(kind = ?kind, body_len = buf.len(), "dispatching frame body");

        match kind {
            FrameKind::ExceptionResponse | FrameKind::HeartbeatExceptionResponse => {
                let message = body_codec.decode_single(&buf)?.to_string();
                match slot {
                    BodySlot::Response(response) => {
                        response.exception = Some(message);
                        Ok(())
                    }
                    _ => Err(Error::RemoteException { message }),
                }
            }
            FrameKind::HeartbeatRequest | FrameKind::HeartbeatResponse => Ok(()),
            FrameKind::Request => {
                if let BodySlot::Request(invocation) = slot {
                    body_codec.decode_request(&buf, invocation)?;
                }
                Ok(())
            }
            FrameKind::Response => {
                if let BodySlot::Response(response) = slot {
                    body_codec.decode_response(&buf, response)?;
                }
                Ok(())
            }
            FrameKind::Unrecognized => Ok(()),
        }
    }

    /// Read the frame body but extract only the attachment map.
    ///
    /// Request frames surface the trailing field of the skip-decoded
    /// argument list; response frames surface the envelope's named field;
    /// any other package type yields `None` without error.
    pub fn read_attachments<C: BodyCodec>(&mut self, body_codec: &C) -> Result<Option<Attachments>> {
        let buf = self.acquire_body()?;

        match self.pkg_type.classify() {
            FrameKind::Request => {
                let mut invocation = RpcInvocation::default();
                body_codec.decode_request_skipping(&buf, &mut invocation)?;
                Ok(Some(invocation.attachments))
            }
            FrameKind::Response => {
                let mut response = RpcResponse::default();
                body_codec.decode_response_skipping(&buf, &mut response)?;
                Ok(Some(response.attachments))
            }
            _ => Ok(None),
        }
    }

    /// Route an outgoing frame to the packer its header type selects.
    ///
    /// Heartbeats with the response status still at zero are request-shaped
    /// and use the service metadata; a set status makes them
    /// response-shaped. The packer emits the header bytes in front of the
    /// serialized body; the session only routes and its read state is
    /// untouched.
    pub fn write<P: BodyPacker>(
        &self,
        packer: &P,
        service: &Service,
        header: &DubboHeader,
        body: &P::Payload,
    ) -> Result<Vec<u8>> {
        debug!(
            package_type = %header.package_type,
            id = header.request_id,
            "routing outgoing frame"
        );

        const TWO_WAY_REQUEST: u8 = PackageType::REQUEST | PackageType::REQUEST_TWO_WAY;

        match header.package_type.bits() {
            PackageType::HEARTBEAT => {
                if header.response_status == 0 {
                    Ok(packer.pack_request(service, header, body)?)
                } else {
                    Ok(packer.pack_response(header, body)?)
                }
            }
            PackageType::REQUEST | PackageType::REQUEST_TWO_WAY | TWO_WAY_REQUEST => {
                Ok(packer.pack_request(service, header, body)?)
            }
            PackageType::RESPONSE => Ok(packer.pack_response(header, body)?),
            _ => Err(Error::UnrecognizedMessageType {
                found: header.package_type,
            }),
        }
    }

    fn acquire_body(&mut self) -> Result<Bytes> {
        if let Some(available) = self.source.available() {
            if available < self.body_len {
                return Err(Error::BodyNotEnough {
                    needed: self.body_len,
                    available,
                });
            }
        }
        Ok(self.source.take(self.body_len)?)
    }
}
