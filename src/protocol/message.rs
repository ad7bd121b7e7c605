//! Call envelopes and the external serialization boundary.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use super::error::BodyError;
use super::header::DubboHeader;

/// String-keyed, order-irrelevant metadata carried beside a call's
/// arguments or result, analogous to request headers.
pub type Attachments = HashMap<String, String>;

/// Service coordinates an outgoing request is addressed to.
///
/// Consumed by [`BodyPacker::pack_request`] when assembling request and
/// request-shaped heartbeat bodies.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Service {
    /// Registration path of the target service.
    pub path: String,
    /// Fully qualified interface name.
    pub interface: String,
    /// Service group, empty when ungrouped.
    pub group: String,
    /// Service version, empty when unversioned.
    pub version: String,
    /// Method to invoke.
    pub method: String,
    /// Call timeout carried to the remote side.
    pub timeout: Duration,
}

/// Decoded request body.
///
/// The wire layout is seven positional fields; the attachment map is the
/// trailing one, which is what lets
/// [`BodyCodec::decode_request_skipping`] reach it without materializing
/// the argument values.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RpcInvocation<V> {
    /// Protocol revision the peer speaks.
    pub protocol_version: String,
    /// Target service path.
    pub path: String,
    /// Target service version.
    pub service_version: String,
    /// Invoked method name.
    pub method: String,
    /// Argument type signature.
    pub signature: String,
    /// Decoded argument values.
    pub arguments: Vec<V>,
    /// Trailing attachment map.
    pub attachments: Attachments,
}

impl<V> Default for RpcInvocation<V> {
    fn default() -> Self {
        Self {
            protocol_version: String::new(),
            path: String::new(),
            service_version: String::new(),
            method: String::new(),
            signature: String::new(),
            arguments: Vec::new(),
            attachments: Attachments::new(),
        }
    }
}

/// Decoded response body.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RpcResponse<V> {
    /// Call result, absent for void calls and failed calls.
    pub result: Option<V>,
    /// Remote failure carried as data. Set by exception frames; never a
    /// codec-level error.
    pub exception: Option<String>,
    /// Named attachment map.
    pub attachments: Attachments,
}

impl<V> Default for RpcResponse<V> {
    fn default() -> Self {
        Self {
            result: None,
            exception: None,
            attachments: Attachments::new(),
        }
    }
}

/// Caller-supplied decode target for
/// [`DubboCodec::read_body`](crate::protocol::DubboCodec::read_body).
#[derive(Debug)]
pub enum BodySlot<'a, V> {
    /// Populate a request envelope.
    Request(&'a mut RpcInvocation<V>),
    /// Populate a response envelope.
    Response(&'a mut RpcResponse<V>),
    /// No container; body bytes are consumed and dropped.
    Discard,
}

/// Boundary to the generic object serializer selected by a frame's
/// serialization id.
///
/// The codec never interprets body bytes itself; implementations wrap a
/// concrete serialization scheme and own the body layout.
pub trait BodyCodec {
    /// Value type the serializer materializes.
    type Value: fmt::Display;

    /// Decode the body as a single top-level value. Exception payloads
    /// carry their message this way.
    fn decode_single(&self, body: &[u8]) -> Result<Self::Value, BodyError>;

    /// Decode request arguments into `into`.
    fn decode_request(
        &self,
        body: &[u8],
        into: &mut RpcInvocation<Self::Value>,
    ) -> Result<(), BodyError>;

    /// Decode a call result into `into`.
    fn decode_response(
        &self,
        body: &[u8],
        into: &mut RpcResponse<Self::Value>,
    ) -> Result<(), BodyError>;

    /// Like [`decode_request`](Self::decode_request), but implementations
    /// may skip materializing argument values when only the trailing
    /// fields are wanted.
    fn decode_request_skipping(
        &self,
        body: &[u8],
        into: &mut RpcInvocation<Self::Value>,
    ) -> Result<(), BodyError> {
        self.decode_request(body, into)
    }

    /// Like [`decode_response`](Self::decode_response), skipping the result
    /// value when only the attachment map is wanted.
    fn decode_response_skipping(
        &self,
        body: &[u8],
        into: &mut RpcResponse<Self::Value>,
    ) -> Result<(), BodyError> {
        self.decode_response(body, into)
    }
}

/// Boundary to the external body packers on the write path.
///
/// Packers own the body layout and prepend the 16-byte header (via
/// [`DubboHeader::to_bytes`]) in front of the serialized body; the codec
/// only routes to them.
pub trait BodyPacker {
    /// Body value type the packer serializes.
    type Payload;

    /// Assemble a request-shaped frame from service metadata and a body.
    fn pack_request(
        &self,
        service: &Service,
        header: &DubboHeader,
        body: &Self::Payload,
    ) -> Result<Vec<u8>, BodyError>;

    /// Assemble a response-shaped frame.
    fn pack_response(
        &self,
        header: &DubboHeader,
        body: &Self::Payload,
    ) -> Result<Vec<u8>, BodyError>;
}
