//! Package type taxonomy for Dubbo frames.

use std::fmt;

/// Additive package type bitmask decoded from a frame's flag byte.
///
/// Heartbeat and exception are modifiers layered onto a base
/// request/response bit, not independent states, so decode paths are
/// selected by comparing combinations rather than single bits; see
/// [`classify`](Self::classify).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PackageType(u8);

impl PackageType {
    /// Malformed package marker.
    pub const ERROR: u8 = 0x01;
    /// Request frame.
    pub const REQUEST: u8 = 0x02;
    /// Response frame.
    pub const RESPONSE: u8 = 0x04;
    /// Liveness heartbeat modifier.
    pub const HEARTBEAT: u8 = 0x08;
    /// Request expecting a correlated response.
    pub const REQUEST_TWO_WAY: u8 = 0x10;
    /// Response carrying a remote exception.
    pub const RESPONSE_EXCEPTION: u8 = 0x20;
    /// Bits considered when selecting a decode path. The two-way bit is
    /// deliberately outside the mask.
    pub const DISPATCH_MASK: u8 = 0x2f;

    /// Create an empty bitmask.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Reconstruct from a raw bit value.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bit value.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// OR a flag into the mask.
    #[must_use]
    pub const fn with(self, flag: u8) -> Self {
        Self(self.0 | flag)
    }

    /// Check whether a flag is set.
    #[must_use]
    pub const fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Check whether the request bit is set.
    #[must_use]
    pub const fn is_request(self) -> bool {
        self.has(Self::REQUEST)
    }

    /// Check whether the response bit is set.
    #[must_use]
    pub const fn is_response(self) -> bool {
        self.has(Self::RESPONSE)
    }

    /// Check whether the heartbeat modifier is set.
    #[must_use]
    pub const fn is_heartbeat(self) -> bool {
        self.has(Self::HEARTBEAT)
    }

    /// Check whether the frame expects a correlated response.
    #[must_use]
    pub const fn is_two_way(self) -> bool {
        self.has(Self::REQUEST_TWO_WAY)
    }

    /// Resolve the bitmask into its decode-path combination.
    ///
    /// Masks with [`DISPATCH_MASK`](Self::DISPATCH_MASK) and matches whole
    /// combinations; each masked value maps to exactly one [`FrameKind`],
    /// so the more specific combinations win structurally instead of by
    /// match order. Two-way requests classify as plain requests.
    #[must_use]
    pub const fn classify(self) -> FrameKind {
        const EXCEPTION_HEARTBEAT_RESPONSE: u8 =
            PackageType::RESPONSE | PackageType::HEARTBEAT | PackageType::RESPONSE_EXCEPTION;
        const EXCEPTION_RESPONSE: u8 = PackageType::RESPONSE | PackageType::RESPONSE_EXCEPTION;
        const HEARTBEAT_REQUEST: u8 = PackageType::REQUEST | PackageType::HEARTBEAT;
        const HEARTBEAT_RESPONSE: u8 = PackageType::RESPONSE | PackageType::HEARTBEAT;

        match self.0 & Self::DISPATCH_MASK {
            EXCEPTION_HEARTBEAT_RESPONSE => FrameKind::HeartbeatExceptionResponse,
            EXCEPTION_RESPONSE => FrameKind::ExceptionResponse,
            HEARTBEAT_REQUEST => FrameKind::HeartbeatRequest,
            HEARTBEAT_RESPONSE => FrameKind::HeartbeatResponse,
            Self::REQUEST => FrameKind::Request,
            Self::RESPONSE => FrameKind::Response,
            _ => FrameKind::Unrecognized,
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has(Self::ERROR) {
            parts.push("ERROR");
        }
        if self.has(Self::REQUEST) {
            parts.push("REQUEST");
        }
        if self.has(Self::RESPONSE) {
            parts.push("RESPONSE");
        }
        if self.has(Self::HEARTBEAT) {
            parts.push("HEARTBEAT");
        }
        if self.has(Self::REQUEST_TWO_WAY) {
            parts.push("TWO_WAY");
        }
        if self.has(Self::RESPONSE_EXCEPTION) {
            parts.push("EXCEPTION");
        }
        if parts.is_empty() {
            write!(f, "EMPTY")
        } else {
            write!(f, "{}", parts.join(" | "))
        }
    }
}

/// Closed set of package type combinations with a defined decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// Call arguments follow.
    Request,
    /// Call result follows.
    Response,
    /// Liveness check shaped as a request; the body carries no meaning.
    HeartbeatRequest,
    /// Liveness check shaped as a response.
    HeartbeatResponse,
    /// Response whose body is a remote exception message.
    ExceptionResponse,
    /// Heartbeat-flagged response carrying a remote exception.
    HeartbeatExceptionResponse,
    /// Combination with no defined decode path; consumed but not
    /// interpreted.
    Unrecognized,
}
