//! Wire frame definition and header codec
//!
//! Every message on the wire is a fixed-width ASCII length header followed
//! by the raw body bytes. Both sides of the connection must agree on
//! `HEADER_LEN` and `MAX_BODY_LEN`; a mismatch breaks the protocol.

use crate::error::FrameError;

/// Header width in bytes: the body length as decimal ASCII, right-aligned
/// and space-padded.
pub const HEADER_LEN: usize = 4;

/// Upper bound on body size. Headers declaring more are rejected at decode.
pub const MAX_BODY_LEN: usize = 512;

/// Maximum size of one encoded frame.
pub const MAX_FRAME_LEN: usize = HEADER_LEN + MAX_BODY_LEN;

/// One complete protocol unit: the body of a single chat line.
///
/// The header is not stored; it is derived from the body length on encode
/// and validated separately on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    body: Vec<u8>,
}

impl Frame {
    /// Create a frame from body bytes.
    ///
    /// Fails if the body exceeds `MAX_BODY_LEN`.
    pub fn new(body: Vec<u8>) -> Result<Self, FrameError> {
        if body.len() > MAX_BODY_LEN {
            return Err(FrameError::BodyTooLarge { length: body.len() });
        }
        Ok(Self { body })
    }

    /// The body bytes of this frame.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body length in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body is empty (empty chat lines are legal).
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Encode this frame for the wire: header followed by body.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.body.len());
        buf.extend_from_slice(&encode_header(self.body.len()));
        buf.extend_from_slice(&self.body);
        buf
    }
}

/// Render a body length as a fixed-width header.
///
/// Caller contract: `body_len <= MAX_BODY_LEN`. Validation belongs to the
/// caller; an oversized length here is a bug, not a runtime condition.
pub fn encode_header(body_len: usize) -> [u8; HEADER_LEN] {
    debug_assert!(body_len <= MAX_BODY_LEN);
    let digits = body_len.to_string();
    let mut header = [b' '; HEADER_LEN];
    header[HEADER_LEN - digits.len()..].copy_from_slice(digits.as_bytes());
    header
}

/// Parse a header into a body length.
///
/// This is the sole admission-control checkpoint protecting memory and
/// bandwidth from a hostile or corrupt peer: non-numeric headers and
/// lengths above `MAX_BODY_LEN` are rejected, and a rejected header is
/// fatal to the connection (a desynced byte stream cannot be resumed).
pub fn decode_header(header: &[u8]) -> Result<usize, FrameError> {
    let text = std::str::from_utf8(header).map_err(|_| FrameError::InvalidHeader)?;
    // The encoder space-pads, so tolerate surrounding spaces like the
    // original atoi-based parser did.
    let body_len: usize = text
        .trim_matches(' ')
        .parse()
        .map_err(|_| FrameError::InvalidHeader)?;
    if body_len > MAX_BODY_LEN {
        return Err(FrameError::BodyTooLarge { length: body_len });
    }
    Ok(body_len)
}
