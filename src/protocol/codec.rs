//! Fixed-size frame codec.
//!
//! Every frame is exactly [`FRAME_SIZE`] bytes: the protocol version, the
//! bincode encoding of the message, then zero padding.

use crate::protocol::{Message, PROTOCOL_VERSION};

/// Size of every frame on the wire.
pub const FRAME_SIZE: usize = 512;

/// Room left for the message body after the version byte.
const BODY_MAX: usize = FRAME_SIZE - 1;

/// Errors raised while encoding or decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("protocol version mismatch: expected {expected}, got {got}")]
    VersionMismatch { expected: u8, got: u8 },
    #[error("malformed message: {0}")]
    Malformed(String),
    #[error("message too large: {size} bytes (max: {max})")]
    Oversized { size: usize, max: usize },
    #[error("truncated frame: {0} bytes")]
    Truncated(usize),
}

/// Encode `msg` into one frame.
pub fn encode_frame(msg: &Message) -> Result<Vec<u8>, ProtocolError> {
    msg.validate()?;
    let body =
        bincode::serialize(msg).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    if body.len() > BODY_MAX {
        return Err(ProtocolError::Oversized {
            size: body.len(),
            max: BODY_MAX,
        });
    }
    let mut frame = vec![0u8; FRAME_SIZE];
    frame[0] = PROTOCOL_VERSION;
    frame[1..=body.len()].copy_from_slice(&body);
    Ok(frame)
}

/// Decode one frame. The version is checked before the body is touched.
pub fn decode_frame(frame: &[u8]) -> Result<Message, ProtocolError> {
    if frame.len() < FRAME_SIZE {
        return Err(ProtocolError::Truncated(frame.len()));
    }
    if frame.len() > FRAME_SIZE {
        return Err(ProtocolError::Oversized {
            size: frame.len(),
            max: FRAME_SIZE,
        });
    }
    if frame[0] != PROTOCOL_VERSION {
        return Err(ProtocolError::VersionMismatch {
            expected: PROTOCOL_VERSION,
            got: frame[0],
        });
    }
    // Trailing padding is ignored by the decoder.
    let msg: Message =
        bincode::deserialize(&frame[1..]).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    msg.validate()?;
    Ok(msg)
}
