use packed_struct::PackingError;

use crate::{
    MessageKind,
    MessageTypeId,
    OpaqueBytes,
};

/// Structural problems with a frame: it can't be trusted to contain a message at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FramingError {
    #[error("frame too short ({len} bytes)")]
    TooShort { len: usize },

    #[error("bad frame prefix: 0x{0:02x}")]
    Prefix(u8),

    #[error("bad frame suffix: 0x{0:02x}")]
    Suffix(u8),

    #[error("length field ({declared}) does not match frame size ({actual} bytes)")]
    Length { declared: u8, actual: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Framing(#[from] FramingError),

    #[error("checksum mismatch (frame: 0x{received:02x}, computed: 0x{computed:02x})")]
    Checksum {
        received: u8,
        computed: u8,
        frame:    OpaqueBytes,
    },

    #[error("{kind:?} payload is {actual} bytes, expected {expected}")]
    PayloadSizeMismatch {
        kind:     MessageKind,
        expected: usize,
        actual:   usize,
    },

    #[error("unknown message type {ty} (payload: {payload})")]
    UnknownMessageType {
        ty:      MessageTypeId,
        payload: OpaqueBytes,
    },

    #[error("message type {ty} is ambiguous between {candidates:?}")]
    AmbiguousMessageType {
        ty:         MessageTypeId,
        candidates: Vec<MessageKind>,
        payload:    OpaqueBytes,
    },

    #[error("invalid {kind:?} payload: {source}")]
    InvalidPayload {
        kind:   MessageKind,
        #[source]
        source: PackingError,
    },

    #[error("{field} out of range: {value} (max {max})")]
    OutOfRange {
        field: &'static str,
        value: usize,
        max:   usize,
    },

    #[error("payload of {len} bytes does not fit in a frame (max {max})")]
    PayloadTooLarge { len: usize, max: usize },
}

impl Error {
    /// The bytes that could not be interpreted, if this error kept them.
    pub fn raw(&self) -> Option<&OpaqueBytes> {
        match self {
            Error::Checksum {
                frame, ..
            } => Some(frame),
            Error::UnknownMessageType {
                payload, ..
            }
            | Error::AmbiguousMessageType {
                payload, ..
            } => Some(payload),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
