use packed_struct::PackedStructSlice;

use crate::{
    registry::{
        LookupError,
        Registry,
    },
    Direction,
    Error,
    Frame,
    MessageKind,
    OpaqueBytes,
};

pub mod fault_log;
pub mod filter;
pub mod information;
pub mod reserved;
pub mod status;

pub use fault_log::FaultLog;
pub use filter::{
    FilterCycles,
    FilterWindow,
};
pub use information::Information;
pub use status::Status;

/// A decoded message from the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    ReadyToSend,
    Status(Status),
    SetTempRange(OpaqueBytes),
    FilterCycles(FilterCycles),
    Information(Information),
    FaultLog(FaultLog),
    ControlConfig2(OpaqueBytes),
    Config(OpaqueBytes),
}

impl Reading {
    pub fn kind(&self) -> MessageKind {
        match self {
            Reading::ReadyToSend => MessageKind::ReadyToSend,
            Reading::Status(_) => MessageKind::Status,
            Reading::SetTempRange(_) => MessageKind::SetTempRange,
            Reading::FilterCycles(_) => MessageKind::FilterConfigResponse,
            Reading::Information(_) => MessageKind::InformationResponse,
            Reading::FaultLog(_) => MessageKind::FaultLogResponse,
            Reading::ControlConfig2(_) => MessageKind::ControlConfig2Response,
            Reading::Config(_) => MessageKind::ConfigResponse,
        }
    }

    /// Interpret `payload` as a `kind` response. The payload must be exactly the layout size.
    /// Command kinds have no response decoder.
    pub fn decode(kind: MessageKind, payload: &[u8]) -> Result<Self, Error> {
        let no_decoder = || Error::UnknownMessageType {
            ty:      kind.id(),
            payload: payload.into(),
        };

        if kind.direction() != Direction::Response {
            return Err(no_decoder());
        }

        check_size(kind, payload)?;

        let result = match kind {
            MessageKind::ReadyToSend => Reading::ReadyToSend,
            MessageKind::Status => Reading::Status(unpack(kind, payload)?),
            MessageKind::SetTempRange => Reading::SetTempRange(payload.into()),
            MessageKind::FilterConfigResponse => Reading::FilterCycles(unpack(kind, payload)?),
            MessageKind::InformationResponse => Reading::Information(unpack(kind, payload)?),
            MessageKind::FaultLogResponse => Reading::FaultLog(unpack(kind, payload)?),
            MessageKind::ControlConfig2Response => Reading::ControlConfig2(payload.into()),
            MessageKind::ConfigResponse => Reading::Config(payload.into()),
            _ => return Err(no_decoder()),
        };

        Ok(result)
    }

    /// Resolve a validated frame's type through `registry` and decode its payload. Unknown and
    /// ambiguous types keep the payload.
    pub fn from_frame<CRC>(registry: &Registry, frame: &Frame<CRC>) -> Result<Self, Error> {
        let ty = frame.ty();

        let entry = registry.lookup(ty, Direction::Response).map_err(|e| match e {
            LookupError::Unknown {
                ..
            } => Error::UnknownMessageType {
                ty,
                payload: frame.payload().into(),
            },
            LookupError::Ambiguous {
                candidates, ..
            } => Error::AmbiguousMessageType {
                ty,
                candidates,
                payload: frame.payload().into(),
            },
        })?;

        Self::decode(entry.kind, frame.payload())
    }

    pub fn display(&self) -> String {
        match self {
            Reading::ReadyToSend => "ready to send".to_owned(),
            Reading::Status(s) => s.display(),
            Reading::FilterCycles(f) => f.display(),
            Reading::Information(i) => i.display(),
            Reading::FaultLog(f) => f.display(),
            Reading::SetTempRange(b) | Reading::ControlConfig2(b) | Reading::Config(b) => b.to_string(),
        }
    }
}

pub(crate) fn check_size(kind: MessageKind, payload: &[u8]) -> Result<(), Error> {
    let expected = kind.payload_size();

    if payload.len() != expected {
        return Err(Error::PayloadSizeMismatch {
            kind,
            expected,
            actual: payload.len(),
        });
    }

    Ok(())
}

pub(crate) fn unpack<T>(kind: MessageKind, payload: &[u8]) -> Result<T, Error>
where
    T: PackedStructSlice,
{
    T::unpack_from_slice(payload).map_err(|source| Error::InvalidPayload {
        kind,
        source,
    })
}
