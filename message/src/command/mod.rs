use bytes::Bytes;
use packed_struct::{
    prelude::*,
    PackingError,
};

use crate::{
    reading::{
        check_size,
        unpack,
        FilterCycles,
    },
    Checksum,
    Error,
    Frame,
    MessageKind,
    OpaqueBytes,
    StandardCRC,
};

pub mod scale;
pub mod settings;
pub mod temperature;
pub mod time;
pub mod toggle;
pub mod wifi;

pub use scale::TempScale;
pub use settings::SettingsRequest;
pub use temperature::SpaTemperature;
pub use time::SpaTime;
pub use toggle::ToggleItem;
pub use wifi::WifiSettings;

/// A request to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ConfigRequest,
    Toggle(ToggleItem),
    SetTemperature(SpaTemperature),
    SetTime(SpaTime),
    Settings(SettingsRequest),
    SetFilterCycles(FilterCycles),
    SetTempScale(TempScale),
    SetWifi(WifiSettings),
}

impl Command {
    pub fn kind(&self) -> MessageKind {
        match self {
            Command::ConfigRequest => MessageKind::ConfigRequest,
            Command::Toggle(_) => MessageKind::ToggleItemRequest,
            Command::SetTemperature(_) => MessageKind::SetTempRequest,
            Command::SetTime(_) => MessageKind::SetTimeRequest,
            Command::Settings(req) => req.kind(),
            Command::SetFilterCycles(_) => MessageKind::SetFilterConfigRequest,
            Command::SetTempScale(_) => MessageKind::SetTempScaleRequest,
            Command::SetWifi(_) => MessageKind::SetWifiSettingsRequest,
        }
    }

    /// The payload bytes for this command.
    pub fn payload(&self) -> Result<OpaqueBytes, Error> {
        let kind = self.kind();
        let packing = |source: PackingError| Error::InvalidPayload {
            kind,
            source,
        };

        let result: OpaqueBytes = match self {
            Command::ConfigRequest => OpaqueBytes::default(),
            Command::Toggle(item) => toggle::Wire::from(*item).pack().map_err(packing)?.into(),
            Command::SetTemperature(t) => [t.raw].into(),
            Command::SetTime(t) => time::Wire::from(*t).pack().map_err(packing)?.into(),
            Command::Settings(req) => req.to_bytes().into(),
            Command::SetFilterCycles(f) => f.pack().map_err(packing)?.into(),
            Command::SetTempScale(s) => scale::Wire::from(*s).pack().map_err(packing)?.into(),
            Command::SetWifi(w) => wifi::Wire::from(w).pack().map_err(packing)?.into(),
        };

        debug_assert_eq!(result.len(), kind.payload_size());

        Ok(result)
    }

    pub fn frame<CRC>(&self) -> Result<Frame<CRC>, Error> {
        Frame::new(self.kind().id(), self.payload()?)
    }

    /// The complete wire frame, checked with the standard checksum.
    pub fn encode(&self) -> Result<Bytes, Error> {
        self.encode_with::<StandardCRC>()
    }

    pub fn encode_with<CRC>(&self) -> Result<Bytes, Error>
    where
        CRC: Checksum,
    {
        Ok(self.frame::<CRC>()?.encode())
    }

    /// Interpret captured outgoing traffic. The caller picks `kind`, since a type id alone
    /// doesn't always identify a command.
    pub fn decode(kind: MessageKind, payload: &[u8]) -> Result<Self, Error> {
        check_size(kind, payload)?;

        let invalid = || Error::InvalidPayload {
            kind,
            source: PackingError::InvalidValue,
        };

        let result = match kind {
            MessageKind::ConfigRequest => Command::ConfigRequest,
            MessageKind::ToggleItemRequest => {
                let wire = unpack::<toggle::Wire>(kind, payload)?;

                if wire._r != toggle::Wire::RESERVED {
                    return Err(invalid());
                }

                Command::Toggle(wire.item)
            },
            MessageKind::SetTempRequest => Command::SetTemperature(SpaTemperature::raw(payload[0])),
            MessageKind::SetTimeRequest => Command::SetTime(unpack::<time::Wire>(kind, payload)?.try_into()?),
            MessageKind::FilterConfigRequest | MessageKind::ControlConfigRequest => {
                let req = SettingsRequest::from_bytes([payload[0], payload[1], payload[2]])
                    .map_err(|source| Error::InvalidPayload {
                        kind,
                        source,
                    })?;

                if req.kind() != kind {
                    return Err(invalid());
                }

                Command::Settings(req)
            },
            MessageKind::SetFilterConfigRequest => Command::SetFilterCycles(unpack(kind, payload)?),
            MessageKind::SetTempScaleRequest => {
                let wire = unpack::<scale::Wire>(kind, payload)?;

                if wire._r != scale::Wire::RESERVED {
                    return Err(invalid());
                }

                Command::SetTempScale(wire.scale)
            },
            MessageKind::SetWifiSettingsRequest => {
                Command::SetWifi(unpack::<wifi::Wire>(kind, payload)?.try_into()?)
            },
            _ => {
                return Err(Error::UnknownMessageType {
                    ty:      kind.id(),
                    payload: payload.into(),
                })
            },
        };

        Ok(result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {value:?}")]
pub struct ParseError {
    what:  &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_owned(),
        }
    }
}
