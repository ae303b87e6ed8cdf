use packed_struct::PackingError;

use crate::{
    layout::{
        Field,
        PayloadLayout,
    },
    MessageKind,
};

const FIELDS: &[Field] = &[
    Field::byte("subtype", 0),
    Field::byte("argument", 1),
    Field::byte("flag", 2),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(3, FIELDS);

/// Asks the controller to report one of its settings pages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SettingsRequest {
    Panel,
    FilterCycles,
    Information,
    Preferences,
    FaultLog { entry: u8 },
}

impl SettingsRequest {
    const PANEL: u8 = 0x00;
    const FILTER_CYCLES: u8 = 0x01;
    const INFORMATION: u8 = 0x02;
    const PREFERENCES: u8 = 0x08;
    const FAULT_LOG: u8 = 0x20;

    /// Both request kinds share a type id; only filter-cycle requests are filter-config.
    #[inline]
    pub const fn kind(&self) -> MessageKind {
        match self {
            SettingsRequest::FilterCycles => MessageKind::FilterConfigRequest,
            _ => MessageKind::ControlConfigRequest,
        }
    }

    /// The response the controller sends back.
    pub const fn response_kind(&self) -> MessageKind {
        match self {
            SettingsRequest::Panel => MessageKind::ControlConfig2Response,
            SettingsRequest::FilterCycles => MessageKind::FilterConfigResponse,
            SettingsRequest::Information => MessageKind::InformationResponse,
            SettingsRequest::Preferences => MessageKind::SetTempRange,
            SettingsRequest::FaultLog {
                ..
            } => MessageKind::FaultLogResponse,
        }
    }

    pub const fn to_bytes(&self) -> [u8; 3] {
        match *self {
            SettingsRequest::Panel => [Self::PANEL, 0x00, 0x01],
            SettingsRequest::FilterCycles => [Self::FILTER_CYCLES, 0x00, 0x00],
            SettingsRequest::Information => [Self::INFORMATION, 0x00, 0x00],
            SettingsRequest::Preferences => [Self::PREFERENCES, 0x00, 0x00],
            SettingsRequest::FaultLog {
                entry,
            } => [Self::FAULT_LOG, entry, 0x00],
        }
    }

    pub fn from_bytes(b: [u8; 3]) -> Result<Self, PackingError> {
        let result = match b {
            [Self::PANEL, 0x00, 0x01] => SettingsRequest::Panel,
            [Self::FILTER_CYCLES, 0x00, 0x00] => SettingsRequest::FilterCycles,
            [Self::INFORMATION, 0x00, 0x00] => SettingsRequest::Information,
            [Self::PREFERENCES, 0x00, 0x00] => SettingsRequest::Preferences,
            [Self::FAULT_LOG, entry, 0x00] => SettingsRequest::FaultLog {
                entry,
            },
            _ => return Err(PackingError::InvalidValue),
        };

        Ok(result)
    }
}
