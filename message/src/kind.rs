use crate::{
    command,
    layout::PayloadLayout,
    reading,
    MessageTypeId,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Sent to the controller.
    Command,
    /// Sent by the controller.
    Response,
}

/// Every message type this codec knows about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum MessageKind {
    ConfigRequest,
    ToggleItemRequest,
    SetTempRequest,
    SetTimeRequest,
    FilterConfigRequest,
    ControlConfigRequest,
    SetFilterConfigRequest,
    SetTempScaleRequest,
    SetWifiSettingsRequest,

    ReadyToSend,
    Status,
    SetTempRange,
    FilterConfigResponse,
    InformationResponse,
    FaultLogResponse,
    ControlConfig2Response,
    ConfigResponse,
}

impl MessageKind {
    pub const ALL: [MessageKind; 17] = [
        MessageKind::ConfigRequest,
        MessageKind::ToggleItemRequest,
        MessageKind::SetTempRequest,
        MessageKind::SetTimeRequest,
        MessageKind::FilterConfigRequest,
        MessageKind::ControlConfigRequest,
        MessageKind::SetFilterConfigRequest,
        MessageKind::SetTempScaleRequest,
        MessageKind::SetWifiSettingsRequest,
        MessageKind::ReadyToSend,
        MessageKind::Status,
        MessageKind::SetTempRange,
        MessageKind::FilterConfigResponse,
        MessageKind::InformationResponse,
        MessageKind::FaultLogResponse,
        MessageKind::ControlConfig2Response,
        MessageKind::ConfigResponse,
    ];

    pub const fn id(self) -> MessageTypeId {
        use MessageKind::*;

        match self {
            ConfigRequest => MessageTypeId::new(0x0a, 0xbf, 0x04),
            ToggleItemRequest => MessageTypeId::new(0x0a, 0xbf, 0x11),
            SetTempRequest => MessageTypeId::new(0x0a, 0xbf, 0x20),
            SetTimeRequest => MessageTypeId::new(0x0a, 0xbf, 0x21),
            // both settings requests share an id; the first payload byte tells them apart
            FilterConfigRequest | ControlConfigRequest => MessageTypeId::new(0x0a, 0xbf, 0x22),
            SetFilterConfigRequest => MessageTypeId::new(0x0a, 0xbf, 0x23),
            SetTempScaleRequest => MessageTypeId::new(0x0a, 0xbf, 0x27),
            SetWifiSettingsRequest => MessageTypeId::new(0x0a, 0xbf, 0x92),

            ReadyToSend => MessageTypeId::new(0x10, 0xbf, 0x06),
            Status => MessageTypeId::new(0xff, 0xaf, 0x13),
            SetTempRange => MessageTypeId::new(0xff, 0xaf, 0x26),
            FilterConfigResponse => MessageTypeId::new(0x0a, 0xbf, 0x23),
            InformationResponse => MessageTypeId::new(0x0a, 0xbf, 0x24),
            FaultLogResponse => MessageTypeId::new(0x0a, 0xbf, 0x28),
            ControlConfig2Response => MessageTypeId::new(0x0a, 0xbf, 0x2e),
            ConfigResponse => MessageTypeId::new(0x0a, 0xbf, 0x94),
        }
    }

    pub const fn direction(self) -> Direction {
        use MessageKind::*;

        match self {
            ConfigRequest
            | ToggleItemRequest
            | SetTempRequest
            | SetTimeRequest
            | FilterConfigRequest
            | ControlConfigRequest
            | SetFilterConfigRequest
            | SetTempScaleRequest
            | SetWifiSettingsRequest => Direction::Command,

            ReadyToSend
            | Status
            | SetTempRange
            | FilterConfigResponse
            | InformationResponse
            | FaultLogResponse
            | ControlConfig2Response
            | ConfigResponse => Direction::Response,
        }
    }

    pub const fn layout(self) -> &'static PayloadLayout {
        use MessageKind::*;

        match self {
            ConfigRequest | ReadyToSend => &PayloadLayout::EMPTY,

            ToggleItemRequest => &command::toggle::LAYOUT,
            SetTempRequest => &command::temperature::LAYOUT,
            SetTimeRequest => &command::time::LAYOUT,
            FilterConfigRequest | ControlConfigRequest => &command::settings::LAYOUT,
            SetFilterConfigRequest | FilterConfigResponse => &reading::filter::LAYOUT,
            SetTempScaleRequest => &command::scale::LAYOUT,
            SetWifiSettingsRequest => &command::wifi::LAYOUT,

            Status => &reading::status::LAYOUT,
            SetTempRange => &reading::reserved::SET_TEMP_RANGE_LAYOUT,
            InformationResponse => &reading::information::LAYOUT,
            FaultLogResponse => &reading::fault_log::LAYOUT,
            ControlConfig2Response => &reading::reserved::CONTROL_CONFIG_2_LAYOUT,
            ConfigResponse => &reading::reserved::CONFIG_LAYOUT,
        }
    }

    #[inline]
    pub const fn payload_size(self) -> usize {
        self.layout().size
    }
}
