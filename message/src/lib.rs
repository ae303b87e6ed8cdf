//! Wire format of the spa controller's serial protocol.
//!
//! Messages travel as [`Frame`]s. Outgoing [`Command`]s are encoded into frames; incoming
//! frames are resolved through the [`Registry`] and decoded into [`Reading`]s.

use bytes::Bytes;

pub mod checksum;
pub mod command;
mod error;
pub mod frame;
mod id;
mod kind;
pub mod layout;
mod opaque;
pub mod reading;
pub mod registry;

pub use checksum::Checksum;
pub use command::Command;
pub use error::{
    Error,
    FramingError,
    Result,
};
pub use frame::Frame;
pub use id::MessageTypeId;
pub use kind::{
    Direction,
    MessageKind,
};
pub use layout::{
    Field,
    FieldValue,
    PayloadLayout,
};
pub use opaque::OpaqueBytes;
pub use reading::Reading;
pub use registry::{
    Registry,
    REGISTRY,
};

impl_checksum!(pub BalboaCrc, checksum::CRC_8_BALBOA);
impl_checksum!(pub MaximCrc, ::crc::CRC_8_MAXIM_DOW);

pub type StandardCRC = BalboaCrc;

/// Encode `command` into a complete frame.
#[inline]
pub fn encode(command: &Command) -> Result<Bytes> {
    command.encode()
}

/// Validate one complete frame and decode it as a response.
pub fn decode(raw: &[u8]) -> Result<Reading> {
    let frame = Frame::<StandardCRC>::decode(raw)?;
    Reading::from_frame(&REGISTRY, &frame)
}
