use std::str::FromStr;

use packed_struct::prelude::*;

use super::ParseError;
use crate::layout::{
    Field,
    PayloadLayout,
};

const FIELDS: &[Field] = &[Field::byte("_r", 0), Field::byte("scale", 1)];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(2, FIELDS);

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum TempScale {
    Fahrenheit = 0x00,
    Celsius    = 0x01,
}

impl FromStr for TempScale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "fahrenheit" => Ok(TempScale::Fahrenheit),
            "c" | "celsius" => Ok(TempScale::Celsius),
            _ => Err(ParseError::new("temperature scale", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub(super) struct Wire {
    pub _r:    u8,
    #[packed_field(size_bytes = "1", ty = "enum")]
    pub scale: TempScale,
}

impl Wire {
    pub(super) const RESERVED: u8 = 0x01;
}

impl From<TempScale> for Wire {
    #[inline]
    fn from(scale: TempScale) -> Self {
        Self {
            _r: Self::RESERVED,
            scale,
        }
    }
}
