use std::str::FromStr;

use packed_struct::prelude::*;

use super::ParseError;
use crate::layout::{
    Field,
    PayloadLayout,
};

const FIELDS: &[Field] = &[Field::byte("item", 0), Field::byte("_r", 1)];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(2, FIELDS);

/// Something on the panel that can be switched by "pressing" it.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8, serde::Serialize, serde::Deserialize,
)]
#[repr(u8)]
pub enum ToggleItem {
    Pump1     = 0x04,
    Pump2     = 0x05,
    Lights    = 0x11,
    TempRange = 0x50,
}

#[derive(Clone, Debug, PartialEq, Eq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub(super) struct Wire {
    #[packed_field(size_bytes = "1", ty = "enum")]
    pub item: ToggleItem,
    pub _r:   u8,
}

impl Wire {
    pub(super) const RESERVED: u8 = 0x00;
}

impl From<ToggleItem> for Wire {
    #[inline]
    fn from(item: ToggleItem) -> Self {
        Self {
            item,
            _r: Self::RESERVED,
        }
    }
}

impl FromStr for ToggleItem {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let result = match s.to_ascii_lowercase().as_str() {
            "pump1" => ToggleItem::Pump1,
            "pump2" => ToggleItem::Pump2,
            "lights" | "light" => ToggleItem::Lights,
            "temp-range" | "temprange" | "range" => ToggleItem::TempRange,
            _ => return Err(ParseError::new("toggle item", s)),
        };

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn codes() {
        let cases = [
            (ToggleItem::Pump1, [0x04, 0x00]),
            (ToggleItem::Pump2, [0x05, 0x00]),
            (ToggleItem::Lights, [0x11, 0x00]),
            (ToggleItem::TempRange, [0x50, 0x00]),
        ];

        for (item, expected) in cases {
            assert_eq!(Wire::from(item).pack(), Ok(expected));
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert!(Wire::unpack(&[0x06, 0x00]).is_err());
    }

    #[test]
    fn parse() {
        assert_eq!("Pump1".parse(), Ok(ToggleItem::Pump1));
        assert_eq!("lights".parse(), Ok(ToggleItem::Lights));
        assert_eq!("temp-range".parse(), Ok(ToggleItem::TempRange));
        assert!("blower".parse::<ToggleItem>().is_err());
    }
}
