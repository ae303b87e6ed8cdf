use packed_struct::prelude::*;

use crate::{
    layout::{
        Field,
        PayloadLayout,
    },
    Error,
};

const FIELDS: &[Field] = &[
    Field::bits("display_24h", 0, 7, 1),
    Field::bits("hour", 0, 0, 7),
    Field::byte("minute", 1),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(2, FIELDS);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SpaTime {
    hour:        u8,
    minute:      u8,
    display_24h: bool,
}

impl SpaTime {
    pub const MAX_HOUR: u8 = 23;
    pub const MAX_MINUTE: u8 = 59;

    pub fn new(hour: u8, minute: u8, display_24h: bool) -> Result<Self, Error> {
        if hour > Self::MAX_HOUR {
            return Err(Error::OutOfRange {
                field: "hour",
                value: hour as usize,
                max:   Self::MAX_HOUR as usize,
            });
        }

        if minute > Self::MAX_MINUTE {
            return Err(Error::OutOfRange {
                field: "minute",
                value: minute as usize,
                max:   Self::MAX_MINUTE as usize,
            });
        }

        Ok(Self {
            hour,
            minute,
            display_24h,
        })
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub fn display_24h(&self) -> bool {
        self.display_24h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "2")]
pub(super) struct Wire {
    #[packed_field(size_bits = "1")]
    pub display_24h: bool,
    #[packed_field(size_bits = "7")]
    pub hour:        Integer<u8, packed_bits::Bits<7>>,
    pub minute:      u8,
}

impl From<SpaTime> for Wire {
    fn from(t: SpaTime) -> Self {
        Self {
            display_24h: t.display_24h,
            hour:        t.hour.into(),
            minute:      t.minute,
        }
    }
}

impl TryFrom<Wire> for SpaTime {
    type Error = Error;

    fn try_from(w: Wire) -> Result<Self, Self::Error> {
        SpaTime::new(*w.hour, w.minute, w.display_24h)
    }
}
