//! The periodic status broadcast.
//!
//! Only some bits are understood. The rest are kept in `_r*` fields so that packing a decoded
//! status reproduces the original payload.

use packed_struct::prelude::*;

use crate::{
    command::SpaTime,
    layout::{
        Field,
        PayloadLayout,
    },
};

const FIELDS: &[Field] = &[
    Field::byte("_r0", 0),
    Field::bits("_r1", 1, 1, 7),
    Field::bits("priming", 1, 0, 1),
    Field::byte("current_temp", 2),
    Field::byte("hour", 3),
    Field::byte("minute", 4),
    Field::bits("_r5", 5, 2, 6),
    Field::bits("heating_mode", 5, 0, 2),
    Field::bits("_r6", 6, 4, 4),
    Field::bits("panel_message", 6, 0, 4),
    Field::byte("_r7", 7),
    Field::byte("hold_time", 8),
    Field::bits("_r9", 9, 4, 4),
    Field::bits("filter2_running", 9, 3, 1),
    Field::bits("filter1_running", 9, 2, 1),
    Field::bits("clock_24h", 9, 1, 1),
    Field::bits("celsius", 9, 0, 1),
    Field::bits("_r10a", 10, 6, 2),
    Field::bits("heating_state", 10, 4, 2),
    Field::bits("_r10b", 10, 3, 1),
    Field::bits("temp_range", 10, 2, 1),
    Field::bits("_r10c", 10, 0, 2),
    Field::bits("_r11", 11, 4, 4),
    Field::bits("pump2", 11, 2, 2),
    Field::bits("pump1", 11, 0, 2),
    Field::byte("_r12", 12),
    Field::bits("_r13a", 13, 2, 6),
    Field::bits("circulation_pump", 13, 1, 1),
    Field::bits("_r13b", 13, 0, 1),
    Field::bits("_r14", 14, 2, 6),
    Field::bits("light", 14, 0, 2),
    Field::bytes("_r15", 15, 3),
    Field::bits("_r18a", 18, 2, 6),
    Field::bits("time_unset", 18, 1, 1),
    Field::bits("_r18b", 18, 0, 1),
    Field::byte("_r19", 19),
    Field::byte("set_temp", 20),
    Field::bits("_r21a", 21, 3, 5),
    Field::bits("system_hold", 21, 2, 1),
    Field::bits("_r21b", 21, 0, 2),
    Field::bytes("_r22", 22, 2),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(24, FIELDS);

/// Reported in place of the water temperature until the controller has a reading.
pub const UNKNOWN_TEMP: u8 = 0xff;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8)]
#[repr(u8)]
pub enum HeatingMode {
    Ready       = 0,
    Rest        = 1,
    ReadyInRest = 2,
    Unknown     = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8)]
#[repr(u8)]
pub enum HeatingState {
    Off     = 0,
    Heating = 1,
    Waiting = 2,
    Unknown = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8)]
#[repr(u8)]
pub enum PumpState {
    Off     = 0,
    Low     = 1,
    High    = 2,
    Unknown = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PrimitiveEnum_u8)]
#[repr(u8)]
pub enum TempRange {
    Low  = 0,
    High = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "24")]
pub struct Status {
    #[doc(hidden)]
    pub _r0: u8,

    #[doc(hidden)]
    #[packed_field(size_bits = "7")]
    pub _r1:     Integer<u8, packed_bits::Bits<7>>,
    #[packed_field(size_bits = "1")]
    pub priming: bool,

    pub current_temp: u8,
    pub hour:         u8,
    pub minute:       u8,

    #[doc(hidden)]
    #[packed_field(size_bits = "6")]
    pub _r5:          Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(size_bits = "2", ty = "enum")]
    pub heating_mode: HeatingMode,

    #[doc(hidden)]
    #[packed_field(size_bits = "4")]
    pub _r6:           Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(size_bits = "4")]
    pub panel_message: Integer<u8, packed_bits::Bits<4>>,

    #[doc(hidden)]
    pub _r7:       u8,
    /// Minutes left in hold mode, if `system_hold` is set.
    pub hold_time: u8,

    #[doc(hidden)]
    #[packed_field(size_bits = "4")]
    pub _r9:             Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(size_bits = "1")]
    pub filter2_running: bool,
    #[packed_field(size_bits = "1")]
    pub filter1_running: bool,
    #[packed_field(size_bits = "1")]
    pub clock_24h:       bool,
    #[packed_field(size_bits = "1")]
    pub celsius:         bool,

    #[doc(hidden)]
    #[packed_field(size_bits = "2")]
    pub _r10a:         Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(size_bits = "2", ty = "enum")]
    pub heating_state: HeatingState,
    #[doc(hidden)]
    #[packed_field(size_bits = "1")]
    pub _r10b:         bool,
    #[packed_field(size_bits = "1", ty = "enum")]
    pub temp_range:    TempRange,
    #[doc(hidden)]
    #[packed_field(size_bits = "2")]
    pub _r10c:         Integer<u8, packed_bits::Bits<2>>,

    #[doc(hidden)]
    #[packed_field(size_bits = "4")]
    pub _r11:  Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(size_bits = "2", ty = "enum")]
    pub pump2: PumpState,
    #[packed_field(size_bits = "2", ty = "enum")]
    pub pump1: PumpState,

    #[doc(hidden)]
    pub _r12: u8,

    #[doc(hidden)]
    #[packed_field(size_bits = "6")]
    pub _r13a:            Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(size_bits = "1")]
    pub circulation_pump: bool,
    #[doc(hidden)]
    #[packed_field(size_bits = "1")]
    pub _r13b:            bool,

    #[doc(hidden)]
    #[packed_field(size_bits = "6")]
    pub _r14:  Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(size_bits = "2")]
    pub light: Integer<u8, packed_bits::Bits<2>>,

    #[doc(hidden)]
    #[packed_field(element_size_bytes = "1")]
    pub _r15: [u8; 3],

    #[doc(hidden)]
    #[packed_field(size_bits = "6")]
    pub _r18a:      Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(size_bits = "1")]
    pub time_unset: bool,
    #[doc(hidden)]
    #[packed_field(size_bits = "1")]
    pub _r18b:      bool,

    #[doc(hidden)]
    pub _r19:     u8,
    pub set_temp: u8,

    #[doc(hidden)]
    #[packed_field(size_bits = "5")]
    pub _r21a:       Integer<u8, packed_bits::Bits<5>>,
    #[packed_field(size_bits = "1")]
    pub system_hold: bool,
    #[doc(hidden)]
    #[packed_field(size_bits = "2")]
    pub _r21b:       Integer<u8, packed_bits::Bits<2>>,

    #[doc(hidden)]
    #[packed_field(element_size_bytes = "1")]
    pub _r22: [u8; 2],
}

impl Status {
    #[inline]
    pub fn current_temp(&self) -> Option<u8> {
        (self.current_temp != UNKNOWN_TEMP).then(|| self.current_temp)
    }

    /// The controller clock, unless it has never been set.
    pub fn time(&self) -> Option<SpaTime> {
        if self.time_unset {
            return None;
        }

        SpaTime::new(self.hour, self.minute, self.clock_24h).ok()
    }

    #[inline]
    pub fn lights_on(&self) -> bool {
        *self.light != 0
    }

    #[inline]
    pub fn panel_message(&self) -> u8 {
        *self.panel_message
    }

    pub fn display(&self) -> String {
        let unit = if self.celsius { "C" } else { "F" };

        let temp = match self.current_temp() {
            Some(t) => t.to_string(),
            None => "--".to_owned(),
        };

        let clock = match self.time() {
            Some(t) => format!("{:02}:{:02}", t.hour(), t.minute()),
            None => "--:--".to_owned(),
        };

        format!(
            "{clock} temp {temp}{unit} (set {}{unit}, {:?} range) {:?}/{:?} pumps {:?}/{:?}{}{}",
            self.set_temp,
            self.temp_range,
            self.heating_mode,
            self.heating_state,
            self.pump1,
            self.pump2,
            self.lights_on().then(|| " lights").unwrap_or(""),
            self.circulation_pump.then(|| " circ").unwrap_or(""),
        )
    }
}
