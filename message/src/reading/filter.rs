use packed_struct::prelude::*;

use crate::{
    layout::{
        Field,
        PayloadLayout,
    },
    Error,
};

const FIELDS: &[Field] = &[
    Field::byte("filter1_start_hour", 0),
    Field::byte("filter1_start_minute", 1),
    Field::byte("filter1_duration_hours", 2),
    Field::byte("filter1_duration_minutes", 3),
    Field::bits("filter2_enabled", 4, 7, 1),
    Field::bits("filter2_start_hour", 4, 0, 7),
    Field::byte("filter2_start_minute", 5),
    Field::byte("filter2_duration_hours", 6),
    Field::byte("filter2_duration_minutes", 7),
];

/// Filter-cycle schedule: reported by the controller and sent back verbatim to change it.
pub const LAYOUT: PayloadLayout = PayloadLayout::new(8, FIELDS);

#[derive(Debug, Clone, Copy, PartialEq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "8")]
pub struct FilterCycles {
    pub filter1_start_hour:       u8,
    pub filter1_start_minute:     u8,
    pub filter1_duration_hours:   u8,
    pub filter1_duration_minutes: u8,

    #[packed_field(size_bits = "1")]
    pub filter2_enabled:          bool,
    #[packed_field(size_bits = "7")]
    pub filter2_start_hour:       Integer<u8, packed_bits::Bits<7>>,
    pub filter2_start_minute:     u8,
    pub filter2_duration_hours:   u8,
    pub filter2_duration_minutes: u8,
}

/// When a filter cycle starts and how long it runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FilterWindow {
    pub start_hour:       u8,
    pub start_minute:     u8,
    pub duration_hours:   u8,
    pub duration_minutes: u8,
}

impl FilterWindow {
    pub fn new(start_hour: u8, start_minute: u8, duration_hours: u8, duration_minutes: u8) -> Result<Self, Error> {
        for (field, value, max) in [
            ("start_hour", start_hour, 23),
            ("start_minute", start_minute, 59),
            ("duration_hours", duration_hours, 24),
            ("duration_minutes", duration_minutes, 59),
        ] {
            if value > max {
                return Err(Error::OutOfRange {
                    field,
                    value: value as usize,
                    max: max as usize,
                });
            }
        }

        Ok(Self {
            start_hour,
            start_minute,
            duration_hours,
            duration_minutes,
        })
    }
}

impl FilterCycles {
    /// A schedule with filter 1 always on and filter 2 optional. A disabled filter 2 is sent
    /// with a zeroed window.
    pub fn new(filter1: FilterWindow, filter2: Option<FilterWindow>) -> Self {
        let enabled = filter2.is_some();
        let filter2 = filter2.unwrap_or_default();

        Self {
            filter1_start_hour:       filter1.start_hour,
            filter1_start_minute:     filter1.start_minute,
            filter1_duration_hours:   filter1.duration_hours,
            filter1_duration_minutes: filter1.duration_minutes,

            filter2_enabled:          enabled,
            filter2_start_hour:       filter2.start_hour.into(),
            filter2_start_minute:     filter2.start_minute,
            filter2_duration_hours:   filter2.duration_hours,
            filter2_duration_minutes: filter2.duration_minutes,
        }
    }

    pub fn filter1(&self) -> FilterWindow {
        FilterWindow {
            start_hour:       self.filter1_start_hour,
            start_minute:     self.filter1_start_minute,
            duration_hours:   self.filter1_duration_hours,
            duration_minutes: self.filter1_duration_minutes,
        }
    }

    pub fn filter2(&self) -> Option<FilterWindow> {
        self.filter2_enabled.then(|| FilterWindow {
            start_hour:       *self.filter2_start_hour,
            start_minute:     self.filter2_start_minute,
            duration_hours:   self.filter2_duration_hours,
            duration_minutes: self.filter2_duration_minutes,
        })
    }

    pub fn display(&self) -> String {
        let fmt = |w: FilterWindow| {
            format!(
                "{:02}:{:02} for {}h{:02}m",
                w.start_hour, w.start_minute, w.duration_hours, w.duration_minutes
            )
        };

        match self.filter2() {
            Some(f2) => format!("filter 1 {}, filter 2 {}", fmt(self.filter1()), fmt(f2)),
            None => format!("filter 1 {}, filter 2 off", fmt(self.filter1())),
        }
    }
}
