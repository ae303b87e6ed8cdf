use packed_struct::prelude::*;

use crate::layout::{
    Field,
    PayloadLayout,
};

const FIELDS: &[Field] = &[
    Field::byte("entry_count", 0),
    Field::byte("entry", 1),
    Field::byte("code", 2),
    Field::byte("days_ago", 3),
    Field::byte("hour", 4),
    Field::byte("minute", 5),
    Field::byte("_r6", 6),
    Field::byte("set_temp", 7),
    Field::byte("sensor_a", 8),
    Field::byte("sensor_b", 9),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(10, FIELDS);

/// One entry of the controller's fault history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PackedStruct, serde::Serialize)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "10")]
pub struct FaultLog {
    pub entry_count: u8,
    pub entry:       u8,
    pub code:        u8,
    pub days_ago:    u8,
    pub hour:        u8,
    pub minute:      u8,
    #[doc(hidden)]
    #[serde(skip)]
    pub _r6:         u8,
    pub set_temp:    u8,
    pub sensor_a:    u8,
    pub sensor_b:    u8,
}

impl FaultLog {
    pub fn display(&self) -> String {
        format!(
            "fault {} ({}/{}) {} days ago at {:02}:{:02}, set {} sensors {}/{}",
            self.code,
            self.entry + 1,
            self.entry_count,
            self.days_ago,
            self.hour,
            self.minute,
            self.set_temp,
            self.sensor_a,
            self.sensor_b,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() -> eyre::Result<()> {
        let data = [0x18, 0x03, 0x10, 0x02, 0x0d, 0x2a, 0x00, 0x66, 0x63, 0x64];
        let log = FaultLog::unpack(&data)?;

        assert_eq!(log.entry_count, 24);
        assert_eq!(log.code, 0x10);
        assert_eq!(log.display(), "fault 16 (4/24) 2 days ago at 13:42, set 102 sensors 99/100");
        assert_eq!(log.pack()?, data);

        Ok(())
    }
}
