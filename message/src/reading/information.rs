use packed_struct::prelude::*;

use crate::layout::{
    Field,
    PayloadLayout,
};

const FIELDS: &[Field] = &[
    Field::bytes("software_version", 0, 3),
    Field::byte("_r3", 3),
    Field::bytes("model", 4, 8),
    Field::byte("current_setup", 12),
    Field::bytes("signature", 13, 4),
    Field::bytes("_r17", 17, 8),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(25, FIELDS);

/// Controller identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "25")]
pub struct Information {
    #[packed_field(element_size_bytes = "1")]
    pub software_version: [u8; 3],
    #[doc(hidden)]
    pub _r3:              u8,
    /// ASCII, space padded.
    #[packed_field(element_size_bytes = "1")]
    pub model:            [u8; 8],
    pub current_setup:    u8,
    #[packed_field(element_size_bytes = "1")]
    pub signature:        [u8; 4],
    #[doc(hidden)]
    #[packed_field(element_size_bytes = "1")]
    pub _r17:             [u8; 8],
}

impl Information {
    pub fn model_name(&self) -> String {
        String::from_utf8_lossy(&self.model)
            .trim_end_matches(|c: char| c == ' ' || c == '\0')
            .to_owned()
    }

    pub fn version(&self) -> String {
        let [a, b, c] = self.software_version;
        format!("{a}.{b}.{c}")
    }

    pub fn display(&self) -> String {
        format!(
            "{} v{} (setup {}, signature {})",
            self.model_name(),
            self.version(),
            self.current_setup,
            hex::encode(self.signature)
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() -> eyre::Result<()> {
        let mut data = [0u8; 25];
        data[..3].copy_from_slice(&[100, 20, 0]);
        data[4..12].copy_from_slice(b"BFBP20  ");
        data[12] = 4;
        data[13..17].copy_from_slice(&[0x6c, 0x49, 0x6e, 0x2b]);
        data[20] = 0xaa;

        let info = Information::unpack(&data)?;

        assert_eq!(info.model_name(), "BFBP20");
        assert_eq!(info.version(), "100.20.0");
        assert_eq!(info.current_setup, 4);
        assert_eq!(info.display(), "BFBP20 v100.20.0 (setup 4, signature 6c496e2b)");
        assert_eq!(info.pack()?, data);

        Ok(())
    }
}
