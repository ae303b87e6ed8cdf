//! Static descriptions of payload layouts.
//!
//! Bit positions are counted from the least significant bit of the containing byte, so
//! `Field::bits("flag", 0, 7, 1)` is the top bit of payload byte 0.

use std::{
    fmt::{
        Display,
        Formatter,
    },
    ops::Range,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Byte,
    Bits { shift: u8, width: u8 },
    Bytes { len: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name:   &'static str,
    pub offset: usize,
    pub kind:   FieldKind,
}

impl Field {
    #[inline]
    pub const fn byte(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Byte,
        }
    }

    #[inline]
    pub const fn bits(name: &'static str, offset: usize, shift: u8, width: u8) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Bits {
                shift,
                width,
            },
        }
    }

    #[inline]
    pub const fn bytes(name: &'static str, offset: usize, len: usize) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Bytes {
                len,
            },
        }
    }

    #[inline]
    pub const fn bit_width(&self) -> usize {
        match self.kind {
            FieldKind::Byte => 8,
            FieldKind::Bits {
                width, ..
            } => width as usize,
            FieldKind::Bytes {
                len,
            } => len * 8,
        }
    }

    /// Fields whose meaning is not known are named with a leading underscore.
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Absolute bit span of this field, bit `8 * n` being the LSB of payload byte `n`.
    fn span(&self) -> Range<usize> {
        let start = self.offset * 8
            + match self.kind {
                FieldKind::Bits {
                    shift, ..
                } => shift as usize,
                _ => 0,
            };

        start..start + self.bit_width()
    }

    /// Extract this field from `payload`. `None` if the payload is too short.
    pub fn read<'a>(&self, payload: &'a [u8]) -> Option<FieldValue<'a>> {
        match self.kind {
            FieldKind::Byte => payload.get(self.offset).copied().map(FieldValue::Uint),
            FieldKind::Bits {
                shift,
                width,
            } => {
                let byte = *payload.get(self.offset)?;
                let mask = ((1u16 << width) - 1) as u8;

                Some(FieldValue::Uint((byte >> shift) & mask))
            },
            FieldKind::Bytes {
                len,
            } => payload.get(self.offset..self.offset + len).map(FieldValue::Bytes),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue<'a> {
    Uint(u8),
    Bytes(&'a [u8]),
}

impl Display for FieldValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Uint(v) => write!(f, "{v}"),
            FieldValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("field {field} is not a valid bitfield")]
    BadBitfield { field: &'static str },

    #[error("field {field} extends past the {size}-byte payload")]
    OutOfBounds { field: &'static str, size: usize },

    #[error("field {field} overlaps {other}")]
    Overlap {
        field: &'static str,
        other: &'static str,
    },

    #[error("bit {bit} of payload byte {byte} is not covered by any field")]
    Uncovered { byte: usize, bit: usize },
}

/// Fixed size and field list of one message type's payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PayloadLayout {
    pub size:   usize,
    pub fields: &'static [Field],
}

impl PayloadLayout {
    pub const EMPTY: Self = Self::new(0, &[]);

    #[inline]
    pub const fn new(size: usize, fields: &'static [Field]) -> Self {
        Self {
            size,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check that every field lies within the payload, that no two fields share a bit, and
    /// that every bit belongs to some field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut owners: Vec<Option<&'static str>> = vec![None; self.size * 8];

        for field in self.fields {
            if let FieldKind::Bits {
                shift,
                width,
            } = field.kind
            {
                if width == 0 || shift as usize + width as usize > 8 {
                    return Err(LayoutError::BadBitfield {
                        field: field.name,
                    });
                }
            }

            let span = field.span();
            if span.end > owners.len() {
                return Err(LayoutError::OutOfBounds {
                    field: field.name,
                    size:  self.size,
                });
            }

            for owner in &mut owners[span] {
                if let Some(other) = *owner {
                    return Err(LayoutError::Overlap {
                        field: field.name,
                        other,
                    });
                }

                *owner = Some(field.name);
            }
        }

        match owners.iter().position(Option::is_none) {
            Some(bit) => Err(LayoutError::Uncovered {
                byte: bit / 8,
                bit:  bit % 8,
            }),
            None => Ok(()),
        }
    }

    /// Every field of this layout read out of `payload`, in declaration order. Fields that
    /// don't fit in a short payload are skipped.
    pub fn read_all<'a>(
        &self,
        payload: &'a [u8],
    ) -> impl Iterator<Item = (&'static Field, FieldValue<'a>)> + 'a {
        let fields: &'static [Field] = self.fields;

        fields.iter().filter_map(move |f| f.read(payload).map(|v| (f, v)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_FIELDS: &[Field] = &[
        Field::bits("flag", 0, 7, 1),
        Field::bits("hour", 0, 0, 7),
        Field::byte("minute", 1),
    ];
    const SAMPLE: PayloadLayout = PayloadLayout::new(2, SAMPLE_FIELDS);

    #[test]
    fn read_fields() {
        let payload = [0x8e, 0x1e];

        let values = SAMPLE.read_all(&payload).map(|(f, v)| (f.name, v)).collect::<Vec<_>>();

        assert_eq!(values, vec![
            ("flag", FieldValue::Uint(1)),
            ("hour", FieldValue::Uint(14)),
            ("minute", FieldValue::Uint(30)),
        ]);
    }

    #[test]
    fn read_bytes() {
        let field = Field::bytes("_r", 1, 2);

        assert_eq!(field.read(&[0, 1, 2]), Some(FieldValue::Bytes(&[1, 2])));
        assert_eq!(field.read(&[0, 1]), None);
        assert_eq!(FieldValue::Bytes(&[0xab, 0x01]).to_string(), "0xab01");
    }

    #[test]
    fn validate_ok() {
        assert_eq!(SAMPLE.validate(), Ok(()));
        assert_eq!(PayloadLayout::EMPTY.validate(), Ok(()));
    }

    #[test]
    fn validate_overlap() {
        const FIELDS: &[Field] = &[Field::bits("a", 0, 0, 5), Field::bits("b", 0, 4, 4)];

        assert_eq!(PayloadLayout::new(1, FIELDS).validate(), Err(LayoutError::Overlap {
            field: "b",
            other: "a",
        }));
    }

    #[test]
    fn validate_uncovered() {
        const FIELDS: &[Field] = &[Field::byte("a", 0), Field::bits("b", 1, 0, 7)];

        assert_eq!(PayloadLayout::new(2, FIELDS).validate(), Err(LayoutError::Uncovered {
            byte: 1,
            bit:  7,
        }));
    }

    #[test]
    fn validate_bounds() {
        const WIDE: &[Field] = &[Field::bytes("a", 0, 3)];
        assert_eq!(PayloadLayout::new(2, WIDE).validate(), Err(LayoutError::OutOfBounds {
            field: "a",
            size:  2,
        }));

        const BAD_BITS: &[Field] = &[Field::bits("a", 0, 6, 3)];
        assert_eq!(PayloadLayout::new(1, BAD_BITS).validate(), Err(LayoutError::BadBitfield {
            field: "a",
        }));
    }
}
