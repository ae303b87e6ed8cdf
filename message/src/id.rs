use std::fmt::{
    Debug,
    Display,
    Formatter,
};

use serde::{
    de::Error as _,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

/// The three type bytes following the length field of a frame.
///
/// Transmitted in natural order (`b1 b2 b3`). [`MessageTypeId::packed`] gives the
/// `b1 | b2 << 8 | b3 << 16` form used for comparisons and logging.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageTypeId([u8; 3]);

impl MessageTypeId {
    pub const SIZE: usize = 3;

    #[inline]
    pub const fn new(b1: u8, b2: u8, b3: u8) -> Self {
        Self([b1, b2, b3])
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn bytes(&self) -> [u8; 3] {
        self.0
    }

    #[inline]
    pub const fn packed(&self) -> u32 {
        let [b1, b2, b3] = self.0;

        (b1 as u32) | ((b2 as u32) << 8) | ((b3 as u32) << 16)
    }

    #[inline]
    pub const fn from_packed(val: u32) -> Self {
        Self([val as u8, (val >> 8) as u8, (val >> 16) as u8])
    }
}

impl From<[u8; 3]> for MessageTypeId {
    #[inline]
    fn from(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }
}

impl From<MessageTypeId> for [u8; 3] {
    #[inline]
    fn from(id: MessageTypeId) -> Self {
        id.0
    }
}

impl Display for MessageTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [b1, b2, b3] = self.0;
        write!(f, "{b1:02x} {b2:02x} {b3:02x}")
    }
}

impl Debug for MessageTypeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MessageTypeId({self})")
    }
}

impl Serialize for MessageTypeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for MessageTypeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let mut bytes = [0u8; 3];
        hex::decode_to_slice(s.trim(), &mut bytes).map_err(D::Error::custom)?;

        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn packed_order() {
        let id = MessageTypeId::new(0x0a, 0xbf, 0x11);

        assert_eq!(id.packed(), 0x11bf0a);
        assert_eq!(id.bytes(), [0x0a, 0xbf, 0x11]);
        assert_eq!(id.to_string(), "0a bf 11");
    }

    #[test]
    fn serde() {
        let id = MessageTypeId::new(0xff, 0xaf, 0x13);

        let s = serde_json::to_string(&id).unwrap();
        assert_eq!(s, "\"ffaf13\"");

        let back: MessageTypeId = serde_json::from_str(&s).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn packed_inverse(bytes in any::<[u8; 3]>()) {
            let id = MessageTypeId::from_bytes(bytes);
            prop_assert_eq!(MessageTypeId::from_packed(id.packed()), id);
        }
    }
}
