use std::{
    fmt::{
        Debug,
        Display,
        Formatter,
    },
    ops::Deref,
};

use bytes::Bytes;
use serde::{
    de::Error as _,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

/// Bytes carried through the codec uninterpreted: raw payloads, reserved regions, rejected
/// frames.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Into, derive_more::AsRef)]
pub struct OpaqueBytes(Bytes);

impl OpaqueBytes {
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl<T> From<T> for OpaqueBytes
where
    T: AsRef<[u8]>,
{
    fn from(t: T) -> Self {
        Self(Bytes::copy_from_slice(t.as_ref()))
    }
}

impl Deref for OpaqueBytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Display for OpaqueBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Debug for OpaqueBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "OpaqueBytes({self})")
    }
}

impl Serialize for OpaqueBytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for OpaqueBytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let v = hex::decode(s.trim()).map_err(D::Error::custom)?;

        Ok(Self(Bytes::from(v)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serde() {
        let b = OpaqueBytes::from([1u8, 2, 3, 0xff]);

        let result = serde_json::to_string(&b).unwrap();
        assert_eq!("\"010203ff\"", result);

        let new: OpaqueBytes = serde_json::from_str(&result).unwrap();
        assert_eq!(b, new);
    }

    #[test]
    fn test_display() {
        let b = OpaqueBytes::from(&[0x0a, 0xbf][..]);

        assert_eq!(b.to_string(), "0x0abf");
        assert_eq!(&*b, &[0x0a, 0xbf]);
    }
}
