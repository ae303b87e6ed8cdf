use packed_struct::{
    prelude::*,
    PackingError,
};

use crate::{
    layout::{
        Field,
        PayloadLayout,
    },
    Error,
};

pub const SSID_LEN: usize = 32;
pub const PASSKEY_LEN: usize = 64;

const FIELDS: &[Field] = &[
    Field::byte("config_type", 0),
    Field::byte("ssid_len", 1),
    Field::bytes("ssid", 2, SSID_LEN),
    Field::byte("encryption", 2 + SSID_LEN),
    Field::byte("passkey_len", 3 + SSID_LEN),
    Field::bytes("passkey", 4 + SSID_LEN, PASSKEY_LEN),
];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(4 + SSID_LEN + PASSKEY_LEN, FIELDS);

/// Network credentials for the controller's wifi module. `config_type` and `encryption` are
/// passed through as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WifiSettings {
    pub config_type: u8,
    ssid:            String,
    pub encryption:  u8,
    passkey:         String,
}

impl WifiSettings {
    pub fn new(ssid: impl Into<String>, passkey: impl Into<String>) -> Result<Self, Error> {
        let ssid = ssid.into();
        let passkey = passkey.into();

        check_len("ssid", ssid.len(), SSID_LEN)?;
        check_len("passkey", passkey.len(), PASSKEY_LEN)?;

        Ok(Self {
            config_type: 0,
            ssid,
            encryption: 0,
            passkey,
        })
    }

    #[inline]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    #[inline]
    pub fn passkey(&self) -> &str {
        &self.passkey
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), Error> {
    if len > max {
        return Err(Error::OutOfRange {
            field,
            value: len,
            max,
        });
    }

    Ok(())
}

fn padded<const N: usize>(s: &str) -> [u8; N] {
    let mut out = [0u8; N];
    out[..s.len()].copy_from_slice(s.as_bytes());

    out
}

fn unpadded(field: &'static str, buf: &[u8], len: u8) -> Result<String, Error> {
    check_len(field, len as usize, buf.len())?;

    String::from_utf8(buf[..len as usize].to_vec()).map_err(|_| Error::InvalidPayload {
        kind:   crate::MessageKind::SetWifiSettingsRequest,
        source: PackingError::InvalidValue,
    })
}

#[derive(Clone, Debug, PartialEq, Eq, PackedStruct)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "100")]
pub(super) struct Wire {
    pub config_type: u8,
    pub ssid_len:    u8,
    #[packed_field(element_size_bytes = "1")]
    pub ssid:        [u8; 32],
    pub encryption:  u8,
    pub passkey_len: u8,
    #[packed_field(element_size_bytes = "1")]
    pub passkey:     [u8; 64],
}

impl From<&WifiSettings> for Wire {
    fn from(w: &WifiSettings) -> Self {
        Self {
            config_type: w.config_type,
            ssid_len:    w.ssid.len() as u8,
            ssid:        padded(&w.ssid),
            encryption:  w.encryption,
            passkey_len: w.passkey.len() as u8,
            passkey:     padded(&w.passkey),
        }
    }
}

impl TryFrom<Wire> for WifiSettings {
    type Error = Error;

    fn try_from(w: Wire) -> Result<Self, Self::Error> {
        Ok(Self {
            config_type: w.config_type,
            ssid:        unpadded("ssid", &w.ssid, w.ssid_len)?,
            encryption:  w.encryption,
            passkey:     unpadded("passkey", &w.passkey, w.passkey_len)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layout_size() {
        assert_eq!(LAYOUT.size, 100);
        assert_eq!(LAYOUT.validate(), Ok(()));
    }

    #[test]
    fn encode() -> eyre::Result<()> {
        let mut settings = WifiSettings::new("hottub", "hunter2")?;
        settings.encryption = 2;

        let packed = Wire::from(&settings).pack()?;

        assert_eq!(packed.len(), 100);
        assert_eq!(&packed[..8], &[0x00, 6, b'h', b'o', b't', b't', b'u', b'b']);
        assert!(packed[8..34].iter().all(|&b| b == 0));
        assert_eq!(&packed[34..36], &[2, 7]);
        assert_eq!(&packed[36..43], b"hunter2");
        assert!(packed[43..].iter().all(|&b| b == 0));

        let back = WifiSettings::try_from(Wire::unpack(&packed)?)?;
        assert_eq!(back, settings);

        Ok(())
    }

    #[test]
    fn too_long() {
        let ssid = "x".repeat(SSID_LEN + 1);

        assert_eq!(WifiSettings::new(ssid, ""), Err(Error::OutOfRange {
            field: "ssid",
            value: 33,
            max:   32,
        }));
        assert!(WifiSettings::new("", "y".repeat(PASSKEY_LEN + 1)).is_err());
        assert!(WifiSettings::new("x".repeat(SSID_LEN), "y".repeat(PASSKEY_LEN)).is_ok());
    }

    #[test]
    fn bad_declared_length() -> eyre::Result<()> {
        let mut packed = Wire::from(&WifiSettings::new("a", "b")?).pack()?;
        packed[1] = 40;

        assert!(matches!(
            WifiSettings::try_from(Wire::unpack(&packed)?),
            Err(Error::OutOfRange {
                field: "ssid",
                ..
            })
        ));

        Ok(())
    }
}
