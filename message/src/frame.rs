//! Frame layout:
//!
//! ```text
//! 0x7e | length | type (3) | payload (N) | checksum | 0x7e
//! ```
//!
//! `length` counts itself, the type, the payload and the checksum (`N + 5`, i.e. the frame
//! size minus the two delimiters). The checksum covers `length` through the end of the
//! payload.

use std::{
    fmt::{
        Debug,
        Display,
        Formatter,
    },
    marker::PhantomData,
};

use bytes::{
    BufMut,
    Bytes,
    BytesMut,
};

use crate::{
    Checksum,
    Error,
    FramingError,
    MessageTypeId,
    OpaqueBytes,
    StandardCRC,
};

/// Prefix and suffix byte.
pub const DELIMITER: u8 = 0x7e;

/// Bytes in a frame besides the payload.
pub const OVERHEAD: usize = 7;

pub const MIN_FRAME_LEN: usize = OVERHEAD;

/// Largest payload whose length still fits the one-byte length field.
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - (OVERHEAD - 2);

const TYPE_OFFSET: usize = 2;
const PAYLOAD_OFFSET: usize = TYPE_OFFSET + MessageTypeId::SIZE;

/// A message type and its raw payload, framed and checked with `CRC`.
pub struct Frame<CRC = StandardCRC> {
    ty:       MessageTypeId,
    payload:  OpaqueBytes,
    _phantom: PhantomData<CRC>,
}

impl<CRC> Frame<CRC> {
    pub fn new(ty: MessageTypeId, payload: impl Into<OpaqueBytes>) -> Result<Self, Error> {
        let payload = payload.into();

        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        Ok(Self {
            ty,
            payload,
            _phantom: PhantomData,
        })
    }

    #[inline]
    pub fn ty(&self) -> MessageTypeId {
        self.ty
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        self.payload.as_slice()
    }

    #[inline]
    pub fn into_parts(self) -> (MessageTypeId, OpaqueBytes) {
        (self.ty, self.payload)
    }

    /// Size of the encoded frame in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.payload.len() + OVERHEAD
    }

    #[inline]
    fn length_field(&self) -> u8 {
        (self.len() - 2) as u8
    }
}

impl<CRC> Frame<CRC>
where
    CRC: Checksum,
{
    pub fn checksum(&self) -> u8 {
        let mut body = Vec::with_capacity(self.len() - 3);

        body.push(self.length_field());
        body.extend_from_slice(&self.ty.bytes());
        body.extend_from_slice(self.payload());

        CRC::compute(&body)
    }

    pub fn encode(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.len());
        self.encode_into(&mut out);

        out.freeze()
    }

    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(self.len());

        let start = dst.len();

        dst.put_u8(DELIMITER);
        dst.put_u8(self.length_field());
        dst.put_slice(&self.ty.bytes());
        dst.put_slice(self.payload());

        let checksum = CRC::compute(&dst[start + 1..]);

        dst.put_u8(checksum);
        dst.put_u8(DELIMITER);
    }

    /// Validate and split one complete frame. The payload is not interpreted.
    pub fn decode(raw: &[u8]) -> Result<Self, Error> {
        if raw.len() < MIN_FRAME_LEN {
            return Err(FramingError::TooShort {
                len: raw.len(),
            }
            .into());
        }

        let last = raw.len() - 1;

        if raw[0] != DELIMITER {
            return Err(FramingError::Prefix(raw[0]).into());
        }

        if raw[last] != DELIMITER {
            return Err(FramingError::Suffix(raw[last]).into());
        }

        let declared = raw[1];
        if raw.len() != declared as usize + 2 {
            return Err(FramingError::Length {
                declared,
                actual: raw.len(),
            }
            .into());
        }

        let checksum_at = last - 1;
        let body = &raw[1..checksum_at];
        let received = raw[checksum_at];

        if !CRC::verify(body, received) {
            let computed = CRC::compute(body);

            tracing::debug!(
                received = %format_args!("{received:02x}"),
                computed = %format_args!("{computed:02x}"),
                frame = %hex::encode(raw),
                "frame failed checksum"
            );

            return Err(Error::Checksum {
                received,
                computed,
                frame: raw.into(),
            });
        }

        let ty = MessageTypeId::new(raw[TYPE_OFFSET], raw[TYPE_OFFSET + 1], raw[TYPE_OFFSET + 2]);

        Ok(Self {
            ty,
            payload: raw[PAYLOAD_OFFSET..checksum_at].into(),
            _phantom: PhantomData,
        })
    }
}

impl<CRC> Clone for Frame<CRC> {
    fn clone(&self) -> Self {
        Self {
            ty:       self.ty,
            payload:  self.payload.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<CRC, D> PartialEq<Frame<D>> for Frame<CRC> {
    fn eq(&self, other: &Frame<D>) -> bool {
        self.ty == other.ty && self.payload == other.payload
    }
}

impl<CRC> Eq for Frame<CRC> {}

impl<CRC> Debug for Frame<CRC>
where
    CRC: Checksum,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({}, {}, crc 0x{:02x})", self.ty, self.payload, self.checksum())
    }
}

impl<CRC> Display for Frame<CRC>
where
    CRC: Checksum,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.encode()))
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        BalboaCrc,
        MaximCrc,
    };

    fn frame(ty: [u8; 3], payload: &[u8]) -> Frame {
        Frame::new(ty.into(), payload).unwrap()
    }

    #[test]
    fn encode_toggle_pump1() {
        let encoded = frame([0x0a, 0xbf, 0x11], &[0x04, 0x00]).encode();

        assert_eq!(&encoded[..], &[0x7e, 0x07, 0x0a, 0xbf, 0x11, 0x04, 0x00, 0x85, 0x7e]);
        assert_eq!(encoded[7], BalboaCrc::compute(&encoded[1..7]));
    }

    #[test]
    fn encode_empty_payload() {
        let encoded = frame([0x0a, 0xbf, 0x04], &[]).encode();
        assert_eq!(&encoded[..], &[0x7e, 0x05, 0x0a, 0xbf, 0x04, 0x77, 0x7e]);
    }

    #[test]
    fn encode_with_maxim() {
        let f = Frame::<MaximCrc>::new(MessageTypeId::new(0x0a, 0xbf, 0x11), [0x04u8, 0x00]).unwrap();
        assert_eq!(&f.encode()[..], &[0x7e, 0x07, 0x0a, 0xbf, 0x11, 0x04, 0x00, 0xe9, 0x7e]);
    }

    #[test]
    fn decode_captured() -> eyre::Result<()> {
        let f = Frame::<BalboaCrc>::decode(&[0x7e, 0x05, 0x10, 0xbf, 0x06, 0x5c, 0x7e])?;

        assert_eq!(f.ty(), MessageTypeId::new(0x10, 0xbf, 0x06));
        assert!(f.payload().is_empty());

        Ok(())
    }

    #[test]
    fn decode_too_short() {
        for len in 0..MIN_FRAME_LEN {
            let raw = vec![DELIMITER; len];

            assert_eq!(
                Frame::<BalboaCrc>::decode(&raw),
                Err(FramingError::TooShort {
                    len,
                }
                .into())
            );
        }
    }

    #[test]
    fn decode_bad_delimiters() {
        let good = frame([0x0a, 0xbf, 0x11], &[0x04, 0x00]).encode().to_vec();

        let mut bad_prefix = good.clone();
        bad_prefix[0] = 0x7f;
        assert_eq!(Frame::<BalboaCrc>::decode(&bad_prefix), Err(FramingError::Prefix(0x7f).into()));

        let mut bad_suffix = good;
        *bad_suffix.last_mut().unwrap() = 0x00;
        assert_eq!(Frame::<BalboaCrc>::decode(&bad_suffix), Err(FramingError::Suffix(0x00).into()));
    }

    #[test]
    fn decode_length_mismatch() {
        let raw = [0x7e, 0x08, 0x0a, 0xbf, 0x11, 0x04, 0x00, 0x85, 0x7e];

        assert_eq!(
            Frame::<BalboaCrc>::decode(&raw),
            Err(FramingError::Length {
                declared: 8,
                actual:   9,
            }
            .into())
        );
    }

    #[test]
    fn decode_checksum_keeps_frame() {
        let raw = [0x7e, 0x07, 0x0a, 0xbf, 0x11, 0x04, 0x00, 0x86, 0x7e];

        match Frame::<BalboaCrc>::decode(&raw) {
            Err(Error::Checksum {
                received,
                computed,
                frame,
            }) => {
                assert_eq!(received, 0x86);
                assert_eq!(computed, 0x85);
                assert_eq!(frame.as_slice(), &raw[..]);
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn payload_too_large() {
        let payload = vec![0u8; MAX_PAYLOAD_LEN + 1];

        assert!(matches!(
            Frame::<BalboaCrc>::new(MessageTypeId::new(0, 0, 0), payload),
            Err(Error::PayloadTooLarge { .. })
        ));

        let f = frame([0, 0, 0], &[0u8; MAX_PAYLOAD_LEN]);
        assert_eq!(f.encode()[1], u8::MAX);
    }

    proptest! {
        #[test]
        fn round_trip(ty in any::<[u8; 3]>(), payload in prop::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_LEN)) {
            let f = frame(ty, &payload);
            let encoded = f.encode();

            prop_assert_eq!(encoded.len(), payload.len() + OVERHEAD);
            prop_assert_eq!(encoded[1] as usize, encoded.len() - 2);

            let decoded = Frame::<BalboaCrc>::decode(&encoded).unwrap();
            prop_assert_eq!(decoded.ty(), MessageTypeId::from(ty));
            prop_assert_eq!(decoded.payload(), &payload[..]);
        }

        #[test]
        fn corruption_detected(ty in any::<[u8; 3]>(), payload in prop::collection::vec(any::<u8>(), 0..32), bit in any::<prop::sample::Index>()) {
            let encoded = frame(ty, &payload).encode().to_vec();

            // skip the delimiters
            let inner = (encoded.len() - 2) * 8;
            let bit = bit.index(inner) + 8;

            let mut corrupted = encoded;
            corrupted[bit / 8] ^= 1 << (bit % 8);

            match Frame::<BalboaCrc>::decode(&corrupted) {
                Err(Error::Checksum { .. }) | Err(Error::Framing(_)) => {},
                other => prop_assert!(false, "corruption not detected: {:?}", other),
            }
        }
    }
}
