use std::marker::PhantomData;

use bytes::{
    Buf,
    BytesMut,
};
use message::{
    frame::DELIMITER,
    Checksum,
    Frame,
    FramingError,
    StandardCRC,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::Error;

/// Cuts [`Frame`]s out of a byte stream.
///
/// Bytes before a prefix are dropped. A frame that fails to parse is yielded as an `Err`
/// item and the stream continues: after a structural failure decoding resumes one byte
/// later, after a checksum failure it resumes after the rejected frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCodec<CRC = StandardCRC> {
    _phantom: PhantomData<CRC>,
}

impl<CRC> FrameCodec<CRC> {
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<CRC> Default for FrameCodec<CRC> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Size of a frame whose length byte is the delimiter.
const DELIMITED_LEN: usize = DELIMITER as usize + 2;

impl<CRC> FrameCodec<CRC>
where
    CRC: Checksum,
{
    /// Whether `buf` starts with a complete frame that passes validation.
    fn valid_at(buf: &[u8]) -> bool {
        match buf.get(1) {
            Some(&len) => {
                let total = len as usize + 2;
                buf.len() >= total && Frame::<CRC>::decode(&buf[..total]).is_ok()
            },
            None => false,
        }
    }
}

impl<CRC> Decoder for FrameCodec<CRC>
where
    CRC: Checksum,
{
    type Error = Error;
    type Item = Result<Frame<CRC>, message::Error>;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match src.iter().position(|&b| b == DELIMITER) {
                Some(0) => {},
                Some(n) => {
                    tracing::debug!(bytes = %hex::encode(&src[..n]), "discarding bytes before frame prefix");
                    src.advance(n);
                },
                None => {
                    if !src.is_empty() {
                        tracing::debug!(bytes = %hex::encode(&src[..]), "discarding bytes before frame prefix");
                        src.clear();
                    }

                    return Ok(None);
                },
            }

            if src.len() < 2 {
                return Ok(None);
            }

            // `7e 7e` is either one frame's suffix followed by the next prefix, or the start of
            // a frame whose length byte is 0x7e
            if src[1] == DELIMITER && !Self::valid_at(src) {
                if Self::valid_at(&src[1..]) || src.len() >= DELIMITED_LEN {
                    src.advance(1);
                    continue;
                }

                return Ok(None);
            }

            let total = src[1] as usize + 2;
            if src.len() < total {
                src.reserve(total - src.len());
                return Ok(None);
            }

            return match Frame::<CRC>::decode(&src[..total]) {
                Ok(frame) => {
                    src.advance(total);
                    Ok(Some(Ok(frame)))
                },
                Err(e @ message::Error::Checksum {
                    ..
                }) => {
                    tracing::warn!(error = %e, "rejected frame");
                    src.advance(total);
                    Ok(Some(Err(e)))
                },
                Err(e) => {
                    tracing::warn!(error = %e, "rejected frame, resynchronizing");
                    src.advance(1);
                    Ok(Some(Err(e)))
                },
            };
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if let result @ Some(_) = self.decode(buf)? {
                return Ok(result);
            }

            if buf.is_empty() {
                return Ok(None);
            }

            // no more input can complete a frame of length 0x7e
            if buf.len() >= 2 && buf[1] == DELIMITER {
                buf.advance(1);
                continue;
            }

            break;
        }

        let rest = buf.split();
        tracing::debug!(bytes = %hex::encode(&rest), "stream ended inside a frame");

        Ok(Some(Err(FramingError::TooShort {
            len: rest.len(),
        }
        .into())))
    }
}

impl<CRC> Encoder<Frame<CRC>> for FrameCodec<CRC>
where
    CRC: Checksum,
{
    type Error = Error;

    fn encode(&mut self, item: Frame<CRC>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode_into(dst);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use futures::prelude::*;
    use message::{
        BalboaCrc,
        MessageTypeId,
    };
    use proptest::prelude::*;
    use tokio_util::codec::FramedRead;

    use super::*;

    const READY_TO_SEND: &[u8] = &[0x7e, 0x05, 0x10, 0xbf, 0x06, 0x5c, 0x7e];
    const CONFIG_REQUEST: &[u8] = &[0x7e, 0x05, 0x0a, 0xbf, 0x04, 0x77, 0x7e];
    const PUMP1: &[u8] = &[0x7e, 0x07, 0x0a, 0xbf, 0x11, 0x04, 0x00, 0x85, 0x7e];

    type Item = Result<Frame<BalboaCrc>, message::Error>;

    async fn decode_all(src: &[u8]) -> eyre::Result<Vec<Item>> {
        let items = FramedRead::new(src, FrameCodec::<BalboaCrc>::new())
            .map_err(eyre::Report::from)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(items)
    }

    fn ids(items: &[Item]) -> Vec<Option<[u8; 3]>> {
        items.iter().map(|r| r.as_ref().ok().map(|f| f.ty().bytes())).collect()
    }

    #[tokio::test]
    async fn consecutive_frames() -> eyre::Result<()> {
        let src = [READY_TO_SEND, PUMP1, CONFIG_REQUEST].concat();
        let items = decode_all(&src).await?;

        assert_eq!(ids(&items), vec![
            Some([0x10, 0xbf, 0x06]),
            Some([0x0a, 0xbf, 0x11]),
            Some([0x0a, 0xbf, 0x04]),
        ]);
        assert_eq!(items[1].as_ref().unwrap().payload(), &[0x04, 0x00]);

        Ok(())
    }

    #[tokio::test]
    async fn leading_garbage_skipped() -> eyre::Result<()> {
        let src = [&[0x01, 0x02, 0xff][..], READY_TO_SEND].concat();
        let items = decode_all(&src).await?;

        assert_eq!(ids(&items), vec![Some([0x10, 0xbf, 0x06])]);

        Ok(())
    }

    #[tokio::test]
    async fn doubled_delimiter() -> eyre::Result<()> {
        // starting mid-stream on the previous frame's suffix
        let src = [&[0x7e][..], PUMP1].concat();
        let items = decode_all(&src).await?;

        assert_eq!(ids(&items), vec![Some([0x0a, 0xbf, 0x11])]);

        Ok(())
    }

    #[tokio::test]
    async fn length_byte_equal_to_delimiter() -> eyre::Result<()> {
        let frame = Frame::<BalboaCrc>::new(MessageTypeId::new(0x0a, 0xbf, 0x99), [0x11u8; 121])?;
        let encoded = frame.encode();
        assert_eq!(encoded[1], DELIMITER);

        let src = [&encoded[..], READY_TO_SEND, &[0x7e][..], &encoded[..]].concat();
        let items = decode_all(&src).await?;

        assert_eq!(ids(&items), vec![
            Some([0x0a, 0xbf, 0x99]),
            Some([0x10, 0xbf, 0x06]),
            Some([0x0a, 0xbf, 0x99]),
        ]);
        assert_eq!(items[0].as_ref().unwrap(), &frame);

        Ok(())
    }

    #[tokio::test]
    async fn doubled_delimiter_before_bad_checksum() -> eyre::Result<()> {
        let mut bad = CONFIG_REQUEST.to_vec();
        bad[5] ^= 0xff;

        let src = [&[0x7e][..], &bad[..]].concat();
        let items = decode_all(&src).await?;

        assert_eq!(items.len(), 1);
        assert!(matches!(&items[0], Err(message::Error::Checksum { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn checksum_failure_consumes_frame() -> eyre::Result<()> {
        let mut bad = PUMP1.to_vec();
        bad[7] ^= 0xff;

        let src = [&bad[..], READY_TO_SEND].concat();
        let items = decode_all(&src).await?;

        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Err(message::Error::Checksum { frame, .. }) if frame.as_slice() == &bad[..]));
        assert_eq!(ids(&items[1..]), vec![Some([0x10, 0xbf, 0x06])]);

        Ok(())
    }

    #[tokio::test]
    async fn framing_failure_resyncs() -> eyre::Result<()> {
        let mut bad = PUMP1.to_vec();
        *bad.last_mut().unwrap() = 0x00;

        let src = [&bad[..], CONFIG_REQUEST].concat();
        let items = decode_all(&src).await?;

        assert_eq!(
            items.first(),
            Some(&Err(message::Error::Framing(FramingError::Suffix(0x00))))
        );
        assert_eq!(ids(&items).last(), Some(&Some([0x0a, 0xbf, 0x04])));
        assert_eq!(items.iter().filter(|i| i.is_ok()).count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn truncated_tail() -> eyre::Result<()> {
        let src = [READY_TO_SEND, &PUMP1[..5]].concat();
        let items = decode_all(&src).await?;

        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Err(FramingError::TooShort {
            len: 5
        }
        .into()));

        Ok(())
    }

    #[test]
    fn encode() -> eyre::Result<()> {
        let frame = Frame::<BalboaCrc>::new(MessageTypeId::new(0x0a, 0xbf, 0x11), [0x04u8, 0x00])?;

        let mut dst = BytesMut::new();
        let mut codec = FrameCodec::<BalboaCrc>::new();
        codec.encode(frame.clone(), &mut dst)?;
        codec.encode(frame, &mut dst)?;

        assert_eq!(&dst[..], &[PUMP1, PUMP1].concat()[..]);

        Ok(())
    }

    proptest! {
        #[test]
        fn chunked_input(
            frames in prop::collection::vec((any::<[u8; 3]>(), prop::collection::vec(any::<u8>(), 0..130)), 1..6),
            chunk in 1..16usize,
        ) {
            let frames = frames
                .into_iter()
                .map(|(ty, payload)| Frame::<BalboaCrc>::new(ty.into(), payload).unwrap())
                .collect::<Vec<_>>();

            let stream = frames.iter().flat_map(|f| f.encode()).collect::<Vec<u8>>();

            let mut codec = FrameCodec::<BalboaCrc>::new();
            let mut buf = BytesMut::new();
            let mut out = vec![];

            for piece in stream.chunks(chunk) {
                buf.extend_from_slice(piece);

                while let Some(item) = codec.decode(&mut buf).unwrap() {
                    out.push(item.unwrap());
                }
            }

            prop_assert!(codec.decode_eof(&mut buf).unwrap().is_none());
            prop_assert_eq!(out, frames);
        }
    }
}
