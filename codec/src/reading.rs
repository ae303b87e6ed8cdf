use bytes::BytesMut;
use message::{
    Checksum,
    Command,
    Reading,
    Registry,
    StandardCRC,
    REGISTRY,
};
use tokio_util::codec::{
    Decoder,
    Encoder,
};

use crate::{
    Error,
    FrameCodec,
};

/// Decodes a byte stream from the controller into [`Reading`]s and encodes [`Command`]s for it.
#[derive(Debug, Clone, Copy)]
pub struct MessageCodec<CRC = StandardCRC> {
    frames:   FrameCodec<CRC>,
    registry: &'static Registry,
}

impl<CRC> MessageCodec<CRC> {
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(&REGISTRY)
    }

    #[inline]
    pub fn with_registry(registry: &'static Registry) -> Self {
        Self {
            frames: FrameCodec::new(),
            registry,
        }
    }
}

impl<CRC> Default for MessageCodec<CRC> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<CRC> MessageCodec<CRC>
where
    CRC: Checksum,
{
    fn resolve(
        &self,
        item: Option<Result<message::Frame<CRC>, message::Error>>,
    ) -> Option<Result<Reading, message::Error>> {
        let result = item?.and_then(|frame| Reading::from_frame(self.registry, &frame));

        if let Err(ref e) = result {
            tracing::debug!(error = %e, "undecodable message");
        }

        Some(result)
    }
}

impl<CRC> Decoder for MessageCodec<CRC>
where
    CRC: Checksum,
{
    type Error = Error;
    type Item = Result<Reading, message::Error>;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let item = self.frames.decode(src)?;
        Ok(self.resolve(item))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let item = self.frames.decode_eof(buf)?;
        Ok(self.resolve(item))
    }
}

impl<CRC> Encoder<Command> for MessageCodec<CRC>
where
    CRC: Checksum,
{
    type Error = Error;

    fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = item.frame::<CRC>()?;
        self.frames.encode(frame, dst)
    }
}
