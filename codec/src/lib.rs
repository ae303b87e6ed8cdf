//! Stream adapters that cut the controller's byte stream into frames and messages.

pub use ::tokio_util::codec as tokio_codec;

mod frame;
mod reading;

pub use self::{
    frame::*,
    reading::*,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Message(#[from] message::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
