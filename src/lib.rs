//! Codec for the serial protocol spoken by Balboa spa controllers.
//!
//! The work happens in [`message`] (frames, checksums, typed messages) and [`codec`] (stream
//! adapters). This crate ties them together for the command-line tools.

pub use codec;
pub use message;
pub use util;

pub mod trace;
