use std::{
    str::FromStr,
    sync::Once,
};

use tracing_subscriber::{
    fmt::format::FmtSpan,
    EnvFilter,
};

static INIT: Once = Once::new();

pub fn trace_init() {
    INIT.call_once(|| {
        let level_filter = EnvFilter::from_str("debug").unwrap();

        tracing_subscriber::fmt()
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(level_filter)
            .pretty()
            .init();
    });
}

/// A structurally valid frame body for `ty` and `payload`, checked with the standard CRC.
pub fn frame(ty: [u8; 3], payload: &[u8]) -> Vec<u8> {
    spalink::message::Frame::<spalink::message::StandardCRC>::new(ty.into(), payload)
        .unwrap()
        .encode()
        .to_vec()
}
