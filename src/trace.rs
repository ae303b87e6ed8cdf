use std::str::FromStr;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    prelude::*,
    EnvFilter,
};

use util::bootstrap;

/// Install the stderr subscriber. `RUST_LOG` overrides the default filter.
pub fn init(pretty: bool) {
    let level_filter = mk_level_filter();
    bootstrap!("enabling tracing with filter directive: {}", level_filter);

    let stderr_layer =
        tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false);

    let registry = tracing_subscriber::registry();

    if pretty {
        registry.with(stderr_layer.pretty().with_filter(level_filter)).init();
    } else {
        registry
            .with(
                stderr_layer
                    .with_line_number(false)
                    .with_timer(())
                    .with_span_events(FmtSpan::NONE)
                    .with_filter(level_filter),
            )
            .init();
    }
}

fn mk_level_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_str = {
            cfg_if::cfg_if! {
                if #[cfg(not(debug_assertions))] {
                    "warn,spalink=info,spadump=info,spamsgs=info,spalink_codec=info,spalink_message=info,spalink_util=info"
                } else {
                    "info,spalink=debug,spadump=debug,spamsgs=debug,spalink_codec=debug,spalink_message=debug,spalink_util=debug"
                }
            }
        };

        EnvFilter::from_str(default_str).expect("parsing envfilter default string")
    })
}
