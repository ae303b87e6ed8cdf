use std::{
    io,
    io::Read,
};

use bytes::BytesMut;
use codec::FrameCodec;
use serde_json::json;
use structopt::StructOpt;
use tokio_util::codec::Decoder;

use message::{
    Command,
    Direction,
    Frame,
    FieldValue,
    MessageKind,
    PayloadLayout,
    Reading,
    StandardCRC,
    REGISTRY,
};
use util::{
    bootstrap,
    build,
    trace_catch,
};

#[derive(Debug, Clone, PartialEq, Eq, structopt::StructOpt)]
#[structopt(about = "decode spa controller frames from stdin (default raw binary format)")]
pub struct Options {
    #[structopt(
        long,
        help = "interpret stdin as hex (can be space and/or newline separated, does not strip 0x)"
    )]
    hex: bool,

    #[structopt(long, help = "print every layout field of each frame")]
    fields: bool,

    #[structopt(long, help = "emit one json object per frame")]
    json: bool,

    #[structopt(long, help = "interpret frames as commands sent to the controller")]
    commands: bool,

    #[structopt(long, help = "pretty-print log output")]
    pretty: bool,
}

struct Decoded {
    kind:    Option<MessageKind>,
    summary: Result<String, message::Error>,
}

fn main() -> eyre::Result<()> {
    let opts = Options::from_args();

    bootstrap!("{}", build::describe());
    spalink::trace::init(opts.pretty);

    let result = dump(&opts);
    trace_catch!(result, "dump failed");

    result
}

fn dump(opts: &Options) -> eyre::Result<()> {
    let mut buf = if opts.hex {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;

        BytesMut::from(&hex::decode(s.trim().replace(&[' ', '\t', '\n', '\r'][..], ""))?[..])
    } else {
        let mut buf = vec![];
        io::stdin().read_to_end(&mut buf)?;

        BytesMut::from(&buf[..])
    };

    let mut frames = FrameCodec::<StandardCRC>::new();
    let mut count = 0usize;

    loop {
        let item = match frames.decode(&mut buf)? {
            Some(item) => item,
            None => match frames.decode_eof(&mut buf)? {
                Some(item) => item,
                None => break,
            },
        };

        count += 1;

        match item {
            Ok(frame) => print_frame(opts, &frame),
            Err(e) => print_error(opts, &e),
        }
    }

    tracing::debug!(count, "input exhausted");

    Ok(())
}

fn decode(opts: &Options, frame: &Frame<StandardCRC>) -> Decoded {
    if !opts.commands {
        let result = Reading::from_frame(&REGISTRY, frame);

        return Decoded {
            kind:    result.as_ref().ok().map(Reading::kind),
            summary: result.map(|r| r.display()),
        };
    }

    // a type id shared by several commands is settled by whichever payload decodes
    let mut last_err = None;

    for entry in REGISTRY.candidates(frame.ty()).iter().filter(|e| e.direction == Direction::Command) {
        match Command::decode(entry.kind, frame.payload()) {
            Ok(cmd) => {
                return Decoded {
                    kind:    Some(entry.kind),
                    summary: Ok(format!("{cmd:?}")),
                }
            },
            Err(e) => last_err = Some(e),
        }
    }

    Decoded {
        kind:    None,
        summary: Err(last_err.unwrap_or_else(|| message::Error::UnknownMessageType {
            ty:      frame.ty(),
            payload: frame.payload().into(),
        })),
    }
}

fn layout_for(opts: &Options, frame: &Frame<StandardCRC>, kind: Option<MessageKind>) -> Option<&'static PayloadLayout> {
    let direction = if opts.commands {
        Direction::Command
    } else {
        Direction::Response
    };

    kind.map(MessageKind::layout).or_else(|| REGISTRY.layout(frame.ty(), direction))
}

fn print_frame(opts: &Options, frame: &Frame<StandardCRC>) {
    let decoded = decode(opts, frame);
    let layout = layout_for(opts, frame, decoded.kind);

    if opts.json {
        let fields = layout
            .map(|l| {
                l.read_all(frame.payload())
                    .filter(|(f, _)| !f.is_reserved())
                    .map(|(f, v)| {
                        let value = match v {
                            FieldValue::Uint(x) => json!(x),
                            FieldValue::Bytes(b) => json!(hex::encode(b)),
                        };

                        (f.name.to_owned(), value)
                    })
                    .collect::<serde_json::Map<_, _>>()
            })
            .unwrap_or_default();

        let value = json!({
            "frame": frame.to_string(),
            "type": frame.ty(),
            "kind": decoded.kind,
            "payload": hex::encode(frame.payload()),
            "fields": fields,
            "summary": decoded.summary.as_ref().ok(),
            "error": decoded.summary.as_ref().err().map(ToString::to_string),
        });

        println!("{value}");
        return;
    }

    let kind = decoded.kind.map_or_else(|| "?".to_owned(), |k| format!("{k:?}"));

    match &decoded.summary {
        Ok(summary) => println!("{frame}  {} {kind}\n\t{summary}", frame.ty()),
        Err(e) => println!("{frame}  {} {kind}\n\terror: {e}", frame.ty()),
    }

    if opts.fields {
        if let Some(layout) = layout {
            for (field, value) in layout.read_all(frame.payload()) {
                println!("\t\t{:<20} {value}", field.name);
            }
        }
    }
}

fn print_error(opts: &Options, e: &message::Error) {
    let raw = e.raw().map(|b| b.to_hex());

    if opts.json {
        println!("{}", json!({ "error": e.to_string(), "raw": raw }));
        return;
    }

    match raw {
        Some(raw) => println!("REJECTED {raw}\n\terror: {e}"),
        None => println!("REJECTED\n\terror: {e}"),
    }
}
