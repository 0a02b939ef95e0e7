//! Diagnostic output.
//!
//! In `Stdio` mode stdout belongs to the protocol, so every event is written
//! to stderr as a JSON-RPC notification line. `Plain` mode is for running the
//! server by hand.

use std::fmt;
use std::io::Write;

use serde_json::json;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{self, FormatEvent, FormatFields},
        writer::MakeWriterExt,
        FmtContext, MakeWriter,
    },
    prelude::*,
    registry::LookupSpan,
    EnvFilter,
};

/// JSON-RPC error code used for fatal process-level failures.
pub const FATAL_CODE: i32 = -32603;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Human-readable lines; errors on stderr, the rest on stdout.
    Plain,
    /// JSON-RPC wrapped lines, all on stderr.
    Stdio,
}

impl LogMode {
    pub fn from_stdio_flag(stdio: bool) -> Self {
        if stdio { LogMode::Stdio } else { LogMode::Plain }
    }
}

/// JSON-RPC method a level is reported under.
pub fn method_for(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::DEBUG | Level::TRACE => "debug",
        _ => "log",
    }
}

/// Formats each event as `{"jsonrpc":"2.0","method":...,"params":{"message":...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRpcFormat;

impl<S, N> FormatEvent<S, N> for JsonRpcFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.format_fields(format::Writer::new(&mut message), event)?;

        let line = json!({
            "jsonrpc": "2.0",
            "method": method_for(event.metadata().level()),
            "params": { "message": message },
        });
        writeln!(writer, "{}", line)
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Errors go to `errors`, everything else to `rest`.
pub fn plain_writer<E, R>(
    errors: E,
    rest: R,
) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    R: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    errors.with_max_level(Level::ERROR).or_else(rest)
}

/// Install the global subscriber for `mode`. Call once at startup.
pub fn init(mode: LogMode) -> Result<(), tracing_subscriber::util::TryInitError> {
    match mode {
        LogMode::Plain => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(plain_writer(std::io::stderr, std::io::stdout)),
            )
            .with(default_filter())
            .try_init(),
        LogMode::Stdio => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonRpcFormat)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .with(default_filter())
            .try_init(),
    }
}

/// The single line emitted before exiting on a fatal error.
pub fn fatal_line(message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": FATAL_CODE, "message": message },
    })
    .to_string()
}

/// Write a fatal line to stderr, bypassing the subscriber.
pub fn write_fatal(message: &str) {
    let mut stderr = std::io::stderr().lock();
    // Nothing left to report to if stderr itself is gone.
    let _ = writeln!(stderr, "{}", fatal_line(message));
    let _ = stderr.flush();
}
