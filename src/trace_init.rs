//! Opt-in tracing output for binaries embedding the engine.
//!
//! Spans and events in this crate are compiled out unless the `trace`
//! feature is enabled; the functions here are no-ops in that case.

use std::path::Path;

/// Environment variable holding an `EnvFilter` directive.
pub const FILTER_ENV: &str = "TRANSLIT_LOG";

const DEFAULT_FILTER: &str = "translit_engine=debug";
const TRACE_FILE: &str = "translit-trace.jsonl";

/// Where trace records go.
#[derive(Debug, Clone, Copy)]
pub enum TraceSink<'a> {
    /// One JSON object per line in `<dir>/translit-trace.jsonl`.
    JsonFile(&'a Path),
    /// Human-readable lines on stderr.
    Stderr,
}

/// Install the global subscriber. Later calls are ignored.
#[cfg(feature = "trace")]
pub fn init_tracing(sink: TraceSink<'_>) {
    use std::sync::Once;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        match sink {
            TraceSink::JsonFile(dir) => {
                let appender = tracing_appender::rolling::never(dir, TRACE_FILE);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                // Dropping the guard stops the writer thread
                std::mem::forget(guard);
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(writer)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
            }
            TraceSink::Stderr => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_env_filter(filter)
                    .init();
            }
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_sink: TraceSink<'_>) {}
