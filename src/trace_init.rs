#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "bible_translit=debug,translit_core=debug";

/// Install the trace subscriber once per process.
///
/// With a directory, spans and events go as JSON lines to
/// `<dir>/bible-translit-trace.jsonl`; without one they go to stderr in the
/// compact text format. `RUST_LOG` overrides the default filter. Returns
/// `false` when another subscriber was already installed.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = || {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER))
        };
        installed = match log_dir {
            Some(dir) => {
                let appender = tracing_appender::rolling::never(dir, "bible-translit-trace.jsonl");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                // The guard flushes on drop; tables live for the whole process.
                std::mem::forget(guard);
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(writer)
                    .with_target(true)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                    .with_env_filter(filter())
                    .try_init()
                    .is_ok()
            }
            None => tracing_subscriber::fmt()
                .compact()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .try_init()
                .is_ok(),
        };
    });
    installed
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&std::path::Path>) -> bool {
    false
}
