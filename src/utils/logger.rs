use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_web::MakeWebConsoleWriter;

const DEFAULT_FILTER: &str = "gramrate=info";

/// Installs the console subscriber for the worker isolate.
///
/// Events are written as JSON lines to the runtime console. Timestamps are
/// left out since the runtime stamps console output itself.
pub fn init_worker_logger() {
    let filter = EnvFilter::try_new(DEFAULT_FILTER).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(MakeWebConsoleWriter::new())
                .json(),
        )
        .try_init();
}
