use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize structured logging with tracing.
///
/// Level comes from `RUST_LOG`, default "info". Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
