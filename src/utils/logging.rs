use anyhow::Error;
use tracing::span::Span;
use tracing_subscriber::EnvFilter;

/// Installs a global subscriber printing to stdout, filtered by `RUST_LOG`.
/// Without `RUST_LOG`, only `info` and more severe events of this crate are printed.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("changeset_bot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub trait LogError {
    fn log_error(&self, error: &Error);
}

impl LogError for Span {
    /// Logs the error with its whole context chain inside this span.
    fn log_error(&self, error: &Error) {
        self.in_scope(|| {
            tracing::error!("Error: {error:?}");
        });
    }
}
