//! Logging setup.

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr so stdout
/// carries only JSON.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "catalogue_query={level},catalogue_cli={level},catq={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
