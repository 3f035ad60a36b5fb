use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks the level so stdout
/// stays reserved for the report.
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // A subscriber may already be installed when embedded in a test harness.
    tracing::subscriber::set_global_default(subscriber).ok();
}
