use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize logging. `RUST_LOG` wins when set; `-v` flags raise the
/// configured base filter.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let base = match verbose {
        0 => config.filter.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
