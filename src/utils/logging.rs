// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset: progress at info, parser and HTTP internals quiet.
const DEFAULT_DIRECTIVES: &str = "info,html5ever=warn,selectors=warn,hyper=warn,reqwest=warn";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global fmt subscriber. Call once, first thing in `main`.
pub fn setup_logging() {
    fmt()
        .with_env_filter(log_filter())
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        let filter = EnvFilter::try_new(DEFAULT_DIRECTIVES).unwrap();
        assert!(filter.to_string().to_lowercase().contains("html5ever=warn"));
    }
}
