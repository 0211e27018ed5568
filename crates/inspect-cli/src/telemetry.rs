//! Tracing subscriber setup.

use crate::config::LogFormat;
use crate::error::{CliError, Result};
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 6] = [
    "inspect_domain",
    "inspect_store",
    "inspect_lookup",
    "inspect_classifier",
    "inspect_access",
    "inspect_cli",
];

/// Default filter: warnings from dependencies, `level` for our crates
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{}={}", krate, level)));
    directives.join(",")
}

/// Install the global subscriber, logging to stderr
///
/// `RUST_LOG` overrides the default filter.
pub fn init(format: LogFormat, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().flatten_event(true).try_init(),
    };

    installed.map_err(|e| CliError::Config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives(false);
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("inspect_classifier=info"));

        assert!(default_directives(true).contains("inspect_access=debug"));
    }
}
