//! Tracing subscriber setup

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 5] = [
    "sqlforge_cli",
    "sqlforge_config",
    "sqlforge_dialect",
    "sqlforge_sandbox",
    "sqlforge_web",
];

/// Filter directives for every sqlforge crate at `level`
pub fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
///
/// Logs go to stderr so `translate` and `run` output stays pipeable.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
