use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sqlforge")]
#[command(about = "sqlforge - translate MySQL schemas to SQLite and run queries against throwaway databases")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/sqlforge/config.toml)
    #[arg(short = 'C', long, global = true, env = "SQLFORGE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` wins, then `--verbose`, then the command's default
    pub fn effective_log_level(&self) -> LogLevel {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => LogLevel::Debug,
            (None, false) => self.command.default_log_level(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Interface to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the SQLite translation of a MySQL schema file, one statement per line
    Translate {
        /// Schema file to translate
        schema_file: PathBuf,
    },

    /// Build a schema file in a throwaway database and run one query
    Run {
        /// Schema file (MySQL or SQLite syntax)
        schema_file: PathBuf,

        /// Query to execute
        query: String,

        /// Treat the schema as SQLite already and skip translation
        #[arg(long)]
        no_translate: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Commands {
    /// Quiet by default for commands whose stdout is the product
    pub fn default_log_level(&self) -> LogLevel {
        match self {
            Commands::Serve { .. } => LogLevel::Info,
            _ => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_parses_overrides() {
        let cli = Cli::try_parse_from(["sqlforge", "serve", "--host", "0.0.0.0", "-p", "8080"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("Expected Serve command, got {other:?}"),
        }
    }

    #[test]
    fn test_run_parses() {
        let cli = Cli::try_parse_from(["sqlforge", "run", "schema.sql", "SELECT * FROM t", "--no-translate"])
            .unwrap();
        if let Commands::Run {
            schema_file,
            query,
            no_translate,
        } = cli.command
        {
            assert_eq!(schema_file, PathBuf::from("schema.sql"));
            assert_eq!(query, "SELECT * FROM t");
            assert!(no_translate);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_translate_requires_file() {
        assert!(Cli::try_parse_from(["sqlforge", "translate"]).is_err());
    }

    #[test]
    fn test_command_is_required() {
        assert!(Cli::try_parse_from(["sqlforge"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sqlforge", "config", "-C", "/tmp/sqlforge.toml", "-l", "trace"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/sqlforge.toml")));
        assert_eq!(cli.log_level, Some(LogLevel::Trace));
    }

    #[test]
    fn test_effective_log_level() {
        let cli = Cli::try_parse_from(["sqlforge", "serve"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Info);

        let cli = Cli::try_parse_from(["sqlforge", "translate", "a.sql"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Warn);

        let cli = Cli::try_parse_from(["sqlforge", "translate", "a.sql", "-v"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["sqlforge", "-v", "-l", "off", "serve"]).unwrap();
        assert_eq!(cli.effective_log_level(), LogLevel::Off);
    }
}
