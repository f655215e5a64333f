//! Command-line arguments for topmusic-api
//!
//! Every argument can also be given through its environment variable. Values
//! left unset fall through to the TOML config file and then to the compiled
//! defaults.

use std::path::PathBuf;

use clap::{builder::FalseyValueParser, Parser};
use topmusic_common::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "topmusic-api")]
#[command(about = "Song catalog API for the top music dataset")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// SQLite database file, or ":memory:"
    #[arg(long, env = "TOPMUSIC_DATABASE")]
    pub database: Option<String>,

    /// JSON dataset used when resetting the collection
    #[arg(long, env = "TOPMUSIC_DATASET")]
    pub dataset: Option<PathBuf>,

    /// Clear the collection and reseed it from the dataset at startup
    #[arg(long, env = "RESET_DB", value_parser = FalseyValueParser::new())]
    pub reset_db: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "TOPMUSIC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "TOPMUSIC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            database: self.database.clone(),
            dataset: self.dataset.clone(),
            // An unset flag leaves the decision to the config file
            reset_db: self.reset_db.then_some(true),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const ENV_VARS: [&str; 6] = [
        "PORT",
        "TOPMUSIC_DATABASE",
        "TOPMUSIC_DATASET",
        "RESET_DB",
        "TOPMUSIC_LOG_LEVEL",
        "TOPMUSIC_CONFIG",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_no_arguments() {
        clear_env();
        let args = Args::try_parse_from(["topmusic-api"]).unwrap();
        let overrides = args.overrides();

        assert_eq!(overrides.port, None);
        assert_eq!(overrides.database, None);
        assert_eq!(overrides.reset_db, None);
        assert!(args.config.is_none());
    }

    #[test]
    #[serial]
    fn test_command_line_arguments() {
        clear_env();
        let args = Args::try_parse_from([
            "topmusic-api",
            "--port",
            "9000",
            "--database",
            ":memory:",
            "--reset-db",
            "--config",
            "/etc/topmusic/config.toml",
        ])
        .unwrap();
        let overrides = args.overrides();

        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.database.as_deref(), Some(":memory:"));
        assert_eq!(overrides.reset_db, Some(true));
        assert_eq!(args.config, Some(PathBuf::from("/etc/topmusic/config.toml")));
    }

    #[test]
    #[serial]
    fn test_environment_variables() {
        clear_env();
        env::set_var("PORT", "9100");
        env::set_var("RESET_DB", "1");

        let args = Args::try_parse_from(["topmusic-api"]).unwrap();
        clear_env();

        assert_eq!(args.port, Some(9100));
        assert!(args.reset_db);
    }

    #[test]
    #[serial]
    fn test_falsey_reset_db_env() {
        clear_env();
        env::set_var("RESET_DB", "false");

        let args = Args::try_parse_from(["topmusic-api"]).unwrap();
        clear_env();

        assert!(!args.reset_db);
        assert_eq!(args.overrides().reset_db, None);
    }

    #[test]
    #[serial]
    fn test_invalid_port_rejected() {
        clear_env();
        assert!(Args::try_parse_from(["topmusic-api", "--port", "eighty"]).is_err());
    }
}
