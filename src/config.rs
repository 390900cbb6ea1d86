//! Command line and environment configuration for the server.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

/// The database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "expense_tracker.db";
/// The port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 4000;

/// The REST API server for tracking income and expenses.
///
/// Every option can also be set with the environment variable named in its
/// help text.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The SQLite database to store transactions in, a file path or ":memory:".
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// File to append debug level logs to.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// The socket address the server should bind to.
    pub fn socket_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use clap::Parser;

    use super::{Config, DEFAULT_DATABASE_URL, DEFAULT_PORT};

    #[test]
    fn parses_command_line_options() {
        let config = Config::try_parse_from([
            "server",
            "--database-url",
            "sqlite://data/test.db",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--log-file",
            "debug.log",
        ])
        .expect("arguments should be valid");

        assert_eq!(config.database_url, "sqlite://data/test.db");
        assert_eq!(
            config.socket_address(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.log_file, Some("debug.log".into()));
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Config::try_parse_from(["server", "--port", "http"]).is_err());
    }

    #[test]
    fn defaults_are_documented_values() {
        // Only meaningful when the variables are unset in the test environment.
        if ["DATABASE_URL", "HOST", "PORT", "LOG_FILE"]
            .iter()
            .any(|key| std::env::var_os(key).is_some())
        {
            return;
        }

        let config = Config::try_parse_from(["server"]).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.socket_address(),
            "127.0.0.1:4000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.log_file, None);
    }
}
