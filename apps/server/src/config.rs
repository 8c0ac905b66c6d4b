//! Server configuration.

use std::env;

use log::LevelFilter;
use sqlx::ConnectOptions;
use sqlx::postgres::PgConnectOptions;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// PostgreSQL host.
    pub pg_host: String,
    /// PostgreSQL port.
    pub pg_port: u16,
    /// PostgreSQL user.
    pub pg_user: String,
    /// PostgreSQL password.
    pub pg_password: String,
    /// PostgreSQL database name.
    pub pg_db: String,
    /// Whether to log every SQL statement.
    pub sql_echo: bool,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// The `PG_*` connection variables are required; everything else has
    /// a default.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("TODO_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("TODO_SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),
            pg_host: require_env("PG_HOST")?,
            pg_port: require_env("PG_PORT")?
                .parse()
                .map_err(|_| anyhow::anyhow!("PG_PORT must be a valid port number"))?,
            pg_user: require_env("PG_USER")?,
            pg_password: require_env("PG_PASSWORD")?,
            pg_db: require_env("PG_DB")?,
            sql_echo: env::var("SQL_ECHO")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            log_level: env::var("TODO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns PostgreSQL connection options, with statement logging
    /// wired to the SQL echo flag.
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.pg_host)
            .port(self.pg_port)
            .username(&self.pg_user)
            .password(&self.pg_password)
            .database(&self.pg_db);

        if self.sql_echo {
            options.log_statements(LevelFilter::Info)
        } else {
            options.disable_statement_logging()
        }
    }
}

fn require_env(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Environment variable {key} is missing"))
}
