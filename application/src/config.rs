//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::postgres;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: Server,

    /// Postgres connection configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Loads the [`Config`] from the TOML file at the provided `path`.
    ///
    /// The file is optional. Values from it are overridden by the
    /// `CONF.`-prefixed environment variables (`CONF.server.port=80`), and
    /// anything left unset takes its default.
    ///
    /// # Errors
    ///
    /// If the file or any variable holds a malformed value.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// HTTP server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to listen on.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to listen on.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration of the GraphQL endpoint.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// Origins allowed to call the GraphQL endpoint.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Postgres connection configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host of the database server.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port of the database server.
    #[default(5432)]
    pub port: u16,

    /// Role to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password of the role.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Name of the database holding drivers, trailers and orders.
    #[default("postgres".to_owned())]
    pub dbname: String,

    /// Maximum number of pooled connections.
    #[default(16)]
    pub pool_size: usize,
}

impl From<Postgres> for postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
            pool_size,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            pool: Some(postgres::PoolConfig::new(pool_size)),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Maximum level of the emitted events.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Everything, including per-operation details.
    Trace,

    /// Debugging details, such as detached references on deletion.
    Debug,

    /// Served requests and lifecycle events.
    #[default]
    Info,

    /// Failed requests.
    Warn,

    /// Failures of the server itself.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::infra::postgres;

    use super::{Config, LogLevel, Postgres};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("non-existent.toml").unwrap();

        assert_eq!(conf.server.host, "0.0.0.0");
        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.server.cors.origins, ["*"]);
        assert_eq!(conf.postgres.port, 5432);
        assert_eq!(conf.log.level, LogLevel::Info);
    }

    #[test]
    fn converts_postgres_config() {
        let conf = postgres::Config::from(Postgres {
            dbname: "logistics".to_owned(),
            pool_size: 4,
            ..Postgres::default()
        });

        assert_eq!(conf.dbname.as_deref(), Some("logistics"));
        assert_eq!(conf.port, Some(5432));
        assert_eq!(conf.pool.map(|p| p.max_size), Some(4));
    }
}
