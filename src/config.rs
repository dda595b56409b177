use std::fs::File;
use std::io::Read;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use thiserror::Error;
use yaml_rust::{Yaml, YamlLoader};

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("{path} is not valid yaml: {source}")]
    Yaml { path: String, source: yaml_rust::ScanError },

    #[error("{0} is empty")]
    Empty(String),

    #[error("{0} not found!")]
    MissingKey(String),

    #[error("{key} has an invalid value")]
    InvalidValue { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_payload_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl MySqlConfig {
    // built field by field so credentials never pass through url escaping
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mysql: MySqlConfig,
}

impl AppConfig {

    /// Reads the yaml config at `path` (see config.example.yml for the layout).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let buf = read_file_as_str(path)?;
        Self::from_yaml_str(path, &buf)
    }

    pub fn from_yaml_str(path: &str, buf: &str) -> Result<Self, ConfigError> {
        let docs = YamlLoader::load_from_str(buf)
            .map_err(|source| ConfigError::Yaml { path: path.to_string(), source })?;
        let config = match docs.first() {
            Some(config) => config,
            None => return Err(ConfigError::Empty(path.to_string()))
        };

        let server = ServerConfig {
            host: optional_str(config, "server", "host")?.unwrap_or("0.0.0.0").to_string(),
            port: optional_int(config, "server", "port")?.unwrap_or(8080),
            max_payload_bytes: optional_int(config, "server", "max_payload_bytes")?
                .unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES),
        };

        let mysql = MySqlConfig {
            host: required_str(config, "mysql", "host")?,
            port: optional_int(config, "mysql", "port")?.unwrap_or(3306),
            username: required_str(config, "mysql", "username")?,
            password: required_str(config, "mysql", "password")?,
            database: required_str(config, "mysql", "database")?,
            max_connections: optional_int(config, "mysql", "max_connections")?.unwrap_or(5),
            min_connections: optional_int(config, "mysql", "min_connections")?.unwrap_or(1),
            acquire_timeout: Duration::from_secs(
                optional_int(config, "mysql", "acquire_timeout_secs")?.unwrap_or(5)
            ),
        };

        if mysql.min_connections > mysql.max_connections {
            return Err(ConfigError::InvalidValue { key: "mysql.min_connections".to_string() });
        }

        return Ok(AppConfig { server, mysql });
    }
}

pub fn read_file_as_str(file_path: &str) -> Result<String, ConfigError> {
    let mut buf: String = String::new();
    File::open(file_path)
        .and_then(|mut file| file.read_to_string(&mut buf))
        .map_err(|source| ConfigError::Io { path: file_path.to_string(), source })?;
    return Ok(buf);
}

fn key_name(section: &str, name: &str) -> String {
    format!("{}.{}", section, name)
}

fn required_str(config: &Yaml, section: &str, name: &str) -> Result<String, ConfigError> {
    match optional_str(config, section, name)? {
        Some(value) => Ok(value.to_string()),
        None => Err(ConfigError::MissingKey(key_name(section, name)))
    }
}

fn optional_str<'a>(config: &'a Yaml, section: &str, name: &str) -> Result<Option<&'a str>, ConfigError> {
    match &config[section][name] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::String(value) => Ok(Some(value.as_str())),
        _ => Err(ConfigError::InvalidValue { key: key_name(section, name) })
    }
}

fn optional_int<T: TryFrom<i64>>(config: &Yaml, section: &str, name: &str) -> Result<Option<T>, ConfigError> {
    match &config[section][name] {
        Yaml::BadValue | Yaml::Null => Ok(None),
        Yaml::Integer(value) => T::try_from(*value)
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key: key_name(section, name) }),
        _ => Err(ConfigError::InvalidValue { key: key_name(section, name) })
    }
}
