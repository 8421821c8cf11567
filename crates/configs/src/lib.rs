use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    /// Apply pending migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_run_migrations() -> bool { true }

/// Which repository implementation backs the API.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub enum TokenAlgorithm {
    #[default]
    HS256,
    RS256,
}

/// Settings for verifying bearer tokens issued by the identity provider.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub algorithm: TokenAlgorithm,
    /// Shared secret for HS256.
    #[serde(default)]
    pub secret: String,
    /// PEM encoded public key for RS256.
    #[serde(default)]
    pub public_key_path: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if present) -> environment overrides -> validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup; blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").or_else(|| get("SERVER_PORT")).and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        }
        match get("STORAGE_BACKEND").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("memory") => self.storage.backend = StorageBackend::Memory,
            Some("postgres") => self.storage.backend = StorageBackend::Postgres,
            _ => {}
        }
        if let Some(secret) = get("AUTH_JWT_SECRET") {
            self.auth.secret = secret;
        }
        if let Some(path) = get("AUTH_PUBLIC_KEY_PATH") {
            self.auth.public_key_path = Some(path);
            self.auth.algorithm = TokenAlgorithm::RS256;
        }
        if let Some(iss) = get("AUTH_ISSUER") {
            self.auth.issuer = Some(iss);
        }
        if let Some(aud) = get("AUTH_AUDIENCE") {
            self.auth.audience = Some(aud);
        }
        match get("LOG_FORMAT").map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => self.logging.format = LogFormat::Json,
            Some("compact") => self.logging.format = LogFormat::Compact,
            _ => {}
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.auth.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        match self.algorithm {
            TokenAlgorithm::HS256 if self.secret.trim().is_empty() => {
                Err(anyhow!("auth.secret is required for HS256; set it in config.toml or AUTH_JWT_SECRET"))
            }
            TokenAlgorithm::RS256 if self.public_key_path.as_deref().map_or(true, |p| p.trim().is_empty()) => {
                Err(anyhow!("auth.public_key_path is required for RS256"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn parses_full_file() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [database]
            url = "postgres://u:p@localhost/home_hero"
            max_connections = 5

            [storage]
            backend = "memory"

            [auth]
            algorithm = "HS256"
            secret = "s3cret"
            issuer = "https://issuer.example"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.auth.issuer.as_deref(), Some("https://issuer.example"));
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.storage.backend, StorageBackend::Postgres);
        assert!(cfg.database.run_migrations);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[
            ("PORT", "4000"),
            ("DATABASE_URL", "postgres://localhost/x"),
            ("STORAGE_BACKEND", "Memory"),
            ("AUTH_JWT_SECRET", "abc"),
            ("SERVER_HOST", "  "),
        ]));
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.database.url, "postgres://localhost/x");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.auth.secret, "abc");
    }

    #[test]
    fn log_format_env_switches_both_ways() {
        let mut cfg = parse("[logging]\nformat = \"json\"\n").unwrap();
        cfg.apply_env(env(&[("LOG_FORMAT", "Compact")]));
        assert_eq!(cfg.logging.format, LogFormat::Compact);
        cfg.apply_env(env(&[("LOG_FORMAT", "JSON")]));
        assert_eq!(cfg.logging.format, LogFormat::Json);
        cfg.apply_env(env(&[("LOG_FORMAT", "pretty")]));
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn public_key_path_switches_to_rs256() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env(&[("AUTH_PUBLIC_KEY_PATH", "/keys/idp.pem")]));
        assert_eq!(cfg.auth.algorithm, TokenAlgorithm::RS256);
        assert!(cfg.auth.validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_url() {
        let mut cfg = AppConfig::default();
        cfg.auth.secret = "x".into();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.url = "mysql://localhost/x".into();
        assert!(cfg.normalize_and_validate().is_err());

        cfg.database.url = "postgres://localhost/x".into();
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn memory_backend_skips_database_validation() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        cfg.auth.secret = "x".into();
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn hs256_requires_secret() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn pool_bounds_are_checked() {
        let db = DatabaseConfig {
            url: "postgres://localhost/x".into(),
            max_connections: 1,
            min_connections: 3,
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }
}
