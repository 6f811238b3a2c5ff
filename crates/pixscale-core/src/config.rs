//! Configuration module
//!
//! Configuration is read once at startup from the environment (after loading
//! an optional `.env` file) and is immutable afterwards.

use std::env;
use std::fmt;

use crate::constants::DEFAULT_BUCKET;
use crate::storage_types::StorageBackend;

const SERVER_HOST: &str = "0.0.0.0";
const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 16;
const MINIO_URL: &str = "localhost:9000";
const MINIO_ACCESS_KEY: &str = "admin";
const MINIO_SECRET_KEY: &str = "admin123";
const MINIO_REGION: &str = "us-east-1";
const LOCAL_STORAGE_PATH: &str = "./data";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub max_upload_size_bytes: usize,
}

/// Object store settings
#[derive(Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub bucket: String,
    /// `host:port` or full URL of the S3-compatible endpoint
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub secure: bool,
    pub region: String,
    pub local_path: String,
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("secure", &self.secure)
            .field("region", &self.region)
            .field("local_path", &self.local_path)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub storage: StorageSettings,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ServiceConfig::from_lookup(&lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn is_production(&self) -> bool {
        let environment = self.inner().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn server_host(&self) -> &str {
        &self.inner().base.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    /// `host:port` the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host(), self.server_port())
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().base.max_upload_size_bytes
    }

    pub fn storage(&self) -> &StorageSettings {
        &self.inner().storage
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage.backend
    }

    pub fn bucket(&self) -> &str {
        &self.inner().storage.bucket
    }

    /// Endpoint as a URL, adding the scheme when only `host:port` was configured.
    pub fn storage_endpoint_url(&self) -> String {
        let storage = &self.inner().storage;
        if storage.endpoint.starts_with("http://") || storage.endpoint.starts_with("https://") {
            storage.endpoint.clone()
        } else {
            let scheme = if storage.secure { "https" } else { "http" };
            format!("{}://{}", scheme, storage.endpoint)
        }
    }
}

impl ServiceConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = var("SERVER_PORT", &SERVER_PORT.to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid port number"))?;

        let max_upload_size_mb = var("MAX_UPLOAD_SIZE_MB", &MAX_UPLOAD_SIZE_MB.to_string())
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?;

        let base = BaseConfig {
            server_host: var("SERVER_HOST", SERVER_HOST),
            server_port,
            environment,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        let backend = var("STORAGE_BACKEND", "s3").parse::<StorageBackend>()?;

        let secure = parse_bool(&var("MINIO_SECURE", "false"))
            .ok_or_else(|| anyhow::anyhow!("MINIO_SECURE must be true or false"))?;

        let storage = StorageSettings {
            backend,
            bucket: var("STORAGE_BUCKET", DEFAULT_BUCKET),
            endpoint: var("MINIO_URL", MINIO_URL),
            access_key: var("MINIO_ACCESS_KEY", MINIO_ACCESS_KEY),
            secret_key: var("MINIO_SECRET_KEY", MINIO_SECRET_KEY),
            secure,
            region: var("MINIO_REGION", MINIO_REGION),
            local_path: var("LOCAL_STORAGE_PATH", LOCAL_STORAGE_PATH),
        };

        Ok(ServiceConfig { base, storage })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("STORAGE_BUCKET must not be empty"));
        }

        if self.base.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        if self.storage.backend == StorageBackend::S3 {
            if self.storage.endpoint.trim().is_empty() {
                return Err(anyhow::anyhow!("MINIO_URL must be set for the s3 backend"));
            }
            if self.storage.access_key.is_empty() || self.storage.secret_key.is_empty() {
                return Err(anyhow::anyhow!(
                    "MINIO_ACCESS_KEY and MINIO_SECRET_KEY must be set for the s3 backend"
                ));
            }
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
