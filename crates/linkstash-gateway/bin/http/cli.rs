use clap::{Parser, ValueEnum};
use linkstash_storage::DEFAULT_MAX_GENERATION_ATTEMPTS;
use linkstash_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "LINKSTASH_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "LINKSTASH_STORAGE_BACKEND";
pub const POSTGRES_DSN_ENV: &str = "LINKSTASH_POSTGRES_DSN";
pub const POSTGRES_MAX_CONNECTIONS_ENV: &str = "LINKSTASH_POSTGRES_MAX_CONNECTIONS";
pub const POSTGRES_ACQUIRE_TIMEOUT_ENV: &str = "LINKSTASH_POSTGRES_ACQUIRE_TIMEOUT_SECS";
pub const MAX_GENERATION_ATTEMPTS_ENV: &str = "LINKSTASH_MAX_GENERATION_ATTEMPTS";
pub const PUBLIC_BASE_URL_ENV: &str = "LINKSTASH_PUBLIC_BASE_URL";
pub const LOG_FORMAT_ENV: &str = "LINKSTASH_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "linkstash", about = "URL shortener HTTP server")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = POSTGRES_DSN_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_dsn: Option<String>,

    #[arg(long, env = POSTGRES_MAX_CONNECTIONS_ENV, default_value_t = 10)]
    pub postgres_max_connections: u32,

    #[arg(long, env = POSTGRES_ACQUIRE_TIMEOUT_ENV, default_value_t = 5)]
    pub postgres_acquire_timeout_secs: u64,

    #[arg(
        long,
        env = MAX_GENERATION_ATTEMPTS_ENV,
        default_value_t = DEFAULT_MAX_GENERATION_ATTEMPTS
    )]
    pub max_generation_attempts: usize,

    #[arg(long, env = PUBLIC_BASE_URL_ENV)]
    pub public_base_url: Option<String>,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
