use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "HealthBot";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TRANSLATE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// File names inside the data directory.
pub const PROFILE_FILE: &str = "user_data.json";
pub const CHAT_LOG_FILE: &str = "chat_log.json";
pub const UPLOADS_DIR: &str = "uploads";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "healthbot=info,tower_http=info"
}

/// Get the application data directory.
/// `HEALTHBOT_DATA_DIR` when set, otherwise ~/HealthBot/.
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = env_string("HEALTHBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub google_api_key: Option<String>,
    pub model: String,
    pub completion_timeout: Duration,
    pub translate_timeout: Duration,
    pub session_ttl: Duration,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    /// Malformed values fall back to their defaults.
    pub fn from_env() -> Self {
        let host = parse_host(env_string("HEALTHBOT_HOST").as_deref());
        let port = parse_port(env_string("PORT").as_deref());

        Self {
            data_dir: app_data_dir(),
            static_dir: env_string("HEALTHBOT_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            bind_addr: SocketAddr::new(host, port),
            google_api_key: env_string("GOOGLE_API_KEY"),
            model: env_string("HEALTHBOT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            completion_timeout: parse_secs(
                env_string("HEALTHBOT_COMPLETION_TIMEOUT_SECS").as_deref(),
                DEFAULT_COMPLETION_TIMEOUT_SECS,
            ),
            translate_timeout: parse_secs(
                env_string("HEALTHBOT_TRANSLATE_TIMEOUT_SECS").as_deref(),
                DEFAULT_TRANSLATE_TIMEOUT_SECS,
            ),
            session_ttl: parse_secs(
                env_string("HEALTHBOT_SESSION_TTL_SECS").as_deref(),
                DEFAULT_SESSION_TTL_SECS,
            ),
        }
    }

    /// Defaults rooted at `data_dir`, without an API key.
    pub fn for_data_dir(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            static_dir: data_dir.join("static"),
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT),
            google_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            completion_timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
            translate_timeout: Duration::from_secs(DEFAULT_TRANSLATE_TIMEOUT_SECS),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }

    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join(PROFILE_FILE)
    }

    pub fn chat_log_path(&self) -> PathBuf {
        self.data_dir.join(CHAT_LOG_FILE)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_DIR)
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_host(value: Option<&str>) -> IpAddr {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn parse_secs(value: Option<&str>, default: u64) -> Duration {
    let secs = value
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}
