use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Rows kept per session when `HISTORY_LIMIT` is unset or invalid.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
/// Sessions kept in memory when `MAX_SESSIONS` is unset or invalid.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_LOG_FILE_PREFIX: &str = "kelelahan.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub history_limit: usize,
    pub max_sessions: usize,
    /// Daily rolling log directory; `None` logs to stdout only.
    pub log_dir: Option<PathBuf>,
    pub log_file_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let history_limit = positive(std::env::var("HISTORY_LIMIT").ok().as_deref())
            .unwrap_or(DEFAULT_HISTORY_LIMIT);
        let max_sessions = positive(std::env::var("MAX_SESSIONS").ok().as_deref())
            .unwrap_or(DEFAULT_MAX_SESSIONS);

        let log_dir = flag(std::env::var("ENABLE_FILE_LOGS").ok().as_deref()).then(|| {
            std::env::var("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./logs"))
        });
        let log_file_prefix = std::env::var("LOG_FILE_PREFIX")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE_PREFIX.to_string());

        Self {
            host,
            port,
            log_level,
            history_limit,
            max_sessions,
            log_dir,
            log_file_prefix,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            log_level: "info".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            max_sessions: DEFAULT_MAX_SESSIONS,
            log_dir: None,
            log_file_prefix: DEFAULT_LOG_FILE_PREFIX.to_string(),
        }
    }
}

fn positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}
