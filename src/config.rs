use std::env;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_URL: &str = "http://127.0.0.1:8000/api/query";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub chat_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            chat_url: DEFAULT_CHAT_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `CHAT_URL` wins; otherwise a custom `BACKEND_URL` also moves the chat
    /// endpoint so a single variable can point everything at a test backend.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|_| {
                warn!("ignoring invalid PORT {value:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        let chat_url = match (lookup("CHAT_URL"), &backend_url) {
            (Some(url), _) if !url.is_empty() => url,
            (_, Some(base)) => format!("{base}/api/query"),
            _ => DEFAULT_CHAT_URL.to_string(),
        };

        Self {
            port,
            backend_url: backend_url.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            chat_url,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config(&[]), Config::default());
    }

    #[test]
    fn backend_url_moves_chat_endpoint() {
        let config = config(&[("BACKEND_URL", "http://10.0.0.5:9000/")]);
        assert_eq!(config.backend_url, "http://10.0.0.5:9000");
        assert_eq!(config.chat_url, "http://10.0.0.5:9000/api/query");
    }

    #[test]
    fn explicit_chat_url_wins() {
        let config = config(&[
            ("BACKEND_URL", "http://10.0.0.5:9000"),
            ("CHAT_URL", "http://qa.local/ask"),
        ]);
        assert_eq!(config.chat_url, "http://qa.local/ask");
    }

    #[test]
    fn invalid_port_falls_back() {
        assert_eq!(config(&[("PORT", "eighty")]).port, DEFAULT_PORT);
        assert_eq!(config(&[("PORT", "3000")]).port, 3000);
    }
}
