//! Server settings from environment variables.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8000";
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost",
    "http://localhost:3000",
    "http://localhost:5173",
];

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated list; `*` allows any origin.
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if origins.iter().any(|o| o == "*") {
            CorsOrigins::Any
        } else if origins.is_empty() {
            CorsOrigins::default()
        } else {
            CorsOrigins::List(origins)
        }
    }

    pub fn layer(&self) -> CorsLayer {
        let origin = match self {
            CorsOrigins::Any => AllowOrigin::any(),
            CorsOrigins::List(list) => {
                let values: Vec<HeaderValue> = list
                    .iter()
                    .filter_map(|o| match HeaderValue::from_str(o) {
                        Ok(v) => Some(v),
                        Err(_) => {
                            tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                            None
                        }
                    })
                    .collect();
                AllowOrigin::list(values)
            }
        };
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

impl Default for CorsOrigins {
    fn default() -> Self {
        CorsOrigins::List(DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub cors_origins: CorsOrigins,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        let listen = std::env::var("COACH_LISTEN")
            .unwrap_or_else(|_| DEFAULT_LISTEN.to_string())
            .parse()?;
        let cors_origins = std::env::var("COACH_CORS_ORIGINS")
            .map(|raw| CorsOrigins::parse(&raw))
            .unwrap_or_default();
        Ok(Self {
            listen,
            cors_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_origin_list() {
        assert_eq!(
            CorsOrigins::parse("https://a.example, https://b.example ,"),
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn star_means_any() {
        assert_eq!(CorsOrigins::parse("http://x, *"), CorsOrigins::Any);
    }

    #[test]
    fn empty_falls_back_to_localhost_defaults() {
        assert_eq!(CorsOrigins::parse(" , "), CorsOrigins::default());
    }
}
