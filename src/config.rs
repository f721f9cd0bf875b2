use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Request, connect and read timeouts all use this value.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// How much of each HTTP exchange the service logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpLoggingLevel {
    #[default]
    None,
    Info,
    Headers,
    Body,
    All,
}

impl HttpLoggingLevel {
    pub fn logs_info(&self) -> bool {
        !matches!(self, HttpLoggingLevel::None)
    }

    pub fn logs_headers(&self) -> bool {
        matches!(self, HttpLoggingLevel::Headers | HttpLoggingLevel::All)
    }

    pub fn logs_body(&self) -> bool {
        matches!(self, HttpLoggingLevel::Body | HttpLoggingLevel::All)
    }
}

impl FromStr for HttpLoggingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(HttpLoggingLevel::None),
            "info" => Ok(HttpLoggingLevel::Info),
            "headers" => Ok(HttpLoggingLevel::Headers),
            "body" => Ok(HttpLoggingLevel::Body),
            "all" => Ok(HttpLoggingLevel::All),
            other => Err(format!(
                "unknown HTTP logging level '{}', expected none|info|headers|body|all",
                other
            )),
        }
    }
}

impl fmt::Display for HttpLoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpLoggingLevel::None => "none",
            HttpLoggingLevel::Info => "info",
            HttpLoggingLevel::Headers => "headers",
            HttpLoggingLevel::Body => "body",
            HttpLoggingLevel::All => "all",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProxy {
    pub host: String,
    pub port: u16,
}

impl HttpProxy {
    pub fn new(host: &str, port: u16) -> Self {
        HttpProxy {
            host: host.to_string(),
            port,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpConfiguration {
    pub http_proxy: Option<HttpProxy>,
    pub logging_level: HttpLoggingLevel,
}

/// Everything the client needs, fixed for the lifetime of the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    pub auth_bearer_token: String,
    pub base_url: String,
    pub http: HttpConfiguration,
}

impl ClientConfiguration {
    pub fn new(auth_bearer_token: &str) -> Self {
        ClientConfiguration {
            auth_bearer_token: auth_bearer_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfiguration::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_proxy(mut self, host: &str, port: u16) -> Self {
        self.http.http_proxy = Some(HttpProxy::new(host, port));
        self
    }

    pub fn with_logging_level(mut self, level: HttpLoggingLevel) -> Self {
        self.http.logging_level = level;
        self
    }
}

// Keeps the token out of debug logs.
impl fmt::Debug for ClientConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfiguration")
            .field("auth_bearer_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}
