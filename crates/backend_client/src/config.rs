use serde::{Deserialize, Serialize};

/// Backend endpoint configuration.
///
/// Resolved once at startup and handed to the client as an explicit base
/// URL; nothing here is process-global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Full base URL override, e.g. `http://localhost:8000`.
    pub api_base: Option<String>,
    /// Hostname to reuse when no full override is given (deployed mode).
    pub backend_host: Option<String>,
    /// Port the backend listens on next to `backend_host` or localhost.
    #[serde(default = "default_port")]
    pub backend_port: u16,
    /// Per-request deadline in seconds; a hung backend resolves as a
    /// transport failure instead of pinning the UI in a loading state.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

const CONFIG_FILE_PATH: &str = "config.toml";

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config {
            api_base: None,
            backend_host: None,
            backend_port: default_port(),
            request_timeout_secs: default_timeout_secs(),
        };

        //detect the config file exists
        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables if they exist
        if let Ok(api_base) = std::env::var("FILEOPS_API_BASE") {
            config.api_base = Some(api_base);
        }
        if let Ok(host) = std::env::var("FILEOPS_BACKEND_HOST") {
            config.backend_host = Some(host);
        }
        if let Ok(port) = std::env::var("FILEOPS_BACKEND_PORT") {
            if let Ok(port) = port.trim().parse() {
                config.backend_port = port;
            }
        }
        if let Ok(timeout) = std::env::var("FILEOPS_REQUEST_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.trim().parse() {
                config.request_timeout_secs = timeout;
            }
        }
        config
    }

    /// Resolve the base URL: explicit override first, then the deployed-mode
    /// host with the backend port, then the local development default.
    pub fn base_url(&self) -> String {
        if let Some(base) = &self.api_base {
            return base.trim_end_matches('/').to_string();
        }
        let host = self.backend_host.as_deref().unwrap_or("localhost");
        format!("http://{}:{}", host, self.backend_port)
    }
}
