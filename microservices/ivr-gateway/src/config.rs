//! Configuration for the IVR Gateway

use anyhow::Context;

/// IVR Gateway configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Plivo auth ID
    pub auth_id: String,
    /// Plivo auth token
    pub auth_token: String,
    /// Caller ID used for outbound calls
    pub from_number: String,
    /// Externally reachable base URL of this service; every callback and
    /// redirect target embedded in markup is built from it
    pub server_url: String,
    /// Number operator calls are bridged to
    pub associate_number: String,
    /// Pre-recorded message asset URL
    pub audio_file_url: String,
    /// HTTP bind host
    pub host: String,
    /// HTTP port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a number")?;

        Ok(Self {
            auth_id: required("PLIVO_AUTH_ID")?,
            auth_token: required("PLIVO_AUTH_TOKEN")?,
            from_number: required("PLIVO_FROM_NUMBER")?,
            server_url: std::env::var("SERVER_URL")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
            associate_number: required("ASSOCIATE_NUMBER")?,
            audio_file_url: required("AUDIO_FILE_URL")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}
