use std::{env, time::Duration};

use crate::api::error::{Error, Result};

pub const TRACKING_URI_VAR: &str = "MLFLOW_TRACKING_URI";
pub const REQUEST_TIMEOUT_VAR: &str = "MLFLOW_HTTP_REQUEST_TIMEOUT";

/// Settings for the HTTP agent talking to a tracking server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:5000`. Endpoint paths start with `/api`.
    pub base_url: String,
    /// Limit for a whole request, connect included.
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        ClientConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: None,
            connect_timeout: None,
            user_agent: concat!("mlflow-tracking/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    /// Reads `MLFLOW_TRACKING_URI` and the optional `MLFLOW_HTTP_REQUEST_TIMEOUT` (seconds).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(TRACKING_URI_VAR)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", TRACKING_URI_VAR)))?;
        let mut config = ClientConfig::new(base_url);
        if let Some(seconds) = lookup(REQUEST_TIMEOUT_VAR) {
            let seconds = seconds.trim().parse::<u64>().map_err(|err| {
                Error::Config(format!("{} must be whole seconds: {}", REQUEST_TIMEOUT_VAR, err))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }
        Ok(config)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build_agent(&self) -> ureq::Agent {
        let mut builder = ureq::AgentBuilder::new().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.timeout_connect(timeout);
        }
        builder.build()
    }
}
