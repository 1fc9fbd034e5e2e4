#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::render::DEFAULT_TIMESTAMP_FORMAT;
use crate::domain::model::ListQuery;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::time::Duration;
use toml_config::{validate_timestamp_format, TomlConfig};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Resolved client settings: defaults, then the TOML file, then flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub timestamp_format: String,
    pub list_query: ListQuery,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            list_query: ListQuery::default(),
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let mut settings = Self {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout_seconds.map(Duration::from_secs),
            ..Self::default()
        };

        if let Some(format) = config.timestamp_format() {
            settings.timestamp_format = format.to_string();
        }
        if let Some(limit) = config.list_limit() {
            settings.list_query.limit = limit;
        }
        if let Some(order) = config.list_order() {
            settings.list_query.order =
                order
                    .parse()
                    .map_err(|reason| ClientError::InvalidConfigValueError {
                        field: "list.order".to_string(),
                        value: order.to_string(),
                        reason,
                    })?;
        }

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    fn list_query(&self) -> ListQuery {
        self.list_query
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout {
            validate_positive_number("timeout", timeout.as_secs(), 1)?;
        }
        validate_timestamp_format("timestamp_format", &self.timestamp_format)?;
        validate_positive_number("limit", u64::from(self.list_query.limit), 1)?;
        Ok(())
    }
}
