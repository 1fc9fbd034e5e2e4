use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_url, Validate,
};
use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub display: Option<DisplayConfig>,
    pub list: Option<ListConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// 未設定時無限等待
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub timestamp_format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub limit: Option<u32>,
    pub order: Option<String>,
}

pub const VALID_ORDERS: [&str; 2] = ["score", "timestamp"];

/// Rejects strftime strings chrono cannot render.
pub fn validate_timestamp_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ClientError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Not a valid strftime format".to_string(),
        });
    }
    Ok(())
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MATCH_API_URL})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("env placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timestamp_format(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.timestamp_format.as_deref())
    }

    pub fn list_limit(&self) -> Option<u32> {
        self.list.as_ref().and_then(|l| l.limit)
    }

    pub fn list_order(&self) -> Option<&str> {
        self.list.as_ref().and_then(|l| l.order.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        if let Some(format) = self.timestamp_format() {
            validate_timestamp_format("display.timestamp_format", format)?;
        }

        if let Some(limit) = self.list_limit() {
            validate_positive_number("list.limit", u64::from(limit), 1)?;
        }

        if let Some(order) = self.list_order() {
            validate_one_of("list.order", order, &VALID_ORDERS)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "http://127.0.0.1:5000"
timeout_seconds = 30

[display]
timestamp_format = "%Y-%m-%d %H:%M"

[list]
limit = 20
order = "timestamp"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.api.timeout_seconds, Some(30));
        assert_eq!(config.timestamp_format(), Some("%Y-%m-%d %H:%M"));
        assert_eq!(config.list_limit(), Some(20));
        assert_eq!(config.list_order(), Some("timestamp"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config() {
        let config = TomlConfig::from_toml_str("[api]\nbase_url = \"https://matcher.example.com\"\n").unwrap();
        assert!(config.display.is_none());
        assert!(config.list.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_section_fails() {
        let err = TomlConfig::from_toml_str("[list]\nlimit = 5\n").unwrap_err();
        assert!(matches!(err, ClientError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_order = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost\"\n[list]\norder = \"name\"\n",
        )
        .unwrap();
        assert!(bad_order.validate().is_err());

        let bad_limit = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"http://localhost\"\n[list]\nlimit = 0\n",
        )
        .unwrap();
        assert!(bad_limit.validate().is_err());

        let bad_url = TomlConfig::from_toml_str("[api]\nbase_url = \"ftp://localhost\"\n").unwrap();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_timestamp_format_validation() {
        assert!(validate_timestamp_format("f", "%-m/%-d/%Y, %-I:%M:%S %p").is_ok());
        assert!(validate_timestamp_format("f", "%Q").is_err());
        assert!(validate_timestamp_format("f", "").is_err());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("RESUME_MATCH_TEST_URL", "http://10.0.0.5:8080");
        let config = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"${RESUME_MATCH_TEST_URL}\"\n",
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8080");

        let untouched = TomlConfig::from_toml_str(
            "[api]\nbase_url = \"${RESUME_MATCH_UNSET_VAR}\"\n",
        )
        .unwrap();
        assert_eq!(untouched.api.base_url, "${RESUME_MATCH_UNSET_VAR}");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:5000\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert!(matches!(
            TomlConfig::from_file("/definitely/not/here.toml"),
            Err(ClientError::IoError(_))
        ));
    }
}
