use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Api { status: u16, message: Option<String> },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Server,
    Network,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    /// The message the backend put in its `{error}` body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Non-success status with a structured body, as opposed to an exception.
    pub fn is_expected(&self) -> bool {
        matches!(self, ClientError::Api { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Api { .. } => ErrorCategory::Server,
            ClientError::Http(e) if e.is_decode() => ErrorCategory::Data,
            ClientError::Http(_) => ErrorCategory::Network,
            ClientError::SerializationError(_) => ErrorCategory::Data,
            ClientError::Url(_)
            | ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ClientError::IoError(_) => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Server | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Api { status, .. } => format!("The server rejected the request ({status})"),
            ClientError::Http(e) if e.is_connect() => "Could not reach the matching server".to_string(),
            ClientError::Http(e) if e.is_timeout() => "The matching server did not answer in time".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Server => "Check the request contents and try again",
            ErrorCategory::Network => "Make sure the backend is running and --base-url points at it",
            ErrorCategory::Data => "The server answered with an unexpected payload; check backend version",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Input => "Check the input file paths and text",
        }
    }
}
