use thiserror::Error;

#[derive(Error, Debug)]
pub enum MujiError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Request to {service} failed: {message}")]
    TransportError { service: String, message: String },

    #[error("Failed to decode {service} response: {message}")]
    DecodingError { service: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MujiError {
    pub fn transport(service: &str, message: impl Into<String>) -> Self {
        Self::TransportError {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn decoding(service: &str, message: impl Into<String>) -> Self {
        Self::DecodingError {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::TransportError { .. } => ErrorCategory::Network,
            Self::DecodingError { .. } | Self::SerializationError(_) => ErrorCategory::Data,
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼；設定錯誤必須在發出任何請求前終止程式
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Storage | ErrorCategory::Input => {
                ErrorSeverity::High
            }
        }
    }

    /// 可恢復的錯誤重新執行同一指令可能成功
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Set '{}' in the config file or export the referenced environment variable", field)
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Check the TOML configuration file and try again".to_string()
            }
            Self::TransportError { service, .. } => {
                format!("Check the network connection and the {} endpoint, then try again", service)
            }
            Self::DecodingError { service, .. } => {
                format!("The {} endpoint returned an unexpected payload; verify the endpoint URL", service)
            }
            Self::IoError(_) => "Check that the journal directory exists and is writable".to_string(),
            Self::SerializationError(_) => {
                "The journal file may be corrupted; restore it from a backup".to_string()
            }
            Self::ValidationError { .. } => "Check the command arguments".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => format!("Required setting '{}' is missing", field),
            Self::TransportError { service, .. } => format!("Could not reach the {} service", service),
            Self::DecodingError { service, .. } => {
                format!("The {} service returned a response that could not be read", service)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MujiError>;
