use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Object not found: {name}")]
    ObjectNotFound { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Remote,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CodegenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CodegenError::InvalidPackageName(_) => ErrorCategory::Input,
            CodegenError::ConfigError { .. }
            | CodegenError::InvalidConfigValue { .. }
            | CodegenError::MissingConfig { .. } => ErrorCategory::Configuration,
            CodegenError::ApiError(_)
            | CodegenError::ApiStatus { .. }
            | CodegenError::AuthError { .. }
            | CodegenError::ObjectNotFound { .. } => ErrorCategory::Remote,
            CodegenError::ZipError(_)
            | CodegenError::IoError(_)
            | CodegenError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CodegenError::ObjectNotFound { .. }
            | CodegenError::ApiError(_)
            | CodegenError::ApiStatus { .. } => ErrorSeverity::Medium,
            CodegenError::InvalidPackageName(_)
            | CodegenError::ConfigError { .. }
            | CodegenError::InvalidConfigValue { .. }
            | CodegenError::MissingConfig { .. }
            | CodegenError::AuthError { .. } => ErrorSeverity::High,
            CodegenError::ZipError(_)
            | CodegenError::IoError(_)
            | CodegenError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CodegenError::InvalidPackageName(name) => {
                format!("'{}' is not a valid Java package name", name)
            }
            CodegenError::AuthError { .. } => {
                "Could not log in to the platform with the configured credentials".to_string()
            }
            CodegenError::ObjectNotFound { name } => {
                format!("The org has no object named '{}'", name)
            }
            CodegenError::ApiError(_) | CodegenError::ApiStatus { .. } => {
                format!("The metadata API call failed: {}", self)
            }
            CodegenError::MissingConfig { field } => {
                format!("Required setting '{}' is not set", field)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Use dot-separated segments that start with a letter, e.g. com.example.model"
            }
            ErrorCategory::Configuration => "Check the config file and command line options",
            ErrorCategory::Remote => match self {
                CodegenError::AuthError { .. } => {
                    "Verify username, password (with security token) and OAuth client settings"
                }
                CodegenError::ObjectNotFound { .. } => {
                    "Check the object API name, custom objects end with __c"
                }
                _ => "Check network access to the instance and retry",
            },
            ErrorCategory::Output => "Check that the output directory is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CodegenError>;
