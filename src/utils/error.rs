use thiserror::Error;

/// 被視為「權限不足」的 AWS 錯誤碼
pub const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDenied",
    "AccessDeniedException",
    "UnauthorizedOperation",
];

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("No AWS credentials found")]
    NoCredentials,

    #[error("Failed to authenticate: {message}")]
    Authentication { message: String },

    #[error("Access denied calling {operation} ({code})")]
    AccessDenied { operation: String, code: String },

    #[error("{operation} failed ({code}): {message}")]
    Service {
        operation: String,
        code: String,
        message: String,
    },

    #[error("No accounts found or accessible")]
    NoAccounts,

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Permission,
    Service,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InventoryError {
    /// 由 AWS 錯誤碼建立錯誤，權限類錯誤會歸到 `AccessDenied`
    pub fn from_service(operation: &str, code: Option<&str>, message: Option<&str>) -> Self {
        let code = code.unwrap_or("Unknown").to_string();
        if ACCESS_DENIED_CODES.contains(&code.as_str()) {
            return Self::AccessDenied {
                operation: operation.to_string(),
                code,
            };
        }
        Self::Service {
            operation: operation.to_string(),
            code,
            message: message.unwrap_or_default().to_string(),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// AWS 回傳的錯誤碼（若有）
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::AccessDenied { code, .. } | Self::Service { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoCredentials | Self::Authentication { .. } => ErrorCategory::Authentication,
            Self::AccessDenied { .. } | Self::NoAccounts => ErrorCategory::Permission,
            Self::Service { .. } => ErrorCategory::Service,
            Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Service { .. } => ErrorSeverity::Medium,
            Self::NoCredentials
            | Self::Authentication { .. }
            | Self::AccessDenied { .. }
            | Self::NoAccounts
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::CsvError(_) | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度決定程序結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::NoCredentials => "Configure AWS SSO:\n  1. Run: aws configure sso\n  2. Run: aws sso login --profile <your-profile>".to_string(),
            Self::Authentication { .. } => {
                "Your session may have expired. Run: aws sso login --profile <your-profile>"
                    .to_string()
            }
            Self::AccessDenied { operation, .. } if operation == "ListAccounts" => {
                "This tool requires organizations:ListAccounts permission.".to_string()
            }
            Self::AccessDenied { operation, .. } => {
                format!("Grant the caller permission for {}.", operation)
            }
            Self::NoAccounts => {
                "Check that the profile belongs to the organization management account."
                    .to_string()
            }
            Self::Service { .. } => "Check the AWS service status and try again.".to_string(),
            Self::CsvError(_) | Self::IoError(_) => {
                "Check that the output directory exists and is writable.".to_string()
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags.".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoCredentials => "ERROR: No AWS credentials found.".to_string(),
            Self::NoAccounts => "ERROR: No accounts found or accessible".to_string(),
            Self::AccessDenied { operation, .. } if operation == "ListAccounts" => {
                "ERROR: No permission to access AWS Organizations.".to_string()
            }
            other => format!("ERROR: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
