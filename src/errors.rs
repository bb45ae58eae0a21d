use http::StatusCode;
use thiserror::Error;

const MIB: f64 = 1024.0 * 1024.0;

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / MIB
}

/// Every failure the log viewer can report to a client.
///
/// Detection happens in the domain layer; the api layer decides how a
/// variant is presented (JSON envelope or HTML page).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid filename - directory traversal not allowed")]
    InvalidFilename,

    #[error("Invalid file type - only .txt and .log files are allowed")]
    InvalidFileType,

    #[error("Logs directory not found")]
    DirectoryNotFound,

    #[error("Log file not found")]
    FileNotFound,

    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    #[error("Permission denied - {0}")]
    PermissionDenied(String),

    #[error("Path is a directory, not a file")]
    IsADirectory,

    #[error("File too large ({:.2}MB). Maximum size is {}MB", mib(.size), mib(.limit))]
    PayloadTooLarge { size: u64, limit: u64 },

    #[error("Too many requests")]
    TooManyRequests { retry_after_secs: u64 },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> AppError {
    AppError::InternalError(err.to_string())
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFilename => StatusCode::BAD_REQUEST,
            AppError::InvalidFileType => StatusCode::BAD_REQUEST,
            AppError::DirectoryNotFound => StatusCode::NOT_FOUND,
            AppError::FileNotFound => StatusCode::NOT_FOUND,
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::IsADirectory => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable name of the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidFilename => "InvalidFilename",
            AppError::InvalidFileType => "InvalidFileType",
            AppError::DirectoryNotFound => "DirectoryNotFound",
            AppError::FileNotFound => "FileNotFound",
            AppError::RouteNotFound { .. } => "RouteNotFound",
            AppError::PermissionDenied(_) => "PermissionDenied",
            AppError::IsADirectory => "IsADirectory",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::TooManyRequests { .. } => "TooManyRequests",
            AppError::RequestTimeout => "RequestTimeout",
            AppError::InternalError(_) => "InternalError",
        }
    }

    /// Human-facing category shown as the error "type".
    pub fn error_type(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::REQUEST_TIMEOUT => "Request Timeout",
            StatusCode::PAYLOAD_TOO_LARGE => "File Too Large",
            StatusCode::TOO_MANY_REQUESTS => "Too Many Requests",
            _ => "Internal Server Error",
        }
    }

    /// Message safe to return to a client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InternalError(_) => "An internal server error occurred".to_string(),
            AppError::TooManyRequests { .. } => {
                "Rate limit exceeded. Please wait before making more requests".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        match self.status_code() {
            StatusCode::BAD_REQUEST => &[
                "Check the URL format",
                "Verify request parameters",
                "Ensure proper file path syntax",
            ],
            StatusCode::FORBIDDEN => &[
                "Check file permissions",
                "Verify you have access to this log file",
                "Contact system administrator",
            ],
            StatusCode::NOT_FOUND => &[
                "Check if the log file exists",
                "Verify the file path is correct",
                "Return to the main page to see available files",
            ],
            StatusCode::REQUEST_TIMEOUT => &[
                "Try refreshing the page",
                "Check your internet connection",
                "The log file might be too large",
            ],
            StatusCode::PAYLOAD_TOO_LARGE => &[
                "Try downloading the file instead",
                "Use command line tools for large files",
                "Contact administrator to split the log file",
            ],
            StatusCode::TOO_MANY_REQUESTS => &[
                "Wait a minute before trying again",
                "Reduce the frequency of requests",
                "Contact administrator if this persists",
            ],
            _ => &[
                "Try refreshing the page",
                "Check if the server is running properly",
                "Contact system administrator if the problem persists",
            ],
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status_code().as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
    }
}
