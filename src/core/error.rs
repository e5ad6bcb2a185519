use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    RootNotFound,
    RootNotADirectory,
    ScanInvalidPattern,

    FilePermissionDenied,
    FileIoFailed,
    RewriteValueMissing,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RootNotFound => "root.not_found",
            ErrorCode::RootNotADirectory => "root.not_a_directory",
            ErrorCode::ScanInvalidPattern => "scan.invalid_pattern",

            ErrorCode::FilePermissionDenied => "file.permission_denied",
            ErrorCode::FileIoFailed => "file.io_failed",
            ErrorCode::RewriteValueMissing => "rewrite.value_missing",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootDetails {
    pub root: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanInvalidPatternDetails {
    pub pattern: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePermissionDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIoDetails {
    pub path: String,
    pub operation: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueMissingDetails {
    pub line: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn root_not_found(root: impl Into<String>) -> Self {
        let root = root.into();
        let details = serde_json::to_value(RootDetails { root: root.clone() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RootNotFound,
            format!("{}/ directory not found in current directory", root),
            details,
        )
        .with_hint("Run from the directory containing the compose tree, or pass --root")
    }

    pub fn root_not_a_directory(root: impl Into<String>) -> Self {
        let root = root.into();
        let details = serde_json::to_value(RootDetails { root: root.clone() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RootNotADirectory,
            format!("{} exists but is not a directory", root),
            details,
        )
    }

    pub fn scan_invalid_pattern(pattern: impl Into<String>, error: impl Into<String>) -> Self {
        let details = serde_json::to_value(ScanInvalidPatternDetails {
            pattern: pattern.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ScanInvalidPattern,
            "Invalid file discovery pattern",
            details,
        )
    }

    pub fn file_permission_denied(path: impl Into<String>, error: impl Into<String>) -> Self {
        let path = path.into();
        let details = serde_json::to_value(FilePermissionDetails {
            path: path.clone(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::FilePermissionDenied,
            format!("Cannot read/write file: {}", path),
            details,
        )
    }

    pub fn file_io_failed(
        path: impl Into<String>,
        operation: &str,
        error: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let error = error.into();
        let details = serde_json::to_value(FileIoDetails {
            path: path.clone(),
            operation: operation.to_string(),
            error: error.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::FileIoFailed,
            format!("Failed to {} {}: {}", operation, path, error),
            details,
        )
    }

    pub fn rewrite_value_missing(line: impl Into<String>) -> Self {
        let details = serde_json::to_value(ValueMissingDetails { line: line.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::RewriteValueMissing,
            "Label line has no '=' to parse a value from",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalJsonErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
