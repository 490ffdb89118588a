use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unrecognized record type '{tag}' on line {line}")]
    UnrecognizedRecordType { line: usize, tag: String },

    #[error("format drift in '{record}' record: {reason}")]
    FormatDrift {
        record: &'static str,
        reason: String,
    },

    #[error("unsupported {field} '{value}'")]
    UnsupportedValue { field: &'static str, value: String },

    #[error("consistency violation in '{record}' record: {reason}")]
    ConsistencyViolation {
        record: &'static str,
        reason: String,
    },

    #[error("command execution failed: {0}")]
    Command(#[from] io::Error),

    #[error("gpg exited with status {status}: {stderr}")]
    Gpg { status: i32, stderr: String },

    #[error("permission denied reading the keyring")]
    PermissionDenied,

    #[error("keyring not initialized")]
    KeyringNotInitialized,

    #[error("key listing is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported user-dirs locale '{0}' (only C is supported)")]
    UnsupportedLocale(String),

    #[error("invalid user-dirs line: {0}")]
    InvalidUserDirsLine(String),

    #[error("unknown user directory key: {0}")]
    UnknownUserDir(String),

    #[error("missing user directory key: {0}")]
    MissingUserDir(&'static str),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
