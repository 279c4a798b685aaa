use std::path::PathBuf;

use url::Url;

use crate::reqwest::{ReqwestErrorContext, ReqwestInnerError, ReqwestStage};

pub type Result<T> = std::result::Result<T, UtilsError>;

#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    #[error("Failed to get base directories.")]
    BaseDirsFailed,

    #[error("Failed to create directory: {0:?}. (Error: {1:?})")]
    CreateDirAllFailed(PathBuf, std::io::Error),

    #[error("Failed to read the file: {0:?}. (Error: {1:?})")]
    FileReadFailed(PathBuf, std::io::Error),

    #[error("Failed to open the log file: {0:?}. (Error: {1:?})")]
    LogFileOpenFailed(PathBuf, std::io::Error),

    #[error("Logging is already initialised. (Error: {0})")]
    LogInitFailed(String),

    #[error("Parsing the toml file failed: {0:?}. (Error: {1:?})")]
    TomlParsingFailed(PathBuf, toml::de::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Base URL must use http or https: {0}")]
    UnsupportedUrlScheme(Url),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    SerdePathToError(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("Please check that the backend is running, the URL seems to be unreachable: {0}")]
    Internet(Url),

    #[error("Request '{url}' failed at stage '{stage:?}' (Error='{inner:?}', Context='{context:?}')", url = context.url)]
    ReqwestFailed {
        stage: ReqwestStage,
        context: Box<ReqwestErrorContext>,
        inner: ReqwestInnerError,
    },

    #[error("Reqwest builder missing error context, this is a bug please report it.")]
    ReqwestErrorContextMissing,

    #[error("Task aborted due to shutdown.")]
    AbortDueToShutdown,
}

impl UtilsError {
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Internet(_) => true,
            Self::ReqwestFailed { inner, .. } => inner.is_connect(),
            _ => false,
        }
    }

    /// HTTP status of the response, if the request got that far.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::ReqwestFailed {
                inner: ReqwestInnerError::Reqwest(err),
                ..
            } => err.status(),
            _ => None,
        }
    }
}
