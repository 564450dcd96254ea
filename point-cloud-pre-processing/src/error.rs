use point_cloud_format::PlyError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Usage(String),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("LAS/LAZ error: {0}")]
    Las(#[from] las::Error),
    #[error(transparent)]
    Ply(#[from] PlyError),
    #[error("unsupported input format: {0}")]
    UnsupportedInput(String),
    #[error("{0} contains no points")]
    Empty(PathBuf),
    #[error("metadata serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("progress bar template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
