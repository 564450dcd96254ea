use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlyError {
    #[error("file does not start with the 'ply' magic")]
    BadMagic,

    #[error("malformed PLY header: {0}")]
    Header(String),

    #[error("unsupported PLY format '{0}'")]
    UnsupportedFormat(String),

    #[error("unsupported PLY property type '{0}'")]
    UnsupportedType(String),

    #[error("vertex element has no '{0}' property")]
    MissingProperty(&'static str),

    #[error("vertex data truncated after {read} of {expected} vertices")]
    Truncated { read: usize, expected: usize },

    #[error("point cloud contains no vertices")]
    Empty,
}
