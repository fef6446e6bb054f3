use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no element with id `{0}` is mounted")]
    UnknownElement(String),
}
