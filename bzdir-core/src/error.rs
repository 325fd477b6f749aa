use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BzdirError {
    #[error("ERROR: {flags} must be set for Mode {mode}")]
    MissingArgument { mode: u8, flags: &'static str },

    #[error("cannot read directory {}: {source}", path.display())]
    DirectoryInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot access file {}: {source}", path.display())]
    FileInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt compressed input {}: {source}", path.display())]
    CorruptInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit log error: {0}")]
    AuditLog(#[from] csv::Error),
}

impl BzdirError {
    pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BzdirError::FileInaccessible { path, source }
    }

    pub(crate) fn dir(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| BzdirError::DirectoryInaccessible { path, source }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, BzdirError>;
