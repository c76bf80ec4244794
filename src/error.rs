#![forbid(unsafe_code)]

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("error opening {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file read failure: {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file read failure: {}: wanted {wanted} bytes, got {got}", path.display())]
    ShortRead {
        path: PathBuf,
        wanted: usize,
        got: usize,
    },

    #[error("file write failure: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("mkdir {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stat {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid pak {}: {reason}", path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    #[error("invalid pak entry {name} in {}: {reason}", path.display())]
    InvalidEntry {
        path: PathBuf,
        name: String,
        reason: String,
    },

    #[error("getcwd failed: {0}")]
    Cwd(#[source] std::io::Error),

    #[error("expand_path called without qdir set")]
    NoQdir,

    #[error("bad hex number: {0}")]
    BadNumber(String),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
