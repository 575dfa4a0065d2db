use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving configuration or uploading files
#[derive(Error, Debug)]
pub enum Error {
    /// No files were named on the command line, or the flags did not parse
    #[error("no files to upload")]
    Usage,

    #[error("No bucket name given")]
    MissingBucket,

    #[error("Both AccessKey and SecretKey should be set")]
    MissingCredentials,

    /// Region name not present in the region registry
    #[error("Invalid region provided: {region:?}")]
    InvalidRegion { region: String },

    /// ACL name not present in the ACL registry
    #[error("Invalid ACL provided: {acl:?}")]
    InvalidAcl { acl: String },

    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("seek {}: {source}", path.display())]
    Seek {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directories, pipes and sockets cannot be sized and rewound
    #[error("{} is not a regular file", path.display())]
    NotRegularFile { path: PathBuf },

    #[error("{} has no file name to use as an object key", path.display())]
    InvalidFileName { path: PathBuf },

    /// S3 rejected the PUT, or the request never completed
    #[error("upload of {key} failed: {message}")]
    Upload { key: String, message: String },
}

/// Coarse classification of [`Error`], matching how the CLI reacts to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Config,
    LocalIo,
    Remote,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage => ErrorKind::Usage,
            Self::MissingBucket
            | Self::MissingCredentials
            | Self::InvalidRegion { .. }
            | Self::InvalidAcl { .. } => ErrorKind::Config,
            Self::Open { .. }
            | Self::Stat { .. }
            | Self::Read { .. }
            | Self::Seek { .. }
            | Self::NotRegularFile { .. }
            | Self::InvalidFileName { .. } => ErrorKind::LocalIo,
            Self::Upload { .. } => ErrorKind::Remote,
        }
    }
}

/// Result type for s3put operations
pub type Result<T> = std::result::Result<T, Error>;
