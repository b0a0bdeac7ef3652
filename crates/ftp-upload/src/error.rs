//! Error types for the upload flow.

/// Failure of a single transport primitive.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("server rejected command: {0}")]
    Rejected(String),

    #[error("local file error: {0}")]
    LocalFile(#[from] std::io::Error),

    #[error("transport fault: {0}")]
    Fault(String),
}

/// Failure while ensuring the remote directory tree.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("no open session")]
    NotConnected,

    #[error("directory segment `{segment}` could not be created or entered: {reason}")]
    Segment {
        segment: String,
        #[source]
        reason: TransportError,
    },
}

/// Reason a `put` cycle did not complete.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to connect to {host} as {user}: {source}")]
    Connection {
        host: String,
        user: String,
        #[source]
        source: TransportError,
    },

    #[error("directory for {remote} could not be prepared: {source}")]
    Directory {
        remote: String,
        #[source]
        source: DirectoryError,
    },

    #[error("file could not be transferred to {remote}: {source}")]
    Transfer {
        remote: String,
        #[source]
        source: TransportError,
    },

    #[error("transfer to {remote} ended with a fault: {detail}")]
    Fault { remote: String, detail: String },
}

/// Errors produced while loading uploader configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("missing field: {0}")]
    Missing(&'static str),
}
