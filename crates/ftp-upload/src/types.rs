//! Data types shared by the upload flow.

use std::fmt;
use std::time::Duration;

use crate::{DEFAULT_PORT, DEFAULT_TIMEOUT};

/// How to reach and authenticate against a server.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub user: String,
    /// Empty means anonymous access.
    pub password: String,
    pub port: u16,
    pub timeout: Duration,
}

impl ConnectionParams {
    /// Parameters with an empty password, port 21 and a 90 second timeout.
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: String::new(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Whether the uploader currently holds a control connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Connected,
}

/// What happened to one directory segment during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    /// The segment could be entered directly.
    Existed,
    /// The segment was missing and has been created.
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOutcome {
    pub name: String,
    pub status: SegmentStatus,
}

/// Per-segment result of ensuring a remote directory tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub segments: Vec<SegmentOutcome>,
}

impl DirectoryReport {
    /// Number of segments that had to be created.
    pub fn created(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.status == SegmentStatus::Created)
            .count()
    }
}

/// Result of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub remote_path: String,
    pub bytes: u64,
    pub directories: DirectoryReport,
}
