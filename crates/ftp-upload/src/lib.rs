//! Single-file FTP upload.
//!
//! Connects, makes sure every directory of the destination path exists,
//! stores the file in binary mode and closes the session again, whatever
//! happened in between. Decisions are reported to an optional, borrowed
//! [`LogSink`].
//!
//! # Example
//!
//! ```no_run
//! use ftpput_upload::{ConnectionParams, FtpUploader, SuppaConnector, TracingSink};
//!
//! let params = ConnectionParams::new("ftp.example.com", "deploy").with_password("secret");
//! let mut uploader = FtpUploader::new(SuppaConnector, params).with_logger(&TracingSink);
//! if !uploader.put("/releases/1.2/app.tar.gz", "target/app.tar.gz") {
//!     eprintln!("upload failed, see log");
//! }
//! ```

pub mod config;
pub mod error;
pub mod path;
pub mod sink;
pub mod suppa;
pub mod transport;
pub mod types;
pub mod uploader;

use std::time::Duration;

pub use config::UploaderConfig;
pub use error::{ConfigError, DirectoryError, TransportError, UploadError};
pub use sink::{LogLevel, LogSink, LogTarget, TracingSink};
pub use suppa::{SuppaConnector, SuppaSession};
pub use transport::{Connector, FtpSession};
pub use types::{
    ConnectionParams, DirectoryReport, SegmentOutcome, SegmentStatus, SessionState, UploadReport,
};
pub use uploader::{FtpUploader, put_and_close};

/// Standard FTP control port.
pub const DEFAULT_PORT: u16 = 21;

/// Connect timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);
