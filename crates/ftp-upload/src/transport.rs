//! Transport seam between the uploader and an FTP implementation.
//!
//! The uploader only sees these traits, so the upload flow can be driven
//! against `suppaftp` in production and against recording mocks in tests.

use std::path::Path;
use std::time::Duration;

use crate::error::TransportError;

/// Opens sessions against a server.
pub trait Connector {
    type Session: FtpSession;

    /// Opens a control connection to `host:port`, giving up after `timeout`.
    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Session, TransportError>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Session = C::Session;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self::Session, TransportError> {
        (**self).connect(host, port, timeout)
    }
}

/// An open control connection.
///
/// All calls block until the server answers or the transport times out.
pub trait FtpSession {
    /// Authenticates. An empty password is sent as-is for anonymous access.
    fn login(&mut self, user: &str, password: &str) -> Result<(), TransportError>;

    /// Selects passive (`true`) or active data connections.
    fn set_passive(&mut self, enabled: bool);

    /// Changes the remote working directory.
    fn change_dir(&mut self, path: &str) -> Result<(), TransportError>;

    /// Creates a directory relative to the remote working directory.
    fn make_dir(&mut self, path: &str) -> Result<(), TransportError>;

    /// Stores `local_path` at `remote_path` in binary mode.
    ///
    /// Returns the number of bytes sent.
    fn put_binary(&mut self, remote_path: &str, local_path: &Path) -> Result<u64, TransportError>;

    /// Ends the session.
    fn close(&mut self) -> Result<(), TransportError>;
}
