//! The uploader: connect, ensure the remote directory, transfer, close.

use std::path::Path;

use tracing::debug;

use crate::error::{DirectoryError, TransportError, UploadError};
use crate::path;
use crate::sink::{LogLevel, LogSink, LogTarget};
use crate::transport::{Connector, FtpSession};
use crate::types::{
    ConnectionParams, DirectoryReport, SegmentOutcome, SegmentStatus, SessionState, UploadReport,
};

/// Pushes single files to one FTP server.
///
/// Each [`put`](Self::put) runs a full connect → transfer → close cycle,
/// so one uploader can be reused for any number of files, one at a time.
pub struct FtpUploader<'a, C: Connector> {
    connector: C,
    params: ConnectionParams,
    session: Option<C::Session>,
    logger: LogTarget<'a>,
}

impl<'a, C: Connector> FtpUploader<'a, C> {
    /// Creates a closed uploader with no log sink.
    pub fn new(connector: C, params: ConnectionParams) -> Self {
        Self {
            connector,
            params,
            session: None,
            logger: LogTarget::Silent,
        }
    }

    /// Builder form of [`set_logger`](Self::set_logger).
    pub fn with_logger(mut self, sink: &'a dyn LogSink) -> Self {
        self.set_logger(sink);
        self
    }

    /// Routes all further records to `sink`.
    pub fn set_logger(&mut self, sink: &'a dyn LogSink) {
        self.logger = LogTarget::Sink(sink);
    }

    /// Drops all further records.
    pub fn clear_logger(&mut self) {
        self.logger = LogTarget::Silent;
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::Connected
        } else {
            SessionState::Closed
        }
    }

    /// Opens and authenticates a session, then selects passive mode.
    ///
    /// Failure is reported through the log sink and by the returned state
    /// remaining [`SessionState::Closed`].
    pub fn establish_connection(&mut self) -> SessionState {
        let _ = self.connect();
        self.state()
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        self.close();

        let ConnectionParams {
            host,
            user,
            password,
            port,
            timeout,
        } = &self.params;

        let opened = self
            .connector
            .connect(host, *port, *timeout)
            .and_then(|mut session| match session.login(user, password) {
                Ok(()) => Ok(session),
                Err(e) => {
                    // The transport is open even though login failed.
                    if let Err(close_err) = session.close() {
                        debug!(error = %close_err, "close after failed login");
                    }
                    Err(e)
                }
            });

        match opened {
            Ok(mut session) => {
                session.set_passive(true);
                self.session = Some(session);
                debug!(%host, port, %user, "session established");
                self.log(LogLevel::Info, &format!("connected to {host} as {user}"));
                Ok(())
            }
            Err(e) => {
                debug!(%host, port, %user, error = %e, "connection not established");
                self.log(
                    LogLevel::Error,
                    &format!("failed to connect to {host} as {user}"),
                );
                Err(e)
            }
        }
    }

    /// Uploads `local_path` to `remote_path`, creating missing directories.
    ///
    /// Never fails loudly: the outcome is the return value plus the records
    /// sent to the log sink.
    pub fn put(&mut self, remote_path: &str, local_path: impl AsRef<Path>) -> bool {
        self.put_detailed(remote_path, local_path).is_ok()
    }

    /// Same as [`put`](Self::put) but returns the structured outcome.
    ///
    /// The session is closed before this returns whenever it was opened.
    pub fn put_detailed(
        &mut self,
        remote_path: &str,
        local_path: impl AsRef<Path>,
    ) -> Result<UploadReport, UploadError> {
        let local_path = local_path.as_ref();

        if let Err(source) = self.connect() {
            return Err(UploadError::Connection {
                host: self.params.host.clone(),
                user: self.params.user.clone(),
                source,
            });
        }

        let mut guard = SessionGuard { uploader: self };
        let result = guard.uploader.transfer(remote_path, local_path);
        guard.uploader.report(&result, local_path);
        result
    }

    fn transfer(
        &mut self,
        remote_path: &str,
        local_path: &Path,
    ) -> Result<UploadReport, UploadError> {
        let directories = self
            .create_dir(remote_path)
            .map_err(|source| UploadError::Directory {
                remote: remote_path.to_string(),
                source,
            })?;

        let Some(session) = self.session.as_mut() else {
            return Err(UploadError::Fault {
                remote: remote_path.to_string(),
                detail: "session closed before transfer".into(),
            });
        };

        let target = path::transfer_target(remote_path);
        debug!(remote = %remote_path, %target, local = %local_path.display(), "starting transfer");

        match session.put_binary(target, local_path) {
            Ok(bytes) => Ok(UploadReport {
                remote_path: remote_path.to_string(),
                bytes,
                directories,
            }),
            Err(TransportError::Fault(detail)) => Err(UploadError::Fault {
                remote: remote_path.to_string(),
                detail,
            }),
            Err(source) => Err(UploadError::Transfer {
                remote: remote_path.to_string(),
                source,
            }),
        }
    }

    fn report(&self, result: &Result<UploadReport, UploadError>, local_path: &Path) {
        match result {
            Ok(report) => self.log(
                LogLevel::Info,
                &format!(
                    "file {} transferred to {} ({} bytes)",
                    local_path.display(),
                    report.remote_path,
                    report.bytes
                ),
            ),
            Err(e @ UploadError::Fault { .. }) => self.log(LogLevel::Critical, &e.to_string()),
            Err(e) => self.log(LogLevel::Error, &e.to_string()),
        }
    }

    /// Walks the directory portion of `remote_path`, creating missing
    /// segments one level at a time.
    ///
    /// Absolute paths are walked from the server root, relative ones from
    /// the current remote directory. The session is left inside the last
    /// segment. Stops at the first segment that can neither be entered nor
    /// created.
    pub fn create_dir(&mut self, remote_path: &str) -> Result<DirectoryReport, DirectoryError> {
        let session = self.session.as_mut().ok_or(DirectoryError::NotConnected)?;

        let segments = path::directory_segments(remote_path);
        let mut report = DirectoryReport::default();
        if segments.is_empty() {
            return Ok(report);
        }

        if path::is_absolute(remote_path) {
            session
                .change_dir("/")
                .map_err(|reason| DirectoryError::Segment {
                    segment: "/".into(),
                    reason,
                })?;
        }

        for segment in segments {
            let status = ensure_segment(session, segment)?;
            report.segments.push(SegmentOutcome {
                name: segment.to_string(),
                status,
            });
        }

        Ok(report)
    }

    /// Ends the session if one is open.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.close() {
                debug!(host = %self.params.host, error = %e, "error while closing session");
            }
            debug!(host = %self.params.host, "session closed");
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logger.log(level, message);
    }
}

impl<C: Connector> Drop for FtpUploader<'_, C> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Enters `segment`, creating it first if it cannot be entered.
fn ensure_segment<S: FtpSession>(
    session: &mut S,
    segment: &str,
) -> Result<SegmentStatus, DirectoryError> {
    if session.change_dir(segment).is_ok() {
        debug!(%segment, "segment exists");
        return Ok(SegmentStatus::Existed);
    }

    match session.make_dir(segment) {
        Ok(()) => {
            debug!(%segment, "segment created");
            session
                .change_dir(segment)
                .map(|()| SegmentStatus::Created)
                .map_err(|reason| DirectoryError::Segment {
                    segment: segment.to_string(),
                    reason,
                })
        }
        // Someone else may have created it in the meantime.
        Err(mkdir_err) => match session.change_dir(segment) {
            Ok(()) => Ok(SegmentStatus::Existed),
            Err(_) => Err(DirectoryError::Segment {
                segment: segment.to_string(),
                reason: mkdir_err,
            }),
        },
    }
}

/// Closes the uploader's session when dropped.
struct SessionGuard<'u, 'a, C: Connector> {
    uploader: &'u mut FtpUploader<'a, C>,
}

impl<C: Connector> Drop for SessionGuard<'_, '_, C> {
    fn drop(&mut self) {
        self.uploader.close();
    }
}

/// One-shot upload with a transient uploader.
pub fn put_and_close<C: Connector>(
    connector: C,
    params: ConnectionParams,
    remote_path: &str,
    local_path: impl AsRef<Path>,
    sink: Option<&dyn LogSink>,
) -> bool {
    let mut uploader = FtpUploader::new(connector, params);
    uploader.logger = LogTarget::from(sink);
    uploader.put(remote_path, local_path)
}
