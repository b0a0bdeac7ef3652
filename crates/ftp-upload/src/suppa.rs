//! `suppaftp`-backed transport.

use std::fs::File;
use std::io::BufReader;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream, Mode};
use tracing::debug;

use crate::error::TransportError;
use crate::transport::{Connector, FtpSession};

/// Connects over plain FTP using the blocking `suppaftp` client.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppaConnector;

impl Connector for SuppaConnector {
    type Session = SuppaSession;

    fn connect(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<SuppaSession, TransportError> {
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|e| TransportError::Unreachable(format!("{host}:{port}: {e}")))?;

        let mut last_err = None;
        for addr in addrs {
            match open_stream(addr, timeout) {
                Ok(stream) => {
                    debug!(%addr, "control connection open");
                    return Ok(SuppaSession { stream });
                }
                Err(e) => {
                    debug!(%addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(TransportError::Unreachable(match last_err {
            Some(e) => format!("{host}:{port}: {e}"),
            None => format!("{host}:{port}: no address resolved"),
        }))
    }
}

/// Connects the socket and reads the welcome line.
///
/// `timeout` bounds the TCP connect and every later read and write on the
/// control socket, so a server that accepts and then stalls cannot block
/// the caller forever.
fn open_stream(addr: SocketAddr, timeout: Duration) -> Result<FtpStream, String> {
    let tcp = TcpStream::connect_timeout(&addr, timeout).map_err(|e| e.to_string())?;
    tcp.set_read_timeout(Some(timeout))
        .and_then(|()| tcp.set_write_timeout(Some(timeout)))
        .map_err(|e| e.to_string())?;
    FtpStream::connect_with_stream(tcp).map_err(|e| e.to_string())
}

/// One authenticated-or-not control connection.
pub struct SuppaSession {
    stream: FtpStream,
}

impl FtpSession for SuppaSession {
    fn login(&mut self, user: &str, password: &str) -> Result<(), TransportError> {
        self.stream.login(user, password).map_err(classify)
    }

    fn set_passive(&mut self, enabled: bool) {
        let mode = if enabled { Mode::Passive } else { Mode::Active };
        self.stream.set_mode(mode);
    }

    fn change_dir(&mut self, path: &str) -> Result<(), TransportError> {
        self.stream.cwd(path).map_err(classify)
    }

    fn make_dir(&mut self, path: &str) -> Result<(), TransportError> {
        self.stream.mkdir(path).map_err(classify)
    }

    fn put_binary(&mut self, remote_path: &str, local_path: &Path) -> Result<u64, TransportError> {
        let mut reader = BufReader::new(File::open(local_path)?);
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(classify)?;
        self.stream
            .put_file(remote_path, &mut reader)
            .map_err(classify)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.stream.quit().map_err(classify)
    }
}

/// Negative server replies are refusals; everything else is a fault.
fn classify(err: FtpError) -> TransportError {
    match err {
        FtpError::UnexpectedResponse(_) => TransportError::Rejected(err.to_string()),
        other => TransportError::Fault(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::time::Instant;

    /// Serves one connection: sends `220`, then answers each command line
    /// with the next canned reply. Once the replies run out the server goes
    /// quiet and holds the socket until `hold` is dropped.
    fn scripted_server(replies: &'static [&'static str]) -> (u16, mpsc::Sender<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (hold, held) = mpsc::channel::<()>();

        std::thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            sock.write_all(b"220 ready\r\n").unwrap();
            let mut reader = std::io::BufReader::new(sock.try_clone().unwrap());
            for reply in replies {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 {
                    return;
                }
                sock.write_all(reply.as_bytes()).unwrap();
            }
            let _ = held.recv();
        });

        (port, hold)
    }

    #[test]
    fn unresolvable_host_is_unreachable() {
        let result = SuppaConnector.connect("host.invalid", 21, Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::Unreachable(_))));
    }

    #[test]
    fn refused_port_is_unreachable() {
        // Bind then drop to get a local port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let result = SuppaConnector.connect("127.0.0.1", port, Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::Unreachable(_))));
    }

    #[test]
    fn stalled_server_times_out_after_welcome() {
        let (port, _hold) = scripted_server(&[]);

        let mut session = SuppaConnector
            .connect("127.0.0.1", port, Duration::from_secs(1))
            .unwrap();

        let started = Instant::now();
        let result = session.login("deploy", "pw");
        assert!(matches!(result, Err(TransportError::Fault(_))));
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "login blocked for {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn refused_login_is_rejected() {
        let (port, _hold) = scripted_server(&["530 Login incorrect\r\n"]);

        let mut session = SuppaConnector
            .connect("127.0.0.1", port, Duration::from_secs(2))
            .unwrap();

        let result = session.login("deploy", "wrong");
        assert!(matches!(result, Err(TransportError::Rejected(_))));
    }

    #[test]
    fn connection_errors_are_faults() {
        let err = FtpError::ConnectionError(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset by peer",
        ));
        match classify(err) {
            TransportError::Fault(detail) => assert!(detail.contains("reset by peer")),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn malformed_replies_are_faults() {
        assert!(matches!(
            classify(FtpError::BadResponse),
            TransportError::Fault(_)
        ));
    }
}
