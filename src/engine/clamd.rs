//! clamd client speaking the `zINSTREAM` protocol over TCP or a Unix socket.

use super::error::EngineError;
use super::settings::ClamdSettings;
use super::traits::{ScanEngine, ScanVerdict};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::trace;

/// Chunk size for streamed file content. Must stay below clamd's StreamMaxLength.
const CHUNK_SIZE: usize = 64 * 1024;

/// Where clamd listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClamdAddress {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

impl std::fmt::Display for ClamdAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "{host}:{port}"),
            Self::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}

trait ClamdStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> ClamdStream for T {}

/// Scan engine backed by a running clamd daemon.
#[derive(Debug, Clone)]
pub struct ClamdEngine {
    address: ClamdAddress,
    timeout: Duration,
}

impl ClamdEngine {
    pub fn new(address: ClamdAddress, timeout: Duration) -> Self {
        Self { address, timeout }
    }

    pub fn from_settings(settings: &ClamdSettings) -> Self {
        let address = match &settings.socket {
            Some(socket) => ClamdAddress::Unix(socket.clone()),
            None => ClamdAddress::Tcp {
                host: settings.host.clone(),
                port: settings.port,
            },
        };
        Self::new(address, settings.timeout)
    }

    pub fn address(&self) -> &ClamdAddress {
        &self.address
    }

    async fn connect(&self) -> Result<Box<dyn ClamdStream>, EngineError> {
        let connect_err = |source| EngineError::Connect {
            address: self.address.to_string(),
            source,
        };
        match &self.address {
            ClamdAddress::Tcp { host, port } => {
                let stream = TcpStream::connect((host.as_str(), *port))
                    .await
                    .map_err(connect_err)?;
                Ok(Box::new(stream))
            }
            #[cfg(unix)]
            ClamdAddress::Unix(path) => {
                let stream = tokio::net::UnixStream::connect(path)
                    .await
                    .map_err(connect_err)?;
                Ok(Box::new(stream))
            }
            #[cfg(not(unix))]
            ClamdAddress::Unix(_) => Err(connect_err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "unix sockets are not supported on this platform",
            ))),
        }
    }

    async fn ping_inner(&self) -> Result<(), EngineError> {
        let mut stream = self.connect().await?;
        stream.write_all(b"zPING\0").await?;
        let reply = read_reply(&mut stream).await?;
        if reply.trim_end_matches('\0').trim() == "PONG" {
            Ok(())
        } else {
            Err(EngineError::Protocol(reply))
        }
    }

    async fn scan_inner(&self, path: &Path) -> Result<ScanVerdict, EngineError> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut stream = self.connect().await?;
        stream.write_all(b"zINSTREAM\0").await?;

        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            // n <= CHUNK_SIZE, well inside u32
            stream.write_all(&(n as u32).to_be_bytes()).await?;
            stream.write_all(&buf[..n]).await?;
        }
        stream.write_all(&[0, 0, 0, 0]).await?;
        stream.flush().await?;

        let reply = read_reply(&mut stream).await?;
        trace!(path = %path.display(), reply = %reply, "clamd reply");
        parse_reply(&reply)
    }
}

async fn read_reply(stream: &mut Box<dyn ClamdStream>) -> Result<String, EngineError> {
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Parse a clamd stream reply into a verdict.
///
/// Replies are NUL or newline separated; with `AllMatchScan` enabled clamd
/// sends one `FOUND` line per signature.
pub fn parse_reply(reply: &str) -> Result<ScanVerdict, EngineError> {
    let lines: Vec<&str> = reply
        .split(['\0', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(EngineError::Protocol("empty reply".to_string()));
    }

    let mut verdict = ScanVerdict::clean();
    for line in lines {
        let body = line
            .split_once(": ")
            .map_or(line, |(_, rest)| rest)
            .trim();

        if let Some(message) = body.strip_suffix("ERROR") {
            return Err(EngineError::Engine(message.trim().to_string()));
        }

        if body == "OK" {
            continue;
        }

        match body.strip_suffix("FOUND") {
            Some(name) => {
                verdict.infected = true;
                let name = name.trim();
                if !name.is_empty() {
                    verdict.viruses.push(name.to_string());
                }
            }
            None => return Err(EngineError::Protocol(line.to_string())),
        }
    }

    Ok(verdict)
}

#[async_trait]
impl ScanEngine for ClamdEngine {
    fn name(&self) -> &str {
        "clamd"
    }

    async fn ping(&self) -> Result<(), EngineError> {
        tokio::time::timeout(self.timeout, self.ping_inner())
            .await
            .map_err(|_| EngineError::Timeout(self.timeout))?
    }

    async fn scan(&self, path: &Path) -> Result<ScanVerdict, EngineError> {
        tokio::time::timeout(self.timeout, self.scan_inner(path))
            .await
            .map_err(|_| EngineError::Timeout(self.timeout))?
    }
}
