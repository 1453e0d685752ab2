//! Error type shared by the receiver, session and sensor programs.

use std::fmt;
use std::io;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum MonitorError {
    /// The UDP socket could not be bound (address in use, unknown interface, ...).
    Bind { addr: SocketAddr, source: io::Error },
    /// A socket option or query failed after binding.
    Socket(io::Error),
    /// The receiver thread could not be spawned.
    Spawn(io::Error),
    /// Configuration could not be read or parsed.
    Config(String),
    /// The Ctrl+C handler could not be installed.
    Signal(String),
    /// The ADC channel could not be read or did not hold an integer.
    Sensor { path: String, reason: String },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MonitorError::*;
        match self {
            Bind { addr, source } => write!(f, "failed to bind UDP socket on {addr}: {source}"),
            Socket(e) => write!(f, "socket error: {e}"),
            Spawn(e) => write!(f, "failed to spawn receiver thread: {e}"),
            Config(msg) => write!(f, "invalid configuration: {msg}"),
            Signal(msg) => write!(f, "failed to install interrupt handler: {msg}"),
            Sensor { path, reason } => write!(f, "failed to read {path}: {reason}"),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Bind { source, .. } => Some(source),
            MonitorError::Socket(e) | MonitorError::Spawn(e) => Some(e),
            MonitorError::Config(_) | MonitorError::Signal(_) | MonitorError::Sensor { .. } => None,
        }
    }
}
