//! UDP receive loop.
//!
//! The socket is bound on the caller's thread so that bind failures surface
//! immediately, then moved into a background thread that polls the running
//! flag after every read timeout. The socket is dropped when the loop
//! returns, whichever way it exits.

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::message::{decode_datagram, Message};
use crate::queue::{MessageSink, ReceiverEvent};

/// Pause after an unexpected receive error before trying again.
const FAULT_BACKOFF: Duration = Duration::from_millis(100);

/// Bind the configured address and arm the read timeout.
pub fn bind(cfg: &MonitorConfig) -> Result<UdpSocket, MonitorError> {
    let addr = cfg.bind_addr();
    let socket = UdpSocket::bind(addr).map_err(|source| MonitorError::Bind { addr, source })?;
    socket
        .set_read_timeout(Some(cfg.recv_timeout()))
        .map_err(MonitorError::Socket)?;
    Ok(socket)
}

/// Receive datagrams until `running` is cleared or the consumer goes away.
///
/// Takes ownership of `socket`; it is closed before this function returns.
pub fn run_receive_loop(
    socket: UdpSocket,
    sink: MessageSink,
    running: Arc<AtomicBool>,
    max_datagram: usize,
) {
    let mut buf = vec![0u8; max_datagram];
    while running.load(Ordering::SeqCst) {
        match socket.recv_from(&mut buf) {
            Ok((n, source)) => {
                if !running.load(Ordering::SeqCst) {
                    log::debug!("Dropping {} bytes from {} received after stop", n, source);
                    break;
                }
                let text = decode_datagram(&buf[..n]);
                log::debug!("{} bytes from {}: {}", n, source, text);
                if !sink.push_message(Message::new(text, source)) {
                    log::debug!("Display queue closed, stopping receiver");
                    break;
                }
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                continue;
            }
            Err(e) => {
                log::warn!("UDP receive error: {}", e);
                if !sink.push(ReceiverEvent::Fault(e.to_string())) {
                    break;
                }
                std::thread::sleep(FAULT_BACKOFF);
            }
        }
    }
    drop(socket);
    let _ = sink.push(ReceiverEvent::Stopped);
    log::info!("Receiver stopped");
}

/// Run [`run_receive_loop`] on a named background thread.
pub fn spawn(
    socket: UdpSocket,
    sink: MessageSink,
    running: Arc<AtomicBool>,
    max_datagram: usize,
) -> Result<JoinHandle<()>, MonitorError> {
    std::thread::Builder::new()
        .name("udp-receiver".to_owned())
        .spawn(move || run_receive_loop(socket, sink, running, max_datagram))
        .map_err(MonitorError::Spawn)
}
