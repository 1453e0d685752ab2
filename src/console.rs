//! Console variant: print every datagram as it arrives.

use std::io::{self, ErrorKind, Write};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::message::decode_datagram;
use crate::receiver;

/// The two lines printed for one datagram.
pub fn format_packet(source: SocketAddr, text: &str) -> String {
    format!(
        "Packet from {}:{}\n   Message: {}\n",
        source.ip(),
        source.port(),
        text
    )
}

/// Bind, print datagrams to stdout until Ctrl+C, then close the socket.
pub fn run_console(cfg: &MonitorConfig) -> Result<(), MonitorError> {
    let socket = receiver::bind(cfg)?;
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .map_err(|e| MonitorError::Signal(e.to_string()))?;

    println!("UDP server waiting for data on {} ...\n", cfg.bind_addr());
    let stdout = io::stdout();
    let result = serve(&socket, &running, cfg.max_datagram, &mut stdout.lock());
    println!("\nShutting down UDP server...");
    drop(socket);

    match result {
        Ok(count) => {
            log::info!("Printed {} packets", count);
            Ok(())
        }
        Err(e) => Err(MonitorError::Socket(e)),
    }
}

/// Print datagrams from `socket` to `out` while `running` is set.
///
/// `socket` needs a read timeout so the flag is re-checked. Receive errors
/// other than timeouts are logged and skipped; write errors end the loop.
pub fn serve<W: Write>(
    socket: &UdpSocket,
    running: &AtomicBool,
    max_datagram: usize,
    out: &mut W,
) -> io::Result<u64> {
    let mut buf = vec![0u8; max_datagram];
    let mut count = 0u64;
    while running.load(Ordering::SeqCst) {
        match socket.recv_from(&mut buf) {
            Ok((n, source)) => {
                let text = decode_datagram(&buf[..n]);
                writeln!(out, "{}", format_packet(source, &text))?;
                out.flush()?;
                count += 1;
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {}
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => log::warn!("UDP receive error: {}", e),
        }
    }
    Ok(count)
}
