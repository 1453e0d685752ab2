//! Start/stop control for one receiver.
//!
//! A `Session` owns everything the UI thread and the receiver thread share:
//! the running flag, the hand-off queue and the receiver's join handle.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::queue::{self, MessageQueue, MessageSink, ReceiverEvent};
use crate::receiver;

pub struct Session {
    cfg: MonitorConfig,
    running: Arc<AtomicBool>,
    sink: MessageSink,
    queue: MessageQueue,
    worker: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl Session {
    pub fn new(cfg: MonitorConfig) -> Self {
        let (sink, queue) = queue::channel();
        Self {
            cfg,
            running: Arc::new(AtomicBool::new(false)),
            sink,
            queue,
            worker: None,
            local_addr: None,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Address of the bound socket while running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Bind the socket and spawn the receiver thread.
    ///
    /// Does nothing if already running. A receiver left over from a previous
    /// [`stop`](Self::stop) is joined first so its socket is closed before
    /// the address is bound again.
    pub fn start(&mut self) -> Result<SocketAddr, MonitorError> {
        if self.is_running() {
            if let Some(addr) = self.local_addr {
                return Ok(addr);
            }
        }
        self.reap_worker();

        let socket = receiver::bind(&self.cfg)?;
        let addr = socket.local_addr().map_err(MonitorError::Socket)?;

        self.running.store(true, Ordering::SeqCst);
        match receiver::spawn(
            socket,
            self.sink.clone(),
            Arc::clone(&self.running),
            self.cfg.max_datagram,
        ) {
            Ok(handle) => self.worker = Some(handle),
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(e);
            }
        }
        self.local_addr = Some(addr);
        log::info!("Server started on {}", addr);
        Ok(addr)
    }

    /// Signal the receiver to exit. It notices within one read timeout.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.running.store(false, Ordering::SeqCst);
        self.local_addr = None;
        log::info!("Server stopping");
    }

    /// Stop and wait for the receiver thread to release its socket.
    pub fn shutdown(&mut self) {
        self.stop();
        self.reap_worker();
    }

    /// Take every event the receiver has queued so far.
    pub fn drain(&self) -> Vec<ReceiverEvent> {
        self.queue.drain()
    }

    fn reap_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            log::debug!("Waiting for the previous receiver to release its socket");
            if handle.join().is_err() {
                log::error!("Receiver thread panicked");
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
