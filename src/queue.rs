//! Hand-off queue between the receiver thread and the display.
//!
//! A thin wrapper over an unbounded `std::sync::mpsc` channel: the receiver
//! pushes without blocking and the display drains whatever is queued on each
//! refresh, also without blocking.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::message::Message;

/// Items carried from the receiver thread to the display.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiverEvent {
    /// A datagram was received and decoded.
    Datagram(Message),
    /// The receive loop hit an unexpected error and kept going.
    Fault(String),
    /// The receive loop has exited and released its socket.
    Stopped,
}

/// Producer side, cloned into each receiver thread.
#[derive(Clone)]
pub struct MessageSink {
    tx: Sender<ReceiverEvent>,
}

impl MessageSink {
    /// Queue an event. Returns `false` once the consumer side has been dropped.
    pub fn push(&self, event: ReceiverEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    #[inline]
    pub fn push_message(&self, message: Message) -> bool {
        self.push(ReceiverEvent::Datagram(message))
    }
}

/// Consumer side, owned by the display.
pub struct MessageQueue {
    rx: Receiver<ReceiverEvent>,
}

impl MessageQueue {
    /// Take every event currently queued, oldest first.
    pub fn drain(&self) -> Vec<ReceiverEvent> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => out.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

/// Create a new `(MessageSink, MessageQueue)` pair.
pub fn channel() -> (MessageSink, MessageQueue) {
    let (tx, rx) = std::sync::mpsc::channel();
    (MessageSink { tx }, MessageQueue { rx })
}
