//! udpscope crate root: re-exports and module wiring.
//!
//! Receives CSV-style text datagrams from a remote sensor and shows them:
//! - `console`: print each packet to stdout
//! - `gui`: a window with a log plus a live chart or a presence indicator
//!
//! Supporting modules:
//! - `receiver`: socket binding and the background receive loop
//! - `queue`: hand-off channel between the receiver and the display
//! - `session`: start/stop control owning the receiver thread
//! - `display`: UI-independent log, sample window and presence state
//! - `sensor`: the device-side sender that produces `adc,<value>` datagrams

pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod gui;
pub mod logging;
pub mod message;
pub mod presence;
pub mod queue;
pub mod receiver;
pub mod sensor;
pub mod session;
pub mod window;

pub use config::MonitorConfig;
pub use display::{MonitorKind, MonitorState};
pub use error::MonitorError;
pub use message::{decode_datagram, parse_value, Message};
pub use presence::{Presence, PresenceDetector};
pub use queue::{channel, MessageQueue, MessageSink, ReceiverEvent};
pub use session::Session;
pub use window::SampleWindow;
