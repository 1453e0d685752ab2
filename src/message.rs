//! Decoded datagrams and the best-effort CSV value extraction.

use std::net::SocketAddr;

use chrono::{DateTime, Local};

/// One decoded datagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Whitespace-trimmed text of the datagram.
    pub text: String,
    pub source: SocketAddr,
    pub received_at: DateTime<Local>,
}

impl Message {
    pub fn new(text: String, source: SocketAddr) -> Self {
        Self {
            text,
            source,
            received_at: Local::now(),
        }
    }

    /// Second comma-separated field as a number, if there is one.
    pub fn value(&self) -> Option<f64> {
        parse_value(&self.text)
    }
}

/// Decode datagram bytes as UTF-8, dropping invalid sequences, and trim the result.
pub fn decode_datagram(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        text
    } else {
        trimmed.to_string()
    }
}

/// Parse the second comma-separated field of `text` as `f64`.
///
/// Returns `None` when there are fewer than two fields or the field is not numeric.
pub fn parse_value(text: &str) -> Option<f64> {
    let field = text.split(',').nth(1)?;
    field.trim().parse::<f64>().ok()
}
