//! Display state fed from the hand-off queue.
//!
//! Independent of egui so the refresh cycle can be driven directly in tests:
//! the window calls [`MonitorState::ingest`] with whatever the queue held
//! whenever the [`PollTimer`] fires.

use std::time::{Duration, Instant};

use chrono::Local;

use crate::config::MonitorConfig;
use crate::message::parse_value;
use crate::presence::{Presence, PresenceDetector};
use crate::queue::ReceiverEvent;
use crate::window::SampleWindow;

/// Which derived view a monitor window shows next to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorKind {
    /// Live line chart of the last samples.
    Chart,
    /// Present/absent indicator.
    Presence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Received datagram text.
    Data,
    /// Start/stop and other status lines.
    Status,
    /// Faults reported by the receiver or the display.
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    /// Local wall-clock time, `HH:MM:SS`.
    pub stamp: String,
    pub text: String,
    pub kind: LogKind,
}

/// State derived from parsed values.
#[derive(Debug, Clone)]
enum Derived {
    Chart(SampleWindow),
    Presence(PresenceDetector),
}

pub struct MonitorState {
    log: Vec<LogLine>,
    derived: Derived,
}

impl MonitorState {
    pub fn new(kind: MonitorKind, cfg: &MonitorConfig) -> Self {
        let derived = match kind {
            MonitorKind::Chart => Derived::Chart(SampleWindow::new(cfg.window_capacity)),
            MonitorKind::Presence => {
                Derived::Presence(PresenceDetector::new(cfg.presence_threshold))
            }
        };
        Self {
            log: Vec::new(),
            derived,
        }
    }

    /// Apply a batch of drained events in order. Returns the number of datagrams logged.
    pub fn ingest<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = ReceiverEvent>,
    {
        let mut received = 0;
        for event in events {
            if self.apply(event) {
                received += 1;
            }
        }
        received
    }

    /// Apply one event; returns `true` if it was a datagram.
    pub fn apply(&mut self, event: ReceiverEvent) -> bool {
        match event {
            ReceiverEvent::Datagram(msg) => {
                let value = parse_value(&msg.text);
                self.log.push(LogLine {
                    stamp: msg.received_at.format("%H:%M:%S").to_string(),
                    text: msg.text,
                    kind: LogKind::Data,
                });
                if let Some(v) = value {
                    self.update_derived(v);
                }
                true
            }
            ReceiverEvent::Fault(reason) => {
                self.note(LogKind::Error, format!("Server error: {reason}"));
                false
            }
            ReceiverEvent::Stopped => {
                self.note(LogKind::Status, "Socket closed.");
                false
            }
        }
    }

    fn update_derived(&mut self, value: f64) {
        match &mut self.derived {
            Derived::Chart(window) => window.push(value),
            Derived::Presence(detector) => {
                if detector.update(value) {
                    log::debug!("Presence changed to {:?} at {}", detector.state(), value);
                }
            }
        }
    }

    /// Append a line that did not come from the network.
    pub fn note(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(LogLine {
            stamp: Local::now().format("%H:%M:%S").to_string(),
            text: text.into(),
            kind,
        });
    }

    pub fn log_lines(&self) -> &[LogLine] {
        &self.log
    }

    /// Texts of received datagrams, oldest first.
    pub fn received_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.log
            .iter()
            .filter(|l| l.kind == LogKind::Data)
            .map(|l| l.text.as_str())
    }

    pub fn chart(&self) -> Option<&SampleWindow> {
        match &self.derived {
            Derived::Chart(window) => Some(window),
            Derived::Presence(_) => None,
        }
    }

    pub fn presence(&self) -> Option<Presence> {
        match &self.derived {
            Derived::Presence(detector) => Some(detector.state()),
            Derived::Chart(_) => None,
        }
    }

    /// Indicator text for the current presence state, using the configured labels.
    pub fn presence_label<'a>(&self, cfg: &'a MonitorConfig) -> Option<&'a str> {
        match self.presence()? {
            Presence::Present => Some(cfg.presence_label.as_str()),
            Presence::Absent => Some(cfg.absence_label.as_str()),
        }
    }

    pub fn presence_detector(&self) -> Option<&PresenceDetector> {
        match &self.derived {
            Derived::Presence(detector) => Some(detector),
            Derived::Chart(_) => None,
        }
    }
}

/// Fires at most once per period; the first check always fires.
#[derive(Debug, Clone)]
pub struct PollTimer {
    period: Duration,
    last: Option<Instant>,
}

impl PollTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Returns `true` and re-arms if a full period has passed since the last firing.
    pub fn due(&mut self, now: Instant) -> bool {
        let fire = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.period,
        };
        if fire {
            self.last = Some(now);
        }
        fire
    }

    /// Time left until the next firing.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => self
                .period
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }
}
