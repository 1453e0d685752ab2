//! Two-state presence derived from the latest sample.

/// Whether the sensor currently reports someone present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

/// `Present` iff `value` is strictly greater than `threshold`.
#[inline]
pub fn classify(value: f64, threshold: f64) -> Presence {
    if value > threshold {
        Presence::Present
    } else {
        Presence::Absent
    }
}

/// Tracks the presence state; each sample may flip it immediately.
#[derive(Debug, Clone)]
pub struct PresenceDetector {
    threshold: f64,
    state: Presence,
    last_value: Option<f64>,
}

impl PresenceDetector {
    /// Starts out `Absent` until a sample says otherwise.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            state: Presence::Absent,
            last_value: None,
        }
    }

    /// Feed a sample. Returns `true` when the state changed.
    pub fn update(&mut self, value: f64) -> bool {
        let next = classify(value, self.threshold);
        self.last_value = Some(value);
        let changed = next != self.state;
        self.state = next;
        changed
    }

    pub fn state(&self) -> Presence {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_itself_is_absent() {
        assert_eq!(classify(50_000.0, 50_000.0), Presence::Absent);
        assert_eq!(classify(50_000.5, 50_000.0), Presence::Present);
        assert_eq!(classify(f64::NAN, 50_000.0), Presence::Absent);
    }
}
