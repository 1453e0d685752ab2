//! Configuration shared by the monitor programs.
//!
//! Every tunable has a compile-time default. A JSON file named by the
//! `UDPSCOPE_CONFIG` environment variable may override any subset of fields:
//!
//! ```json
//! { "bind_ip": "127.0.0.1", "presence_threshold": 42000.0 }
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Environment variable naming an optional JSON override file.
pub const CONFIG_ENV_VAR: &str = "UDPSCOPE_CONFIG";

/// Address the window programs listen on (the sensor's configured destination).
pub const GUI_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 42, 10));
/// Address the console program listens on (all interfaces).
pub const CONSOLE_BIND_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;
/// Upper bound on how long the receiver waits before re-checking the running flag.
pub const RECV_TIMEOUT_MS: u64 = 1000;
/// Bytes read per datagram; longer datagrams are truncated.
pub const MAX_DATAGRAM: usize = 1024;
/// Period of the display refresh that drains the hand-off queue.
pub const POLL_INTERVAL_MS: u64 = 200;
/// Number of samples kept by the chart window.
pub const WINDOW_CAPACITY: usize = 50;
/// Values strictly above this are reported as presence.
pub const PRESENCE_THRESHOLD: f64 = 50_000.0;
pub const PRESENCE_LABEL: &str = "Presença detectada";
pub const ABSENCE_LABEL: &str = "Sem presença";

/// Settings for the UDP receiver and the display that consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    pub bind_ip: IpAddr,
    pub port: u16,
    pub recv_timeout_ms: u64,
    pub max_datagram: usize,
    pub poll_interval_ms: u64,
    pub window_capacity: usize,
    pub presence_threshold: f64,
    pub presence_label: String,
    pub absence_label: String,
    /// Native window title.
    pub title: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::gui()
    }
}

impl MonitorConfig {
    /// Defaults for the window programs.
    pub fn gui() -> Self {
        Self {
            bind_ip: GUI_BIND_IP,
            port: DEFAULT_PORT,
            recv_timeout_ms: RECV_TIMEOUT_MS,
            max_datagram: MAX_DATAGRAM,
            poll_interval_ms: POLL_INTERVAL_MS,
            window_capacity: WINDOW_CAPACITY,
            presence_threshold: PRESENCE_THRESHOLD,
            presence_label: PRESENCE_LABEL.to_string(),
            absence_label: ABSENCE_LABEL.to_string(),
            title: "UDP Sensor Monitor".to_string(),
        }
    }

    /// Defaults for the console program.
    pub fn console() -> Self {
        Self {
            bind_ip: CONSOLE_BIND_IP,
            ..Self::gui()
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    pub fn recv_timeout(&self) -> Duration {
        Duration::from_millis(self.recv_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject values the receiver or display cannot work with.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.recv_timeout_ms == 0 {
            return Err(MonitorError::Config("recv_timeout_ms must be positive".into()));
        }
        if self.max_datagram == 0 {
            return Err(MonitorError::Config("max_datagram must be positive".into()));
        }
        if self.window_capacity == 0 {
            return Err(MonitorError::Config("window_capacity must be positive".into()));
        }
        if !self.presence_threshold.is_finite() {
            return Err(MonitorError::Config("presence_threshold must be finite".into()));
        }
        Ok(())
    }

    /// Apply overrides from `UDPSCOPE_CONFIG`, if set, and validate the result.
    pub fn with_env_overrides(self) -> Result<Self, MonitorError> {
        let cfg = apply_env_overrides(self)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Overlay the fields present in `json` onto `base`.
///
/// Fields absent from `json` keep their value from `base`; unknown fields are rejected.
pub fn merge_json<T>(base: &T, json: &str) -> Result<T, MonitorError>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(base).map_err(|e| MonitorError::Config(e.to_string()))?;
    let patch: serde_json::Value =
        serde_json::from_str(json).map_err(|e| MonitorError::Config(e.to_string()))?;
    let serde_json::Value::Object(fields) = patch else {
        return Err(MonitorError::Config("expected a JSON object".into()));
    };
    if let Some(target) = merged.as_object_mut() {
        target.extend(fields);
    }
    serde_json::from_value(merged).map_err(|e| MonitorError::Config(e.to_string()))
}

/// Read a JSON override file and merge it onto `base`.
pub fn load_from_path<T>(base: &T, path: &Path) -> Result<T, MonitorError>
where
    T: Serialize + DeserializeOwned,
{
    let txt = std::fs::read_to_string(path)
        .map_err(|e| MonitorError::Config(format!("{}: {e}", path.display())))?;
    merge_json(base, &txt)
}

/// Merge the file named by [`CONFIG_ENV_VAR`] onto `base`; returns `base` unchanged when unset.
pub fn apply_env_overrides<T>(base: T) -> Result<T, MonitorError>
where
    T: Serialize + DeserializeOwned,
{
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => {
            log::info!("Loading configuration overrides from {:?}", path);
            load_from_path(&base, Path::new(&path))
        }
        None => Ok(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_listens_on_all_interfaces() {
        let cfg = MonitorConfig::console();
        assert_eq!(cfg.bind_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(MonitorConfig::gui().bind_addr().to_string(), "192.168.42.10:5000");
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let cfg = MonitorConfig {
            window_capacity: 0,
            ..MonitorConfig::gui()
        };
        assert!(cfg.validate().is_err());
    }
}
