//! Device-side sender: sample an ADC channel and push `adc,<value>` datagrams
//! to the monitor.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::{apply_env_overrides, DEFAULT_PORT, GUI_BIND_IP};
use crate::error::MonitorError;
use crate::presence::{classify, Presence};

/// Settings for the sensor program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorConfig {
    pub adc_channel: u32,
    /// Read from this file instead of the IIO sysfs entry for `adc_channel`.
    pub adc_path: Option<PathBuf>,
    pub target_ip: IpAddr,
    pub target_port: u16,
    pub period_ms: u64,
    /// Threshold for the locally printed presence verdict.
    pub board_threshold: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            adc_channel: 13,
            adc_path: None,
            target_ip: GUI_BIND_IP,
            target_port: DEFAULT_PORT,
            period_ms: 2000,
            board_threshold: 60_000.0,
        }
    }
}

impl SensorConfig {
    pub fn target(&self) -> SocketAddr {
        SocketAddr::new(self.target_ip, self.target_port)
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn reader(&self) -> AdcReader {
        match &self.adc_path {
            Some(path) => AdcReader::with_path(path),
            None => AdcReader::new(self.adc_channel),
        }
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.period_ms == 0 {
            return Err(MonitorError::Config("period_ms must be positive".into()));
        }
        if self.target_port == 0 {
            return Err(MonitorError::Config("target_port must be set".into()));
        }
        if !self.board_threshold.is_finite() {
            return Err(MonitorError::Config("board_threshold must be finite".into()));
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

/// Reads raw conversions from a Linux IIO voltage channel.
#[derive(Debug, Clone)]
pub struct AdcReader {
    path: PathBuf,
}

impl AdcReader {
    pub fn new(channel: u32) -> Self {
        Self {
            path: PathBuf::from(format!(
                "/sys/bus/iio/devices/iio:device0/in_voltage{channel}_raw"
            )),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current raw reading.
    pub fn read(&self) -> Result<u32, MonitorError> {
        let err = |reason: String| MonitorError::Sensor {
            path: self.path.display().to_string(),
            reason,
        };
        let txt = std::fs::read_to_string(&self.path).map_err(|e| err(e.to_string()))?;
        let first = txt.split_whitespace().next().unwrap_or("");
        first
            .parse::<u32>()
            .map_err(|e| err(format!("{first:?}: {e}")))
    }
}

/// Wire form of one reading.
pub fn format_sample(value: u32) -> String {
    format!("adc,{value}\n")
}

pub struct SampleEmitter {
    socket: UdpSocket,
    target: SocketAddr,
    reader: AdcReader,
    board_threshold: f64,
}

impl SampleEmitter {
    pub fn new(cfg: &SensorConfig) -> Result<Self, MonitorError> {
        let local = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        let socket =
            UdpSocket::bind(local).map_err(|source| MonitorError::Bind { addr: local, source })?;
        Ok(Self {
            socket,
            target: cfg.target(),
            reader: cfg.reader(),
            board_threshold: cfg.board_threshold,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Take one reading and send it. Returns the value sent.
    pub fn emit(&self) -> Result<u32, MonitorError> {
        let value = self.reader.read()?;
        let msg = format_sample(value);
        self.socket
            .send_to(msg.as_bytes(), self.target)
            .map_err(MonitorError::Socket)?;
        log::info!("ADC value: {} (sent: {})", value, msg.trim_end());
        match classify(f64::from(value), self.board_threshold) {
            Presence::Present => log::info!(">>> Presence detected!"),
            Presence::Absent => log::info!("No presence."),
        }
        Ok(value)
    }

    /// Emit once per `period` until `running` is cleared. Failed cycles are logged and skipped.
    pub fn run(&self, running: &AtomicBool, period: Duration) {
        while running.load(Ordering::SeqCst) {
            let started = Instant::now();
            if let Err(e) = self.emit() {
                log::error!("{}", e);
            }
            // Sleep in short slices so a stop request is seen promptly.
            while running.load(Ordering::SeqCst) && started.elapsed() < period {
                let left = period.saturating_sub(started.elapsed());
                std::thread::sleep(left.min(Duration::from_millis(100)));
            }
        }
    }
}
