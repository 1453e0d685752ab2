//! Monitor window with a presence indicator driven by the received values.

use udpscope::gui::run_monitor;
use udpscope::logging::init_logging;
use udpscope::{MonitorConfig, MonitorKind};

fn main() -> eframe::Result<()> {
    init_logging();
    let defaults = MonitorConfig {
        title: "UDP Sensor Monitor - Presence".to_string(),
        ..MonitorConfig::gui()
    };
    let cfg = match defaults.with_env_overrides() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    run_monitor(MonitorKind::Presence, cfg)
}
