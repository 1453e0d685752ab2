//! Monitor window with a live chart of the last received values.

use udpscope::gui::run_monitor;
use udpscope::logging::init_logging;
use udpscope::{MonitorConfig, MonitorKind};

fn main() -> eframe::Result<()> {
    init_logging();
    let defaults = MonitorConfig {
        title: "UDP Sensor Monitor - Live Chart".to_string(),
        ..MonitorConfig::gui()
    };
    let cfg = match defaults.with_env_overrides() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    run_monitor(MonitorKind::Chart, cfg)
}
