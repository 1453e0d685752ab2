//! Sample the ADC channel and send each reading to the monitor over UDP.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use udpscope::logging::init_logging;
use udpscope::sensor::{SampleEmitter, SensorConfig};
use udpscope::MonitorError;

fn run() -> Result<(), MonitorError> {
    let cfg = SensorConfig::default().with_env_overrides()?;
    let emitter = SampleEmitter::new(&cfg)?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .map_err(|e| MonitorError::Signal(e.to_string()))?;

    log::info!(
        "Sending {} to {} every {} ms",
        cfg.reader().path().display(),
        emitter.target(),
        cfg.period_ms
    );
    emitter.run(&running, cfg.period());
    log::info!("Sensor sender stopped");
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
