//! Print every received datagram to stdout until Ctrl+C.

use std::process::ExitCode;

use udpscope::console::run_console;
use udpscope::logging::init_logging;
use udpscope::MonitorConfig;

fn main() -> ExitCode {
    init_logging();
    let result = MonitorConfig::console()
        .with_env_overrides()
        .and_then(|cfg| run_console(&cfg));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
