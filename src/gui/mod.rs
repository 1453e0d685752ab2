//! egui front end for the monitor windows.

mod app;
mod run;
pub mod theme;

pub use app::MonitorApp;
pub use run::run_monitor;
