/// Install the process logger. `RUST_LOG` overrides the default `info` filter.
pub fn init_logging() {
    use env_logger::Env;
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}
