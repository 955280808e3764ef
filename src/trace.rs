use tracing_subscriber::EnvFilter;

/// Log to stderr, stdout belongs to the agent.
///
/// `levels` takes the `EnvFilter` syntax, e.g. `info` or `ipvs_plugin=debug`.
pub fn init(color: bool, levels: &str) {
    let filter = EnvFilter::try_new(levels).unwrap_or_else(|err| {
        eprintln!("invalid log level {levels:?}, {err}");
        EnvFilter::new("warn")
    });

    // only fails if a subscriber is installed already, e.g. by tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
