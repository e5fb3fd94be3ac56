use tracing_subscriber::EnvFilter;

/// Route tracing logs to stderr so stdout carries only function results.
pub fn setup_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
