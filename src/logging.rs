use tracing_subscriber::EnvFilter;

/// Environment variable checked first for a tracing filter.
pub const LOG_ENV: &str = "VSADMIN_LOG";

/// Pick the filter directive: `VSADMIN_LOG`, then `RUST_LOG`, then the
/// verbose flag, then the configured default.
pub fn filter_directive(
    lookup: impl Fn(&str) -> Option<String>,
    verbose: bool,
    configured: &str,
) -> String {
    lookup(LOG_ENV)
        .or_else(|| lookup("RUST_LOG"))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| {
            if verbose {
                "debug".to_string()
            } else {
                configured.to_string()
            }
        })
}

/// Install the global subscriber. Logs go to stderr so CSV output on stdout
/// stays clean.
pub fn init(verbose: bool, configured: &str) {
    let directive = filter_directive(|k| std::env::var(k).ok(), verbose, configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
