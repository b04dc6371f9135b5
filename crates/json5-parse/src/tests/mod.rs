
mod parse_good;

/// Routes `tracing` output through the test harness. Set `RUST_LOG=trace` to
/// see every token and parser transition.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
