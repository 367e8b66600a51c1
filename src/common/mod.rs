use tracing_subscriber::EnvFilter;

/// One-time setup shared by the binary's tests: panic reports plus log output
/// captured by the test harness.
pub fn init() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = color_eyre::install();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
