use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Routes pipeline logs to the test harness so they only show for failing tests.
///
/// Safe to call from every test, only the first call installs the subscriber.
pub fn init_tracing_in_tests() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gateway_server=debug,gateway_models=debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().with_target(true))
        .try_init()
        .ok();
}
