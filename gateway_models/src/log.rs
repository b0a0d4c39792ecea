use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _};

/// Installs the global subscriber. `prod_format` switches to flattened single-line JSON.
pub fn init_tracing(prod_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if prod_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().flatten_event(true).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().pretty().with_ansi(true))
            .init();
    }
}

/// Reads `LOG_FORMAT` and reports whether the prod (flattened JSON) format was requested.
pub fn prod_format_from_env() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
