use std::process;

use gateway_models::log::{init_tracing, prod_format_from_env};
use gateway_server::config::GatewayConfig;
use gateway_server::error::ReportDisplayExt;
use gateway_server::server::serve;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("gateway error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    dotenv::dotenv().ok();
    init_tracing(prod_format_from_env());

    let config = GatewayConfig::from_env()
        .map_err(|report| format!("{} {}", report.current_context(), report.format()))?;

    tracing::info!(
        "Starting gateway on {} with RPC endpoints for {:?}",
        config.bind_address,
        config.rpc_urls.keys().collect::<Vec<_>>()
    );

    serve(config)
        .await
        .map_err(|report| format!("{} {}", report.current_context(), report.format()))
}
