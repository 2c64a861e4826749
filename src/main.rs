use std::sync::Arc;

use favicon_server::config::{self, AppState};
use favicon_server::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Worker thread count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Icon problems are fatal before anything is bound
    let state = Arc::new(AppState::new(cfg)?);

    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(tokio::sync::Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;

    server::run(listener, state, shutdown).await;
    Ok(())
}
