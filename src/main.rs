use clap::Parser;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;
mod store;

/// In-memory currency and exchange-rate HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file path, extension optional
    #[arg(short, long, default_value = "config")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::Config::load_from(&cli.config)?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, honoring the configured worker count
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
    let state = Arc::new(config::AppState::new(&cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &cfg, state.dispatcher.len());

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            signals,
        ))
        .await
}
