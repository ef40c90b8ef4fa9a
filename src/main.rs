use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use agentic_marketing::agent::types::{AgentServer, AgentState};
use agentic_marketing::simulator::simulator::run_simulator;
use agentic_marketing::simulator::types::Simulator;

#[derive(Parser)]
#[command(name = "agentic_marketing", about = "Simulated marketing-automation agent")]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Seconds between resolution ticks.
    #[arg(long, default_value_t = 3)]
    tick_interval: u64,

    /// Seed task generation and outcomes for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the agent running instead of paused.
    #[arg(long)]
    autostart: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut simulator = match args.seed {
        Some(seed) => Simulator::with_seed(seed),
        None => Simulator::new(),
    };
    simulator.seed_tasks(chrono::Utc::now());

    let state = AgentState::new(simulator, args.autostart);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let tick_loop = tokio::spawn(run_simulator(
        state.simulator.clone(),
        state.running.clone(),
        state.pending.clone(),
        Duration::from_secs(args.tick_interval),
        shutdown_rx,
    ));

    let server = AgentServer::new(state, &args.host, args.port);

    tokio::select! {
        result = server.start_server() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    // Stop the tick loop before exiting so no tick runs past this point.
    let _ = shutdown_tx.send(());
    let _ = tick_loop.await;

    Ok(())
}
