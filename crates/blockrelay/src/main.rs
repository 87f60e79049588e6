//! blockrelay: Block notification relay binary
//!
//! Connects to a blockchain explorer websocket feed and forwards block
//! events to a Kinesis stream. Raw JSON passthrough - no transformation.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockrelay_lib::{BlockWriter, Runner, ServerState, SubscribeRequest, WebSocketConnector};
use blockrelay_metadata::{RelayConfig, SinkType};
use blockrelay_sink::{KinesisSink, StreamSink};

#[derive(Parser, Debug)]
#[command(name = "blockrelay")]
#[command(about = "Block notification relay: websocket feed to Kinesis")]
struct Args {
    /// Path to relay configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Health server bind address
    #[arg(long, default_value = "0.0.0.0:8080")]
    health_addr: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load relay configuration
    let config = RelayConfig::load(&args.config)?;
    info!(relay = %config.name, endpoint = %config.feed.endpoint, "Loaded relay configuration");

    // Setup shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Handle Ctrl+C
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx_clone.send(true).ok();
    });

    // Parse health server address
    let health_addr: SocketAddr = args.health_addr.parse()?;

    // Kinesis sink required; memory sink exists for tests only
    let sink: Arc<dyn StreamSink> = match config.sink.sink_type {
        SinkType::Kinesis => {
            info!(stream = %config.stream_name(), "Using Kinesis sink");
            let sink = KinesisSink::connect_validated(
                config.stream_name(),
                config.sink.region.as_deref(),
            )
            .await?;
            Arc::new(sink)
        }
        SinkType::Memory => {
            error!("Memory sink not supported - use a kinesis sink");
            error!("Set sink.type: kinesis in the relay config");
            return Err("Memory sink not supported - relay requires kinesis".into());
        }
    };

    let subscribe = SubscribeRequest::new(
        config.subscription.channel.clone(),
        config.subscription.product_ids.clone(),
    );
    let connector = WebSocketConnector::new(&config.feed.endpoint, subscribe);
    let writer = BlockWriter::new(sink);

    let mut runner = Runner::new(&config.name, connector, writer);
    let connected_handle = runner.connected_handle();
    let last_frame_handle = runner.last_frame_handle();

    // Start health server
    let server_state = ServerState::new(
        &config.name,
        Arc::clone(&connected_handle),
        Arc::clone(&last_frame_handle),
    );
    tokio::spawn(async move {
        if let Err(e) = blockrelay_lib::run_server(health_addr, server_state).await {
            error!(error = %e, "Health server error");
        }
    });
    info!(addr = %health_addr, "Health server started");

    // Run the relay
    match runner.run(shutdown_rx).await {
        Ok(()) => {
            info!("Relay stopped gracefully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Relay error");
            std::process::exit(1);
        }
    }
}
