use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::select;
use tracing::{error, info};

use crate::error::ConnectorError;
use crate::message::Frame;
use crate::traits::{Connector, Writer};

/// Runner orchestrates the relay pipeline: receive, decode, route, publish
pub struct Runner<C: Connector, W: Writer> {
    relay_name: String,
    connector: C,
    writer: W,
    connected: Arc<AtomicBool>,
    /// Unix timestamp (seconds) of last frame received
    last_frame_epoch_secs: Arc<AtomicU64>,
}

impl<C: Connector, W: Writer> Runner<C, W> {
    pub fn new(relay_name: impl Into<String>, connector: C, writer: W) -> Self {
        Self {
            relay_name: relay_name.into(),
            connector,
            writer,
            connected: Arc::new(AtomicBool::new(false)),
            last_frame_epoch_secs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns whether the connector is currently connected
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Returns a handle to the connected status
    pub fn connected_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.connected)
    }

    /// Returns a handle to the last frame timestamp
    pub fn last_frame_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.last_frame_epoch_secs)
    }

    fn update_last_frame_time(&self, frame: &Frame) {
        let secs = frame.received_at.timestamp().max(0) as u64;
        self.last_frame_epoch_secs.store(secs, Ordering::SeqCst);
    }

    /// Run the pipeline until cancelled or disconnected
    pub async fn run(
        &mut self,
        shutdown: tokio::sync::watch::Receiver<bool>,
    ) -> Result<(), ConnectorError> {
        // Connect; the subscription message is sent inside connect()
        self.connector.connect().await?;
        self.connected.store(true, Ordering::SeqCst);
        info!(relay = %self.relay_name, "Connected to block feed");

        let mut rx = self.connector.frames();
        let mut shutdown = shutdown;

        loop {
            select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Shutdown signal received");
                        break;
                    }
                }
                frame = rx.recv() => {
                    match frame {
                        Some(data) => {
                            let frame = Frame::new(&self.relay_name, data);

                            if let Err(e) = self.writer.write(&frame).await {
                                // Write failures are fatal - the pipeline has
                                // no recovery path
                                error!(error = %e, "Failed to handle frame - exiting");
                                return Err(ConnectorError::WriteFailed(e.to_string()));
                            }
                            self.update_last_frame_time(&frame);
                        }
                        None => {
                            // Channel closed - socket dropped
                            self.connected.store(false, Ordering::SeqCst);
                            error!("Connector disconnected unexpectedly - exiting");
                            return Err(ConnectorError::Disconnected("channel closed".to_string()));
                        }
                    }
                }
            }
        }

        // Cleanup
        self.connected.store(false, Ordering::SeqCst);
        self.writer.close().await.ok();
        self.connector.close().await?;

        Ok(())
    }
}
