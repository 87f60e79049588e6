use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use url::Url;

use crate::error::ConnectorError;
use crate::subscription::SubscribeRequest;
use crate::traits::Connector;

/// WebSocket connector for the block notification feed
pub struct WebSocketConnector {
    url: String,
    subscribe: SubscribeRequest,
    tx: Option<mpsc::Sender<Vec<u8>>>,
    rx: Option<mpsc::Receiver<Vec<u8>>>,
}

impl WebSocketConnector {
    pub fn new(url: impl Into<String>, subscribe: SubscribeRequest) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            url: url.into(),
            subscribe,
            tx: Some(tx),
            rx: Some(rx),
        }
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&mut self) -> Result<(), ConnectorError> {
        // Validate up front; connect_async takes the raw string
        Url::parse(&self.url).map_err(|e| ConnectorError::ConnectionFailed(e.to_string()))?;

        let (ws_stream, _) = connect_async(self.url.as_str())
            .await
            .map_err(|e| ConnectorError::ConnectionFailed(e.to_string()))?;

        let (mut write, mut read) = ws_stream.split();
        let tx = self
            .tx
            .take()
            .ok_or_else(|| ConnectorError::ConnectionFailed("connect() called twice".to_string()))?;

        // Subscription goes out before the reader task starts, so it is on
        // the wire ahead of any inbound frame being forwarded
        write
            .send(WsMessage::Text(self.subscribe.to_json()))
            .await
            .map_err(|e| ConnectorError::SubscribeFailed(e.to_string()))?;

        // Spawn reader task
        tokio::spawn(async move {
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(WsMessage::Text(text)) => {
                        if tx.send(text.into_bytes()).await.is_err() {
                            break;
                        }
                    }
                    Ok(WsMessage::Binary(data)) => {
                        if tx.send(data).await.is_err() {
                            break;
                        }
                    }
                    Ok(WsMessage::Close(_)) => break,
                    Err(_) => break,
                    _ => {}
                }
            }
        });

        Ok(())
    }

    fn frames(&mut self) -> mpsc::Receiver<Vec<u8>> {
        self.rx.take().expect("frames() called twice")
    }

    async fn close(&mut self) -> Result<(), ConnectorError> {
        // Drop sender to signal reader task to stop
        self.tx = None;
        Ok(())
    }
}
