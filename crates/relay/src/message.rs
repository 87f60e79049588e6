use chrono::{DateTime, Utc};

/// Frame wraps one websocket text message with metadata.
/// Raw bytes are kept as received; routing decides what to parse.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Wall-clock receive time
    pub received_at: DateTime<Utc>,
    /// Relay instance name
    pub relay: String,
    /// Raw frame bytes
    pub data: Vec<u8>,
}

impl Frame {
    #[inline]
    pub fn new(relay: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            received_at: Utc::now(),
            relay: relay.into(),
            data,
        }
    }
}
