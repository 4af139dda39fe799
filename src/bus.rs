use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

/// Broadcast topic with bounded capacity.
/// `T` must be `Send + Sync` because messages cross from the render thread
/// into the Tokio runtime.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: std::fmt::Debug + Send + Sync + 'static> Topic<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Sends `msg` to every subscriber. Returns `false` if nobody was listening.
    pub fn publish(&self, msg: T) -> bool {
        match self.tx.send(Arc::new(msg)) {
            Ok(_) => true,
            Err(broadcast::error::SendError(msg)) => {
                warn!(?msg, "Message dropped: topic has no subscribers");
                false
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}
