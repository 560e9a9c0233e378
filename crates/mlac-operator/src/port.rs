//! # Output Ports
//!
//! The operator has two optional outputs: the outbound artifact port and
//! the error port. Either may be left unconnected by the host, in which
//! case emission is a silent no-op.

use tokio::sync::mpsc;

/// Failure to hand an item to a connected port.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("port receiver has been dropped")]
    Closed,

    #[error("port rejected item: {0}")]
    Rejected(String),
}

/// An output the operator emits items to.
pub trait Port<T>: Send + Sync {
    fn send(&self, item: T) -> Result<(), PortError>;
}

impl<T, F> Port<T> for F
where
    F: Fn(T) + Send + Sync,
{
    fn send(&self, item: T) -> Result<(), PortError> {
        self(item);
        Ok(())
    }
}

/// Port backed by an unbounded tokio channel.
#[derive(Debug)]
pub struct ChannelPort<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> ChannelPort<T> {
    /// Create a port together with the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl<T: Send> Port<T> for ChannelPort<T> {
    fn send(&self, item: T) -> Result<(), PortError> {
        self.tx.send(item).map_err(|_| PortError::Closed)
    }
}
