use crate::protocol::Message;

/// Ordered, reliable channel carrying whole frames between the two peers.
///
/// Errors are `anyhow`; a frame that fails to decode surfaces with its
/// [`ProtocolError`](crate::protocol::ProtocolError) attached so callers can
/// `downcast_ref` it.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one message, returning the number of bytes written.
    async fn send(&mut self, msg: &Message) -> anyhow::Result<usize>;
    /// Wait for the next message.
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

pub mod in_memory;
pub mod tcp;
