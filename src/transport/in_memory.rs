use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::task::yield_now;

use crate::protocol::{decode_frame, encode_frame, Message};
use crate::transport::Transport;

type FrameQueue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// Two connected endpoints in one process. Frames go through the same
/// codec as on the network, so version and decoding errors behave alike.
pub struct InMemoryTransport {
    recv_queue: FrameQueue,
    send_queue: FrameQueue,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }

    /// Queue raw bytes for the other end, bypassing the encoder.
    pub fn send_frame(&mut self, frame: Vec<u8>) -> anyhow::Result<()> {
        self.send_queue
            .lock()
            .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
            .push_back(frame);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: &Message) -> anyhow::Result<usize> {
        let frame = encode_frame(msg)?;
        let len = frame.len();
        self.send_frame(frame)?;
        Ok(len)
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let frame = self
                .recv_queue
                .lock()
                .map_err(|_| anyhow::anyhow!("Channel poisoned"))?
                .pop_front();
            if let Some(frame) = frame {
                return Ok(decode_frame(&frame)?);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(anyhow::anyhow!("Channel closed"));
            }
            yield_now().await;
        }
    }
}
