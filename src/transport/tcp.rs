use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::{decode_frame, encode_frame, Message, FRAME_SIZE};
use crate::transport::Transport;

/// Frames over a single TCP stream.
///
/// The game channel has no read timeout: a peer taking its time to aim is
/// indistinguishable from a hung one. Tools and tests can set a deadline.
pub struct TcpTransport {
    stream: TcpStream,
    deadline: Option<Duration>,
}

fn map_write_error(e: io::Error) -> anyhow::Error {
    if e.kind() == io::ErrorKind::BrokenPipe || e.kind() == io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection closed by peer")
    } else {
        anyhow::anyhow!("Write error: {}", e)
    }
}

fn map_read_error(e: io::Error) -> anyhow::Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        anyhow::anyhow!("Connection closed by peer")
    } else if e.kind() == io::ErrorKind::ConnectionReset {
        anyhow::anyhow!("Connection reset by peer")
    } else {
        anyhow::anyhow!("Read error: {}", e)
    }
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            deadline: None,
        }
    }

    /// Fail any single send or receive that takes longer than `deadline`.
    pub fn with_timeout(stream: TcpStream, deadline: Duration) -> Self {
        Self {
            stream,
            deadline: Some(deadline),
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    /// Address of the remote end.
    pub fn peer_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    async fn bounded<T, F>(deadline: Option<Duration>, what: &str, op: F) -> anyhow::Result<T>
    where
        F: core::future::Future<Output = anyhow::Result<T>>,
    {
        match deadline {
            Some(d) => timeout(d, op)
                .await
                .map_err(|_| anyhow::anyhow!("{} timeout after {:?}", what, d))?,
            None => op.await,
        }
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: &Message) -> anyhow::Result<usize> {
        let frame = encode_frame(msg)?;
        let stream = &mut self.stream;
        Self::bounded(self.deadline, "Send", async move {
            stream.write_all(&frame).await.map_err(map_write_error)?;
            stream.flush().await.map_err(map_write_error)?;
            anyhow::Ok(frame.len())
        })
        .await
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let stream = &mut self.stream;
        let frame = Self::bounded(self.deadline, "Receive", async move {
            let mut buf = vec![0u8; FRAME_SIZE];
            stream.read_exact(&mut buf).await.map_err(map_read_error)?;
            anyhow::Ok(buf)
        })
        .await?;
        Ok(decode_frame(&frame)?)
    }
}
