use broadside::protocol::{AttackKind, ProtocolError};
use broadside::transport::tcp::TcpTransport;
use broadside::transport::Transport;
use broadside::{Coord, Message, FRAME_SIZE, PROTOCOL_VERSION};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn test_exchange_over_loopback() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut transport = TcpTransport::new(socket);
        let msg = transport.recv().await.unwrap();
        let Message::GameAttack { point, .. } = msg else {
            panic!("expected GameAttack, got {:?}", msg);
        };
        transport.send(&Message::GameFailed { point }).await.unwrap();
    });

    let mut client = TcpTransport::connect(addr).await?;
    assert_eq!(client.peer_addr()?, addr);
    let written = client
        .send(&Message::GameAttack {
            attack: AttackKind::Normal,
            point: Coord::new(4, 4),
        })
        .await?;
    assert_eq!(written, FRAME_SIZE);
    assert_eq!(
        client.recv().await?,
        Message::GameFailed {
            point: Coord::new(4, 4)
        }
    );
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_frames_on_the_wire_are_fixed_size() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let client = tokio::spawn(async move {
        let mut transport = TcpTransport::connect(addr).await.unwrap();
        transport.send(&Message::GameQuit).await.unwrap();
    });

    let (mut socket, _) = listener.accept().await?;
    let mut raw = Vec::new();
    socket.read_to_end(&mut raw).await?;
    client.await?;
    assert_eq!(raw.len(), FRAME_SIZE);
    assert_eq!(raw[0], PROTOCOL_VERSION);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wrong_version_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut frame = vec![0u8; FRAME_SIZE];
        frame[0] = 4;
        socket.write_all(&frame).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ProtocolError>(),
        Some(&ProtocolError::VersionMismatch {
            expected: PROTOCOL_VERSION,
            got: 4
        })
    );
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_garbage_frame() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut frame = vec![0xa5u8; FRAME_SIZE];
        frame[0] = PROTOCOL_VERSION;
        socket.write_all(&frame).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProtocolError>(),
        Some(ProtocolError::Malformed(_))
    ));
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_truncated_frame_is_closed_connection() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(&[PROTOCOL_VERSION; 10]).await.unwrap();
        socket.flush().await.unwrap();
        // dropping the socket closes the connection mid-frame
    });

    let mut transport = TcpTransport::connect(addr).await?;
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("closed by peer"));
    server.await?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_deadline() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(socket);
    });

    let stream = tokio::net::TcpStream::connect(addr).await?;
    let mut transport = TcpTransport::with_timeout(stream, Duration::from_millis(50));
    let err = transport.recv().await.unwrap_err();
    assert!(err.to_string().contains("timeout"));
    server.await?;
    Ok(())
}
