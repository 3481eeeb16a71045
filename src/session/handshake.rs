//! Connection setup: the host waits for a joiner, the joiner dials in, and
//! both learn the other's declared name.

use std::net::SocketAddr;

use log::{debug, info, warn};
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::core::Name;
use crate::protocol::Message;
use crate::session::SessionError;
use crate::transport::tcp::TcpTransport;
use crate::transport::Transport;

/// The other side of a session. The name is whatever the peer declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub name: Name,
    pub addr: Option<SocketAddr>,
}

/// Game and player name a host offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub game_name: Name,
    pub player_name: Name,
}

/// Name of the game hosted by `player`, cut to fit a name field.
pub fn game_name(player: &Name) -> Name {
    Name::truncated(&format!("{}'s game", player))
}

/// Listen on every interface at `port` until a player joins.
pub async fn host(port: u16, player: &Name) -> anyhow::Result<(TcpTransport, Peer)> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("waiting for a player on port {}", port);
    accept_joiner(&listener, player).await
}

/// Accept connections until one opens with a valid GameJoin.
///
/// Probes are answered and dropped; any other first message, a bad frame
/// or an early close drops that connection and the loop goes on.
pub async fn accept_joiner(
    listener: &TcpListener,
    player: &Name,
) -> anyhow::Result<(TcpTransport, Peer)> {
    let game = game_name(player);
    loop {
        let (socket, addr) = listener.accept().await?;
        debug!("connection from {}", addr);
        let mut transport = TcpTransport::new(socket);
        match transport.recv().await {
            Ok(Message::GameJoin { player_name }) => {
                let reply = Message::GameJoined {
                    game_name: game.clone(),
                    player_name: player.clone(),
                };
                if let Err(e) = transport.send(&reply).await {
                    warn!("{} from {} left during the handshake: {}", player_name, addr, e);
                    continue;
                }
                info!("{} joined from {}", player_name, addr);
                return Ok((
                    transport,
                    Peer {
                        name: player_name,
                        addr: Some(addr),
                    },
                ));
            }
            Ok(Message::RequestGames) => {
                let reply = Message::GameAnnounce {
                    game_name: game.clone(),
                    player_name: player.clone(),
                };
                if let Err(e) = transport.send(&reply).await {
                    debug!("probe from {} gone before the answer: {}", addr, e);
                }
            }
            Ok(other) => warn!("ignoring connection from {}: opened with {}", addr, other.kind()),
            Err(e) => warn!("ignoring connection from {}: {}", addr, e),
        }
    }
}

/// Ask to join the game on the other end of `transport`.
pub async fn join(
    transport: &mut dyn Transport,
    player: &Name,
) -> Result<Announcement, SessionError> {
    transport
        .send(&Message::GameJoin {
            player_name: player.clone(),
        })
        .await
        .map_err(SessionError::from_transport)?;
    loop {
        match transport.recv().await.map_err(SessionError::from_transport)? {
            Message::GameJoined {
                game_name,
                player_name,
            } => {
                info!("joined {}", game_name);
                return Ok(Announcement {
                    game_name,
                    player_name,
                });
            }
            other => warn!("expected GameJoined, got {}", other.kind()),
        }
    }
}

/// Dial `addr` and join the game there.
pub async fn dial<A: ToSocketAddrs>(addr: A, player: &Name) -> anyhow::Result<(TcpTransport, Peer)> {
    let mut transport = TcpTransport::connect(addr).await?;
    let peer_addr = transport.peer_addr().ok();
    let joined = join(&mut transport, player).await?;
    Ok((
        transport,
        Peer {
            name: joined.player_name,
            addr: peer_addr,
        },
    ))
}

/// Ask the host at `addr` which game it offers, without joining.
pub async fn probe<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Announcement> {
    let mut transport = TcpTransport::connect(addr).await?;
    transport.send(&Message::RequestGames).await?;
    match transport.recv().await? {
        Message::GameAnnounce {
            game_name,
            player_name,
        } => Ok(Announcement {
            game_name,
            player_name,
        }),
        other => Err(anyhow::anyhow!("expected GameAnnounce, got {}", other.kind())),
    }
}
