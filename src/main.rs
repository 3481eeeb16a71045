use std::env;
use std::process::ExitCode;

use broadside::session::handshake;
use broadside::{
    init_logging, AutoPlayer, CliPlayer, EntropySource, Name, OsEntropy, Player, Role,
    SeededEntropy, Session, DEFAULT_PORT,
};
use clap::Parser;
use log::error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TCP port to host on or connect to.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Your name (defaults to the login name).
    #[arg(short, long)]
    name: Option<String>,
    /// Let the computer place ships and pick targets.
    #[arg(long)]
    auto: bool,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Only ask HOST which game it offers.
    #[arg(long, requires = "host")]
    probe: bool,
    /// Join the game hosted by HOST instead of hosting one.
    host: Option<String>,
}

/// Settings for one session, resolved from the command line.
struct SessionConfig {
    name: Name,
    port: u16,
    auto: bool,
    seed: Option<u64>,
}

impl SessionConfig {
    fn from_cli(cli: &Cli) -> Self {
        let name = cli.name.clone().unwrap_or_else(default_name);
        Self {
            name: Name::truncated(&name),
            port: cli.port,
            auto: cli.auto,
            seed: cli.seed,
        }
    }

    fn player(&self) -> Box<dyn Player> {
        if self.auto {
            Box::new(AutoPlayer::new())
        } else {
            Box::new(CliPlayer::new())
        }
    }

    fn entropy(&self) -> Box<dyn EntropySource> {
        match self.seed {
            Some(seed) => Box::new(SeededEntropy::new(seed)),
            None => Box::new(OsEntropy),
        }
    }
}

fn default_name() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "player".to_string())
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = SessionConfig::from_cli(&cli);

    if cli.probe {
        if let Some(host) = cli.host.as_deref() {
            let offer = handshake::probe((host, config.port)).await?;
            println!("*** {} is hosting \"{}\"", offer.player_name, offer.game_name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (transport, peer, role) = match cli.host.as_deref() {
        Some(host) => {
            println!("*** Connecting to game at {}:{}...", host, config.port);
            let (transport, peer) = handshake::dial((host, config.port), &config.name).await?;
            (transport, peer, Role::Joiner)
        }
        None => {
            println!(
                "*** Hosting game \"{}\". Waiting for opponent (^C to abort)...",
                handshake::game_name(&config.name)
            );
            let (transport, peer) = handshake::host(config.port, &config.name).await?;
            (transport, peer, Role::Host)
        }
    };
    println!("*** Playing against {}.", peer.name);
    if config.seed.is_some() {
        println!("*** Using a fixed seed: this board is predictable.");
    }

    let mut session = Session::new(
        config.player(),
        Box::new(transport),
        config.entropy(),
        role,
        config.name.clone(),
        peer,
    );
    match session.run().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) if !e.is_fatal() => {
            println!("*** {}", e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
