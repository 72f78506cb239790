use std::path::PathBuf;

use clap::Parser;
use hearth::prelude::*;

/// The Rusty Whistle: a small tavern MUD.
#[derive(Debug, Parser)]
#[command(name = "rusty-whistle")]
#[command(version)]
struct Cli {
    /// Telnet listen address
    #[arg(short, long, env = "HEARTH_BIND", default_value = ServerConfig::DEFAULT_BIND)]
    bind: String,

    /// Also accept WebSocket clients on this address
    #[arg(long, env = "HEARTH_WS_BIND")]
    ws_bind: Option<String>,

    /// Ticks per second
    #[arg(short, long, env = "HEARTH_TICK_RATE", default_value_t = TickConfig::DEFAULT_TICK_RATE_HZ)]
    tick_rate: u32,

    /// Random delay before the first tick, in microseconds
    #[arg(long, env = "HEARTH_TICK_JITTER_US", default_value_t = 0)]
    tick_jitter_us: u64,

    /// JSON world file; the built-in world is used when absent
    #[arg(short, long, env = "HEARTH_WORLD")]
    world: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            websocket_bind: self.ws_bind,
            tick_rate_hz: self.tick_rate,
            tick_jitter_us: self.tick_jitter_us,
            world_file: self.world,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config();
    tracing::info!(bind = %config.bind, world = ?config.world_file, "starting the Rusty Whistle");

    let server = HearthServer::builder().config(config).build().await?;
    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::try_parse_from(["rusty-whistle"]).unwrap().into_config();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_cli_flags() {
        let config = Cli::try_parse_from([
            "rusty-whistle",
            "--bind",
            "127.0.0.1:4000",
            "--ws-bind",
            "127.0.0.1:4001",
            "--tick-rate",
            "10",
            "--tick-jitter-us",
            "2000",
            "--world",
            "world.json",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.bind, "127.0.0.1:4000");
        assert_eq!(config.websocket_bind.as_deref(), Some("127.0.0.1:4001"));
        assert_eq!(config.tick_rate_hz, 10);
        assert_eq!(config.tick_jitter_us, 2000);
        assert_eq!(config.world_file, Some(PathBuf::from("world.json")));
    }
}
