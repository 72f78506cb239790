//! Server configuration.

use std::path::PathBuf;

use hearth_tick::TickConfig;
use serde::Deserialize;

/// Everything needed to start a server.
///
/// Every field has a default, so a config file only has to name what it
/// changes:
///
/// ```json
/// { "bind": "127.0.0.1:4000", "tick_rate_hz": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Telnet listen address.
    pub bind: String,

    /// WebSocket listen address. `None` runs telnet only.
    pub websocket_bind: Option<String>,

    pub tick_rate_hz: u32,

    /// Random delay, up to this many microseconds, before the first
    /// tick. Keeps several servers started together from ticking in
    /// lockstep.
    pub tick_jitter_us: u64,

    /// JSON world file. `None` uses the built-in Rusty Whistle world.
    pub world_file: Option<PathBuf>,
}

impl ServerConfig {
    pub const DEFAULT_BIND: &'static str = "0.0.0.0:1234";

    /// The scheduler settings these options describe.
    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            initial_jitter_us: self.tick_jitter_us,
            ..TickConfig::with_rate(self.tick_rate_hz)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::DEFAULT_BIND.to_string(),
            websocket_bind: None,
            tick_rate_hz: TickConfig::DEFAULT_TICK_RATE_HZ,
            tick_jitter_us: 0,
            world_file: None,
        }
    }
}
