//! `HearthServer` builder and server loop.
//!
//! This is the entry point for running a Hearth server. It ties the
//! layers together: transports → engine → tick scheduler.

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use hearth_tick::{TickConfig, TickScheduler};
use hearth_transport::{MultiTransport, TelnetTransport};
use hearth_world::World;

use crate::config::ServerConfig;
use crate::engine::Engine;
use crate::HearthError;

/// Builder for configuring and starting a Hearth server.
///
/// # Example
///
/// ```rust,ignore
/// use hearth::prelude::*;
///
/// let server = HearthServer::builder()
///     .bind("0.0.0.0:1234")
///     .tick_rate(5)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct HearthServerBuilder {
    config: ServerConfig,
    world: Option<World>,
}

impl HearthServerBuilder {
    /// Creates a builder with [`ServerConfig::default`] settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            world: None,
        }
    }

    /// Replaces every setting at once.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the telnet listen address.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind = addr.to_string();
        self
    }

    /// Also listens for WebSocket clients on `addr`.
    #[cfg(feature = "websocket")]
    pub fn websocket(mut self, addr: &str) -> Self {
        self.config.websocket_bind = Some(addr.to_string());
        self
    }

    pub fn tick_rate(mut self, hz: u32) -> Self {
        self.config.tick_rate_hz = hz;
        self
    }

    /// Delays the first tick by a random amount up to `max`.
    pub fn tick_jitter(mut self, max: Duration) -> Self {
        self.config.tick_jitter_us = u64::try_from(max.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Loads the world from a JSON file at build time.
    pub fn world_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.world_file = Some(path.into());
        self
    }

    /// Plays in an already-built world. Takes precedence over
    /// [`world_file`](Self::world_file).
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Loads the world and binds the listeners.
    ///
    /// # Errors
    /// [`HearthError::World`] if the world file cannot be loaded,
    /// [`HearthError::Transport`] if a listener cannot bind.
    pub async fn build(self) -> Result<HearthServer, HearthError> {
        let world = match (self.world, &self.config.world_file) {
            (Some(world), _) => world,
            (None, Some(path)) => World::load(path)?,
            (None, None) => World::builtin()?,
        };

        let telnet = TelnetTransport::bind(&self.config.bind).await?;
        let telnet_addr = telnet.local_addr();
        #[cfg_attr(not(feature = "websocket"), allow(unused_mut))]
        let mut transport = MultiTransport::new().with(telnet);

        #[cfg_attr(not(feature = "websocket"), allow(unused_mut))]
        let mut websocket_addr = None;
        #[cfg(feature = "websocket")]
        if let Some(addr) = &self.config.websocket_bind {
            let ws = hearth_transport::WebSocketTransport::bind(addr).await?;
            websocket_addr = Some(ws.local_addr());
            transport = transport.with(ws);
        }

        Ok(HearthServer {
            engine: Engine::new(world, transport),
            tick: self.config.tick_config(),
            telnet_addr,
            websocket_addr,
        })
    }
}

impl Default for HearthServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Hearth server, ready to run.
pub struct HearthServer {
    engine: Engine<MultiTransport>,
    tick: TickConfig,
    telnet_addr: SocketAddr,
    websocket_addr: Option<SocketAddr>,
}

impl HearthServer {
    pub fn builder() -> HearthServerBuilder {
        HearthServerBuilder::new()
    }

    /// The address telnet clients connect to.
    pub fn local_addr(&self) -> SocketAddr {
        self.telnet_addr
    }

    /// The WebSocket address, if one was configured.
    pub fn websocket_addr(&self) -> Option<SocketAddr> {
        self.websocket_addr
    }

    /// Runs the game loop until Ctrl-C.
    pub async fn run(self) -> Result<(), HearthError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutdown requested");
        })
        .await
    }

    /// Runs the game loop until `shutdown` completes.
    pub async fn run_until(
        self,
        shutdown: impl Future<Output = ()>,
    ) -> Result<(), HearthError> {
        tracing::info!(
            telnet = %self.telnet_addr,
            websocket = ?self.websocket_addr,
            "Hearth server running"
        );
        let scheduler = TickScheduler::new(self.tick);
        self.engine.run(scheduler, shutdown).await;
        Ok(())
    }
}
