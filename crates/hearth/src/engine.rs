//! The game loop: one tick drains the transport and plays out what it
//! found.

use std::future::Future;

use hearth_players::PlayerRegistry;
use hearth_protocol::{CommandLine, ConnectionId, Outbound};
use hearth_tick::TickScheduler;
use hearth_transport::Transport;
use hearth_world::World;
use tracing::{debug, info, trace};

use crate::broadcast::Broadcaster;
use crate::dispatch::dispatch;

/// Sent to every new connection before anything else.
pub const NAME_PROMPT: [&str; 2] = ["Welcome to the Rusty Whistle!", "What is your name?"];

/// What one tick handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub connected: usize,
    pub disconnected: usize,
    pub commands: usize,
}

impl TickReport {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Owns the world, the players and the transport.
///
/// Everything happens inside [`tick`](Self::tick), on whichever task
/// owns the engine, so no state here is shared or locked.
pub struct Engine<T: Transport> {
    world: World,
    players: PlayerRegistry,
    transport: T,
}

impl<T: Transport> Engine<T> {
    pub fn new(world: World, transport: T) -> Self {
        let players = PlayerRegistry::new(world.starting_room());
        Self {
            world,
            players,
            transport,
        }
    }

    /// Runs one tick.
    ///
    /// In order: new connections get a player and the name prompt, closed
    /// connections are announced and removed, then every command is
    /// dispatched in arrival order with its messages delivered before the
    /// next command runs.
    pub fn tick(&mut self) -> TickReport {
        self.transport.update();
        let mut report = TickReport::default();

        for conn_id in self.transport.poll_new_connections() {
            self.connect(conn_id);
            report.connected += 1;
        }

        for conn_id in self.transport.poll_disconnections() {
            self.disconnect(conn_id);
            report.disconnected += 1;
        }

        for (conn_id, line) in self.transport.poll_commands() {
            self.command(conn_id, &line);
            report.commands += 1;
        }

        report
    }

    fn connect(&mut self, conn_id: ConnectionId) {
        if let Err(e) = self.players.create(conn_id) {
            debug!(%conn_id, error = %e, "duplicate connection event ignored");
            return;
        }
        let mut out = Broadcaster::new(&mut self.transport, &self.players);
        for line in NAME_PROMPT {
            out.send(conn_id, line);
        }
    }

    fn disconnect(&mut self, conn_id: ConnectionId) {
        let Some(player) = self.players.get(conn_id) else {
            trace!(%conn_id, "disconnect of unknown connection ignored");
            return;
        };
        let notice = Outbound::to_all(format!("{} quit the game", player.display_name()));
        Broadcaster::new(&mut self.transport, &self.players).deliver(&notice);
        self.players.remove(conn_id);
    }

    fn command(&mut self, conn_id: ConnectionId, line: &CommandLine) {
        let plan = dispatch(&self.world, &mut self.players, conn_id, line);
        Broadcaster::new(&mut self.transport, &self.players).deliver_all(&plan);
    }

    /// Ticks on `scheduler`'s beat until `shutdown` completes, then hands
    /// the engine back.
    pub async fn run(
        mut self,
        mut scheduler: TickScheduler,
        shutdown: impl Future<Output = ()>,
    ) -> Self {
        info!(rate_hz = scheduler.tick_rate_hz(), "game loop started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                info = scheduler.wait_for_tick() => {
                    let report = self.tick();
                    scheduler.record_tick_end();
                    if !report.is_idle() {
                        trace!(tick = info.tick, ?report, "tick");
                    }
                }
            }
        }

        info!(ticks = scheduler.tick_count(), players = self.players.len(), "game loop stopped");
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
