//! Whole-game scenarios driven through `Engine::tick` with an in-memory
//! transport.

use hearth::prelude::*;
use hearth::NAME_PROMPT;

struct Table {
    engine: Engine<MemoryTransport>,
}

impl Table {
    fn new() -> Self {
        let world = World::builtin().expect("built-in world is valid");
        Self {
            engine: Engine::new(world, MemoryTransport::new()),
        }
    }

    /// Connects and names a player, then clears everything sent so far.
    fn join(&mut self, name: &str) -> ConnectionId {
        let id = self.engine.transport_mut().connect();
        self.engine.tick();
        self.say(id, name);
        self.engine.transport_mut().take_sent();
        id
    }

    /// Sends one line and runs the tick that handles it.
    fn say(&mut self, id: ConnectionId, line: &str) {
        self.engine.transport_mut().input(id, line);
        self.engine.tick();
    }

    fn inbox(&mut self, id: ConnectionId) -> Vec<String> {
        self.engine.transport_mut().take_sent_to(id)
    }

    fn room_of(&self, id: ConnectionId) -> &str {
        &self.engine.players().get(id).expect("player exists").room
    }
}

#[test]
fn test_two_player_scenario() {
    let mut t = Table::new();

    // A connects and picks a name.
    let a = t.engine.transport_mut().connect();
    t.engine.tick();
    assert_eq!(t.inbox(a), NAME_PROMPT);

    t.say(a, "Mark");
    assert_eq!(
        t.inbox(a),
        [
            "Mark entered the game",
            "Welcome to the game, Mark. Type 'commands' for a list of commands.",
            "You're in the Rusty Whistle, a cozy tavern warmed by an open fire.",
        ]
    );

    // B connects; A hears about it once B has a name.
    let b = t.engine.transport_mut().connect();
    t.engine.tick();
    assert_eq!(t.inbox(b), NAME_PROMPT);
    assert!(t.inbox(a).is_empty());

    t.say(b, "Ana");
    assert_eq!(t.inbox(a), ["Ana entered the game"]);
    let welcome = t.inbox(b);
    assert_eq!(welcome[0], "Ana entered the game");
    assert!(welcome[1].starts_with("Welcome to the game, Ana."));

    t.say(a, "say hi");
    assert_eq!(t.inbox(b), ["Mark says: hi"]);
    assert_eq!(t.inbox(a), ["Mark says: hi"]);

    t.say(a, "go outside");
    assert_eq!(t.inbox(b), ["Mark left via exit 'outside'"]);
    assert_eq!(t.inbox(a), ["You arrive at 'Tavern Entrance'"]);

    t.say(a, "go nowhere");
    assert_eq!(t.inbox(a), ["Unknown exit 'nowhere'"]);
    assert!(t.inbox(b).is_empty());
}

#[test]
fn test_say_stays_in_the_room() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    let c = t.join("Olaf");
    t.inbox(a);
    t.inbox(b);
    t.say(c, "go outside");
    t.inbox(a);
    t.inbox(b);

    t.say(a, "say anyone?");
    assert_eq!(t.inbox(b), ["Mark says: anyone?"]);
    assert!(t.inbox(c).is_empty());
}

#[test]
fn test_arrival_is_seen_only_in_the_destination() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    let c = t.join("Olaf");
    t.say(c, "go outside");
    for id in [a, b, c] {
        t.inbox(id);
    }

    t.say(a, "go outside");
    assert_eq!(t.inbox(a), ["You arrive at 'Tavern Entrance'"]);
    assert_eq!(t.inbox(b), ["Mark left via exit 'outside'"]);
    assert_eq!(t.inbox(c), ["Mark arrived via 'outside'"]);
    assert_eq!(t.room_of(a), "Tavern Entrance");
}

#[test]
fn test_first_command_is_a_name_not_a_verb() {
    let mut t = Table::new();
    let watcher = t.join("Mark");
    let a = t.engine.transport_mut().connect();
    t.engine.tick();
    t.inbox(a);

    t.say(a, "go outside");
    assert_eq!(t.room_of(a), "Rusty Whistle");
    assert_eq!(
        t.engine.players().get(a).unwrap().name,
        PlayerName::Named("go outside".into())
    );
    assert_eq!(t.inbox(watcher), ["go outside entered the game"]);
    assert_eq!(t.inbox(a).len(), 3);
}

#[test]
fn test_disconnect_announces_once_and_removes() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    t.inbox(a);

    t.engine.transport_mut().disconnect(b);
    let report = t.engine.tick();
    assert_eq!(report.disconnected, 1);
    assert_eq!(t.inbox(a), ["Ana quit the game"]);
    assert!(t.engine.players().all().all(|(id, _)| id != b));

    t.engine.tick();
    assert!(t.inbox(a).is_empty());
}

#[test]
fn test_commands_after_disconnect_are_ignored() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    t.inbox(a);

    // Disconnections are handled before commands in the same tick.
    t.engine.transport_mut().input(b, "say still here?");
    t.engine.transport_mut().disconnect(b);
    let report = t.engine.tick();

    assert_eq!(report.commands, 1);
    assert_eq!(t.inbox(a), ["Ana quit the game"]);
}

#[test]
fn test_commands_in_one_tick_run_in_arrival_order() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    t.inbox(a);

    t.engine.transport_mut().input(a, "go washroom");
    t.engine.transport_mut().input(b, "say where did Mark go?");
    t.engine.tick();

    assert_eq!(t.inbox(b), ["Mark left via exit 'washroom'", "Ana says: where did Mark go?"]);
    assert_eq!(t.inbox(a), ["You arrive at 'Washroom'"]);
}

#[test]
fn test_equip_and_inventory() {
    let mut t = Table::new();
    let a = t.join("Mark");
    t.say(a, "go washroom");
    t.say(a, "equip plunger");
    t.inbox(a);

    t.say(a, "inventory");
    assert_eq!(
        t.inbox(a),
        ["Weapon: Toilet Plunger Armor: Cloth Clothing Gold: 0 Backpack: Empty"]
    );
}

#[test]
fn test_unknown_verb_is_private() {
    let mut t = Table::new();
    let a = t.join("Mark");
    let b = t.join("Ana");
    t.inbox(a);

    t.say(a, "dance wildly");
    assert_eq!(t.inbox(a), ["Unknown command 'dance'"]);
    assert!(t.inbox(b).is_empty());
}
