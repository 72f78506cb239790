//! Command dispatch: one line of player input in, outbound messages out.
//!
//! Dispatch reads the world and writes the registry. It never sends
//! anything itself; the engine delivers the returned messages in order,
//! resolving each audience at that moment.

use hearth_players::PlayerRegistry;
use hearth_protocol::{Audience, CommandLine, ConnectionId, HELP_LINES, Outbound, Verb};
use hearth_world::{Room, World};
use tracing::{debug, trace, warn};

/// Handles one line from `conn_id`.
///
/// The first line a player sends is their name. After that the first
/// word selects a [`Verb`] and the rest is its argument. Lines from
/// connections with no player are ignored.
pub fn dispatch(
    world: &World,
    players: &mut PlayerRegistry,
    conn_id: ConnectionId,
    line: &CommandLine,
) -> Vec<Outbound> {
    let Some(player) = players.get(conn_id) else {
        trace!(%conn_id, "command from unknown connection ignored");
        return Vec::new();
    };
    if !player.is_named() {
        return enter(world, players, conn_id, line.raw());
    }

    let Some(verb) = Verb::parse(line.verb()) else {
        debug!(%conn_id, verb = line.verb(), "unknown command");
        return reply(conn_id, format!("Unknown command '{}'", line.verb()));
    };

    let arg = line.argument();
    match verb {
        Verb::Say => say(players, conn_id, arg),
        Verb::Look => look(world, players, conn_id, arg),
        Verb::Go => go(world, players, conn_id, arg),
        Verb::Equip => equip(world, players, conn_id, arg),
        Verb::Inventory => inventory(players, conn_id),
        Verb::Help => HELP_LINES
            .iter()
            .map(|line| Outbound::to_player(conn_id, *line))
            .collect(),
    }
}

fn reply(conn_id: ConnectionId, text: impl Into<String>) -> Vec<Outbound> {
    vec![Outbound::to_player(conn_id, text)]
}

/// The room a player stands in. A player in a room the world does not
/// have is an engine bug; it is logged and the command does nothing.
fn current_room<'w>(world: &'w World, conn_id: ConnectionId, room: &str) -> Option<&'w Room> {
    let found = world.room(room);
    if found.is_none() {
        warn!(%conn_id, room, "player is in a room missing from the world");
    }
    found
}

fn enter(
    world: &World,
    players: &mut PlayerRegistry,
    conn_id: ConnectionId,
    name: &str,
) -> Vec<Outbound> {
    let room = match players.name(conn_id, name) {
        Ok(player) => player.room.clone(),
        Err(e) => {
            debug!(%conn_id, error = %e, "naming failed");
            return Vec::new();
        }
    };

    let mut out = vec![
        Outbound::to_all(format!("{name} entered the game")),
        Outbound::to_player(
            conn_id,
            format!("Welcome to the game, {name}. Type 'commands' for a list of commands."),
        ),
    ];
    if let Some(room) = current_room(world, conn_id, &room) {
        out.push(Outbound::to_player(conn_id, room.description()));
    }
    out
}

fn say(players: &PlayerRegistry, conn_id: ConnectionId, arg: &str) -> Vec<Outbound> {
    let Some(player) = players.get(conn_id) else {
        return Vec::new();
    };
    vec![Outbound::new(
        Audience::Room(player.room.clone()),
        format!("{} says: {arg}", player.display_name()),
    )]
}

fn look(
    world: &World,
    players: &PlayerRegistry,
    conn_id: ConnectionId,
    arg: &str,
) -> Vec<Outbound> {
    let Some(player) = players.get(conn_id) else {
        return Vec::new();
    };
    let Some(room) = current_room(world, conn_id, &player.room) else {
        return Vec::new();
    };

    let mut lines = vec![room.description().to_string()];

    if !room.items().is_empty() {
        if arg.is_empty() {
            for item in room.items() {
                lines.push(format!("There is a {} here.", item.item));
            }
        } else {
            match room.item(arg) {
                Some(item) => lines.push(format!("There is a {} here.", item.item)),
                None => {
                    debug!(%conn_id, target = arg, "look at missing item");
                    lines.push(format!("There is no '{arg}' here."));
                }
            }
        }
    }

    let here: Vec<&str> = players
        .in_room(&player.room)
        .filter_map(|p| p.name.as_str())
        .collect();
    lines.push(format!("Players here: {}", here.join(", ")));

    let exits: Vec<&str> = room.exits().iter().map(|e| e.keyword.as_str()).collect();
    lines.push(format!("Exits are: {}", exits.join(", ")));

    lines
        .into_iter()
        .map(|line| Outbound::to_player(conn_id, line))
        .collect()
}

fn go(
    world: &World,
    players: &mut PlayerRegistry,
    conn_id: ConnectionId,
    arg: &str,
) -> Vec<Outbound> {
    let Some(player) = players.get(conn_id) else {
        return Vec::new();
    };
    let Some(room) = current_room(world, conn_id, &player.room) else {
        return Vec::new();
    };
    let keyword = arg.to_lowercase();
    let Some(exit) = room.exit(&keyword) else {
        debug!(%conn_id, exit = %keyword, "unknown exit");
        return reply(conn_id, format!("Unknown exit '{keyword}'"));
    };

    let name = player.display_name().to_string();
    let from = player.room.clone();
    let to = exit.destination.clone();

    // Nobody but the mover changes room before delivery, so "the old
    // room minus the mover" is the same set before and after the move.
    let departure = Outbound::new(
        Audience::RoomExcept(from, conn_id),
        format!("{name} left via exit '{keyword}'"),
    );

    if let Err(e) = players.move_to(conn_id, to.as_str()) {
        debug!(%conn_id, error = %e, "move failed");
        return Vec::new();
    }

    vec![
        departure,
        Outbound::new(
            Audience::RoomExcept(to.clone(), conn_id),
            format!("{name} arrived via '{keyword}'"),
        ),
        Outbound::to_player(conn_id, format!("You arrive at '{to}'")),
    ]
}

fn equip(
    world: &World,
    players: &mut PlayerRegistry,
    conn_id: ConnectionId,
    arg: &str,
) -> Vec<Outbound> {
    let Some(player) = players.get(conn_id) else {
        return Vec::new();
    };
    let Some(room) = current_room(world, conn_id, &player.room) else {
        return Vec::new();
    };
    let keyword = arg.to_lowercase();
    let Some(found) = room.item(&keyword) else {
        debug!(%conn_id, item = %keyword, "equip of missing item");
        return reply(
            conn_id,
            format!("Could not find '{keyword}' in '{}'", player.room),
        );
    };
    let Some(item) = world.item(&found.item) else {
        warn!(%conn_id, item = %found.item, "room item missing from the catalog");
        return Vec::new();
    };

    if let Err(e) = players.equip(conn_id, item.name.as_str()) {
        debug!(%conn_id, error = %e, "equip failed");
        return Vec::new();
    }

    vec![
        Outbound::to_player(conn_id, format!("You have equipped '{keyword}'")),
        Outbound::to_player(
            conn_id,
            format!(
                "{}: {} damage, speed {}, {}",
                item.name, item.damage, item.attack_speed, item.attack_type
            ),
        ),
    ]
}

fn inventory(players: &PlayerRegistry, conn_id: ConnectionId) -> Vec<Outbound> {
    let Some(p) = players.get(conn_id) else {
        return Vec::new();
    };
    reply(
        conn_id,
        format!(
            "Weapon: {} Armor: {} Gold: {} Backpack: {}",
            p.weapon, p.armor, p.gold, p.backpack
        ),
    )
}
