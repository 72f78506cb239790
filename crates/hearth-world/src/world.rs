//! The validated, read-only world the engine plays in.

use std::collections::HashMap;
use std::path::Path;

use crate::{AttackType, WorldDef, WorldError};

/// A directed edge out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    /// Keyword as spelled in the world definition.
    pub keyword: String,
    /// Identifier of the room this exit leads to.
    pub destination: String,
}

/// An item lying in a room, under the keyword players use for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomItem {
    pub keyword: String,
    /// Identifier of the catalog [`Item`].
    pub item: String,
}

/// A node of the room graph.
///
/// Exits and items are kept in definition order for display, with a
/// lower-cased keyword index for lookups.
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    description: String,
    exits: Vec<Exit>,
    exit_index: HashMap<String, usize>,
    items: Vec<RoomItem>,
    item_index: HashMap<String, usize>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    pub fn items(&self) -> &[RoomItem] {
        &self.items
    }

    /// Finds an exit by player-typed keyword, ignoring case.
    pub fn exit(&self, keyword: &str) -> Option<&Exit> {
        self.exit_index
            .get(&keyword.to_lowercase())
            .map(|&i| &self.exits[i])
    }

    /// Finds an item by player-typed keyword, ignoring case.
    pub fn item(&self, keyword: &str) -> Option<&RoomItem> {
        self.item_index
            .get(&keyword.to_lowercase())
            .map(|&i| &self.items[i])
    }
}

/// An immutable catalog entry. There is one of each; rooms refer to it
/// by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub damage: u32,
    pub attack_speed: u32,
    pub attack_type: AttackType,
}

/// The room graph and item catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct World {
    starting_room: String,
    rooms: HashMap<String, Room>,
    items: HashMap<String, Item>,
}

impl World {
    /// Validates a definition and builds the world from it.
    ///
    /// # Errors
    /// [`WorldError::Invalid`] listing every dangling exit, dangling item
    /// reference, keyword clash, and a missing starting room.
    pub fn from_def(def: WorldDef) -> Result<Self, WorldError> {
        let problems = validate(&def);
        if !problems.is_empty() {
            return Err(WorldError::Invalid(problems));
        }

        let items = def
            .items
            .into_iter()
            .map(|(name, item)| {
                let entry = Item {
                    name: name.clone(),
                    description: item.description,
                    damage: item.damage,
                    attack_speed: item.attack_speed,
                    attack_type: item.attack_type,
                };
                (name, entry)
            })
            .collect();

        let rooms = def
            .rooms
            .into_iter()
            .map(|(name, room)| {
                let exits: Vec<Exit> = room
                    .exits
                    .into_iter()
                    .map(|(keyword, destination)| Exit {
                        keyword,
                        destination,
                    })
                    .collect();
                let items: Vec<RoomItem> = room
                    .items
                    .into_iter()
                    .map(|(keyword, item)| RoomItem { keyword, item })
                    .collect();
                let entry = Room {
                    name: name.clone(),
                    description: room.description,
                    exit_index: index(exits.iter().map(|e| e.keyword.as_str())),
                    item_index: index(items.iter().map(|i| i.keyword.as_str())),
                    exits,
                    items,
                };
                (name, entry)
            })
            .collect();

        let world = Self {
            starting_room: def.starting_room,
            rooms,
            items,
        };
        tracing::info!(
            rooms = world.rooms.len(),
            items = world.items.len(),
            start = %world.starting_room,
            "world loaded"
        );
        Ok(world)
    }

    /// Parses and validates a JSON world definition.
    pub fn from_json_str(json: &str) -> Result<Self, WorldError> {
        let def: WorldDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    /// Reads, parses and validates a JSON world file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The built-in Rusty Whistle world.
    pub fn builtin() -> Result<Self, WorldError> {
        Self::from_def(WorldDef::rusty_whistle())
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Where newly connected players are placed.
    pub fn starting_room(&self) -> &str {
        &self.starting_room
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

fn index<'a>(keywords: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    keywords
        .enumerate()
        .map(|(i, k)| (k.to_lowercase(), i))
        .collect()
}

/// Returns one message per problem. Empty means the definition is sound.
fn validate(def: &WorldDef) -> Vec<String> {
    let mut problems = Vec::new();

    if !def.rooms.contains_key(&def.starting_room) {
        problems.push(format!(
            "starting room '{}' does not exist",
            def.starting_room
        ));
    }

    for (name, room) in &def.rooms {
        for (keyword, destination) in &room.exits {
            if !def.rooms.contains_key(destination) {
                problems.push(format!(
                    "exit '{keyword}' of room '{name}' leads to unknown room '{destination}'"
                ));
            }
        }
        for (keyword, item) in &room.items {
            if !def.items.contains_key(item) {
                problems.push(format!(
                    "item '{keyword}' in room '{name}' refers to unknown item '{item}'"
                ));
            }
        }
        check_clashes(name, "exit", room.exits.iter().map(|(k, _)| k), &mut problems);
        check_clashes(name, "item", room.items.iter().map(|(k, _)| k), &mut problems);
    }

    problems
}

/// Keywords are matched case-insensitively, so a repeated keyword, or
/// two that differ only in case, would be ambiguous.
fn check_clashes<'a>(
    room: &str,
    kind: &str,
    keywords: impl Iterator<Item = &'a String>,
    problems: &mut Vec<String>,
) {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for keyword in keywords {
        match seen.insert(keyword.to_lowercase(), keyword) {
            Some(other) if other == keyword => problems.push(format!(
                "{kind} keyword '{keyword}' appears twice in room '{room}'"
            )),
            Some(other) => problems.push(format!(
                "{kind} keywords '{other}' and '{keyword}' in room '{room}' differ only in case"
            )),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::builtin().expect("built-in world is valid")
    }

    #[test]
    fn test_builtin_world_is_valid() {
        let w = world();
        assert_eq!(w.room_count(), 5);
        assert_eq!(w.starting_room(), "Rusty Whistle");
        assert!(w.room("Dark Alley").is_some());
        assert!(w.item("Toilet Plunger").is_some());
    }

    #[test]
    fn test_unknown_ids_are_none() {
        let w = world();
        assert!(w.room("Attic").is_none());
        assert!(w.item("Sword").is_none());
    }

    #[test]
    fn test_exit_lookup_folds_case() {
        let w = world();
        let tavern = w.room("Rusty Whistle").unwrap();
        let exit = tavern.exit("OutSide").unwrap();
        assert_eq!(exit.keyword, "outside");
        assert_eq!(exit.destination, "Tavern Entrance");
        assert!(tavern.exit("nowhere").is_none());
    }

    #[test]
    fn test_catalog_keywords_keep_their_spelling() {
        let mut def = WorldDef::rusty_whistle();
        let washroom = def.rooms.get_mut("Washroom").unwrap();
        washroom.exits.clear();
        washroom
            .exits
            .push(("Tavern".into(), "Rusty Whistle".into()));
        let w = World::from_def(def).unwrap();
        let room = w.room("Washroom").unwrap();
        assert_eq!(room.exits()[0].keyword, "Tavern");
        assert_eq!(room.exit("tavern").unwrap().keyword, "Tavern");
    }

    #[test]
    fn test_exits_keep_definition_order() {
        let w = world();
        let entrance = w.room("Tavern Entrance").unwrap();
        let keywords: Vec<&str> = entrance.exits().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, ["inside", "alley"]);
    }

    #[test]
    fn test_json_exit_order_survives_loading() {
        let json = r#"{
            "starting_room": "Hall",
            "rooms": {
                "Hall": { "description": "A hall.", "exits": { "west": "Hall", "east": "Hall", "down": "Hall" } }
            }
        }"#;
        let w = World::from_json_str(json).unwrap();
        let keywords: Vec<&str> = w
            .room("Hall")
            .unwrap()
            .exits()
            .iter()
            .map(|e| e.keyword.as_str())
            .collect();
        assert_eq!(keywords, ["west", "east", "down"]);
    }

    #[test]
    fn test_repeated_keyword_is_rejected() {
        let json = r#"{
            "starting_room": "Hall",
            "rooms": { "Hall": { "description": "A hall.", "exits": { "up": "Hall", "up": "Hall" } } }
        }"#;
        let Err(WorldError::Invalid(problems)) = World::from_json_str(json) else {
            panic!("expected Invalid");
        };
        assert_eq!(problems, ["exit keyword 'up' appears twice in room 'Hall'"]);
    }

    #[test]
    fn test_item_lookup_folds_case() {
        let w = world();
        let washroom = w.room("Washroom").unwrap();
        assert_eq!(washroom.item("PLUNGER").unwrap().item, "Toilet Plunger");
        assert!(washroom.item("mop").is_none());
    }

    #[test]
    fn test_dangling_exit_is_rejected() {
        let mut def = WorldDef::rusty_whistle();
        def.rooms
            .get_mut("Dark Alley")
            .unwrap()
            .exits
            .push(("north".into(), "Sewer".into()));
        let err = World::from_def(def).unwrap_err();
        match err {
            WorldError::Invalid(problems) => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("Sewer"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dangling_item_and_start_are_all_reported() {
        let mut def = WorldDef::rusty_whistle();
        def.starting_room = "Lobby".into();
        def.items.clear();
        let err = World::from_def(def).unwrap_err();
        let WorldError::Invalid(problems) = err else {
            panic!("expected Invalid");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("Lobby")));
        assert!(problems.iter().any(|p| p.contains("Toilet Plunger")));
    }

    #[test]
    fn test_case_clashing_keywords_are_rejected() {
        let mut def = WorldDef::rusty_whistle();
        def.rooms
            .get_mut("Rusty Whistle")
            .unwrap()
            .exits
            .push(("Outside".into(), "Tavern Entrance".into()));
        assert!(matches!(
            World::from_def(def),
            Err(WorldError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_json_str_reports_parse_errors() {
        assert!(matches!(
            World::from_json_str("{ not json"),
            Err(WorldError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = World::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
