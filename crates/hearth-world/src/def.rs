//! Serializable world definitions.
//!
//! A [`WorldDef`] is exactly what a world file contains. It is not used
//! for play directly: [`World::from_def`](crate::World::from_def) checks
//! it and builds the lookup structures the engine reads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A whole world as written in a world file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDef {
    /// Room new players start in.
    pub starting_room: String,

    /// Rooms keyed by their identifier (display name).
    pub rooms: BTreeMap<String, RoomDef>,

    /// Item catalog keyed by item identifier.
    #[serde(default)]
    pub items: BTreeMap<String, ItemDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDef {
    pub description: String,

    /// Exit keyword → destination room identifier, in file order.
    #[serde(default, with = "ordered")]
    pub exits: Vec<(String, String)>,

    /// Item keyword → item identifier, in file order.
    #[serde(default, with = "ordered")]
    pub items: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub description: String,
    pub damage: u32,
    pub attack_speed: u32,
    pub attack_type: AttackType,
}

/// How a weapon delivers its damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackType {
    Melee,
    Ranged,
    Magic,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melee => write!(f, "Melee"),
            Self::Ranged => write!(f, "Ranged"),
            Self::Magic => write!(f, "Magic"),
        }
    }
}

impl WorldDef {
    /// The Rusty Whistle tavern and its surroundings.
    pub fn rusty_whistle() -> Self {
        let rooms = [
            room(
                "Rusty Whistle",
                "You're in the Rusty Whistle, a cozy tavern warmed by an open fire.",
                &[("outside", "Tavern Entrance"), ("washroom", "Washroom")],
                &[],
            ),
            room(
                "Tavern Entrance",
                "You're standing outside the Rusty Whistle. It's raining.",
                &[("inside", "Rusty Whistle"), ("alley", "Dark Alley")],
                &[],
            ),
            room(
                "Washroom",
                "This is the Rusty Whistle's bathroom.",
                &[("tavern", "Rusty Whistle")],
                &[("plunger", "Toilet Plunger")],
            ),
            room(
                "Dark Alley",
                "A dark alley leading north, beside the Rusty Whistle.",
                &[("entrance", "Tavern Entrance")],
                &[],
            ),
            // Not linked from anywhere yet; reachable only by editing the map.
            room(
                "Dimly lit Shop",
                "Mysterious Goods Vendor",
                &[("ally", "Dark Alley")],
                &[],
            ),
        ];

        let items = [(
            "Toilet Plunger".to_string(),
            ItemDef {
                description: "An old Toilet Plunger.".to_string(),
                damage: 1,
                attack_speed: 1,
                attack_type: AttackType::Melee,
            },
        )];

        Self {
            starting_room: "Rusty Whistle".to_string(),
            rooms: rooms.into_iter().collect(),
            items: items.into_iter().collect(),
        }
    }
}

fn room(
    name: &str,
    description: &str,
    exits: &[(&str, &str)],
    items: &[(&str, &str)],
) -> (String, RoomDef) {
    (
        name.to_string(),
        RoomDef {
            description: description.to_string(),
            exits: pairs(exits),
            items: pairs(items),
        },
    )
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Keyword tables are JSON objects on disk but ordered pairs in memory,
/// so rooms list their exits the way the world file does.
mod ordered {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        pairs: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        struct Pairs;

        impl<'de> Visitor<'de> for Pairs {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keywords to identifiers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    pairs.push(entry);
                }
                Ok(pairs)
            }
        }

        deserializer.deserialize_map(Pairs)
    }
}
