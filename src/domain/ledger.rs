//! The room ledger: an ordered, fixed-key collection of rooms.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::room::{Room, RoomRecord};

/// Room identifiers seeded when no prior state exists.
pub const DEFAULT_ROOM_IDS: [&str; 10] = [
    "1112", "13", "2122", "23", "31", "32", "33", "41", "42", "43",
];

/// The full set of rooms, keyed by identifier.
///
/// Insertion order is preserved so display and iteration stay
/// deterministic. Keys are fixed once provisioned: rooms are never created
/// or deleted at runtime, only mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomLedger {
    rooms: Vec<Room>,
}

impl RoomLedger {
    /// Builds the built-in default ledger used when storage is absent or
    /// unreadable: ten rooms with placeholder names and zeroed fields.
    pub fn seeded() -> Self {
        Self {
            rooms: DEFAULT_ROOM_IDS.iter().copied().map(Room::new).collect(),
        }
    }

    /// Builds a ledger from pre-provisioned rooms, keeping their order.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == id)
    }

    /// Iterates rooms in stable (provisioned) order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub(crate) fn rooms_mut(&mut self) -> impl Iterator<Item = &mut Room> {
        self.rooms.iter_mut()
    }

    /// Total occupants across all rooms. Widened so the sum is defined
    /// even when every room carries the maximum count.
    pub fn total_students(&self) -> u64 {
        self.rooms.iter().map(Room::occupants).sum()
    }

    /// Occupants owning a qualifying device, across all rooms.
    pub fn total_with_laptop(&self) -> u64 {
        self.rooms
            .iter()
            .map(|room| u64::from(room.laptop_count))
            .sum()
    }

    /// Sum of every room's accumulated balance.
    pub fn total_balance(&self) -> f64 {
        self.rooms.iter().map(|room| room.accumulated_balance).sum()
    }
}

// The on-disk shape is a JSON object mapping id to the positional
// 4-element record. Serialization walks the rooms in ledger order;
// deserialization keeps the encounter order of the file so a round trip
// preserves it.
impl Serialize for RoomLedger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.rooms.len()))?;
        for room in &self.rooms {
            map.serialize_entry(&room.id, &room.to_record())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RoomLedger {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LedgerVisitor;

        impl<'de> Visitor<'de> for LedgerVisitor {
            type Value = RoomLedger;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of room id to [name, laptops, no_laptops, balance]")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut rooms: Vec<Room> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, record)) = access.next_entry::<String, RoomRecord>()? {
                    if rooms.iter().any(|room| room.id == id) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate room id `{}`",
                            id
                        )));
                    }
                    rooms.push(Room::from_record(id, record));
                }
                Ok(RoomLedger { rooms })
            }
        }

        deserializer.deserialize_map(LedgerVisitor)
    }
}
