//! The unit of allocation: a room with occupant counts and a running balance.

use serde::{Deserialize, Serialize};

/// Label stored for a room before anyone claims responsibility for it.
pub const PLACEHOLDER_NAME: &str = "unnamed";

/// A single room tracked by the ledger.
///
/// Identifiers are provisioned externally (seeded or read from storage);
/// the engine never mints or retires them. Counts are unsigned, so the
/// non-negativity invariant holds structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub responsible_name: String,
    pub laptop_count: u32,
    pub no_laptop_count: u32,
    pub accumulated_balance: f64,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            responsible_name: PLACEHOLDER_NAME.to_string(),
            laptop_count: 0,
            no_laptop_count: 0,
            accumulated_balance: 0.0,
        }
    }

    /// Total occupants in the room, with and without a device.
    ///
    /// Widened so the sum is defined for any pair of stored counts.
    pub fn occupants(&self) -> u64 {
        u64::from(self.laptop_count) + u64::from(self.no_laptop_count)
    }

    pub fn from_record(id: impl Into<String>, record: RoomRecord) -> Self {
        let RoomRecord(responsible_name, laptop_count, no_laptop_count, accumulated_balance) =
            record;
        Self {
            id: id.into(),
            responsible_name,
            laptop_count,
            no_laptop_count,
            accumulated_balance,
        }
    }

    pub fn to_record(&self) -> RoomRecord {
        RoomRecord(
            self.responsible_name.clone(),
            self.laptop_count,
            self.no_laptop_count,
            self.accumulated_balance,
        )
    }
}

/// On-disk positional shape of a room:
/// `[responsible_name, laptop_count, no_laptop_count, accumulated_balance]`.
///
/// Kept for backward compatibility with existing data files; in memory the
/// named [`Room`] struct is the only representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord(pub String, pub u32, pub u32, pub f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_starts_with_placeholder_and_zeroes() {
        let room = Room::new("31");
        assert_eq!(room.responsible_name, PLACEHOLDER_NAME);
        assert_eq!(room.occupants(), 0);
        assert_eq!(room.accumulated_balance, 0.0);
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let mut room = Room::new("42");
        room.responsible_name = "Sami".into();
        room.laptop_count = 2;
        room.no_laptop_count = 1;
        room.accumulated_balance = 35.5;

        let restored = Room::from_record("42", room.to_record());
        assert_eq!(restored, room);
    }

    #[test]
    fn record_serializes_as_positional_array() {
        let record = RoomRecord("Sami".into(), 2, 1, 35.5);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"["Sami",2,1,35.5]"#);
    }
}
