pub mod ledger;
pub mod room;

pub use ledger::RoomLedger;
pub use room::{Room, RoomRecord};
