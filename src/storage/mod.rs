pub mod json_backend;

use crate::core::errors::Result;
use crate::domain::RoomLedger;

/// Abstraction over persistence backends capable of storing the room ledger.
///
/// The engine owns a boxed store so tests can run against independent
/// temporary locations (or an in-memory fake) instead of a shared path.
pub trait LedgerStore: Send + Sync {
    /// Reads the persisted ledger. Errors surface as data; the caller
    /// decides whether a failed load degrades to the seeded default.
    fn load(&self) -> Result<RoomLedger>;

    /// Serializes the full ledger, overwriting prior contents.
    fn save(&self, ledger: &RoomLedger) -> Result<()>;
}

pub use json_backend::JsonStore;
