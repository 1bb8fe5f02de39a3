//! Facade that owns the in-memory ledger and sequences mutate-then-persist.

use tracing::warn;

use crate::core::errors::Result;
use crate::core::services::{BillSplit, BillingService, RoomService};
use crate::domain::{Room, RoomLedger};
use crate::storage::LedgerStore;

/// The billing engine: the single owner of the room ledger for a process.
///
/// The store is injected, so callers (and tests) decide where state
/// lives. Every mutating operation saves afterwards; a failed save is
/// reported but the in-memory mutation stands, and callers re-attempt
/// [`BillingEngine::save`] rather than the business operation.
pub struct BillingEngine {
    ledger: RoomLedger,
    storage: Box<dyn LedgerStore>,
}

impl BillingEngine {
    /// Loads persisted state, degrading to the seeded default ledger when
    /// storage is absent or unreadable.
    pub fn load(storage: Box<dyn LedgerStore>) -> Self {
        let ledger = match storage.load() {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!("no usable persisted ledger, seeding defaults: {err}");
                RoomLedger::seeded()
            }
        };
        Self { ledger, storage }
    }

    /// Wraps an existing ledger; used by tests and one-off tooling.
    pub fn with_ledger(ledger: RoomLedger, storage: Box<dyn LedgerStore>) -> Self {
        Self { ledger, storage }
    }

    pub fn ledger(&self) -> &RoomLedger {
        &self.ledger
    }

    /// Read-only iteration over rooms in stable ledger order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.ledger.rooms()
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.ledger.room(room_id)
    }

    /// Quotes the per-student rates for a raw bill amount. Pure: the
    /// ledger is only read.
    pub fn compute_split(&self, bill_amount_text: &str) -> Result<BillSplit> {
        BillingService::compute_split(&self.ledger, bill_amount_text)
    }

    /// Commits a previously computed split: charges every room in order,
    /// then saves. Returns the save success flag; the charges stand
    /// either way.
    pub fn apply_split(&mut self, split: &BillSplit) -> bool {
        BillingService::apply_split(&mut self.ledger, split);
        self.save()
    }

    /// Updates any subset of a room's mutable fields, then saves.
    pub fn update_room(
        &mut self,
        room_id: &str,
        name: Option<&str>,
        laptop_count: Option<&str>,
        no_laptop_count: Option<&str>,
    ) -> Result<()> {
        RoomService::update(&mut self.ledger, room_id, name, laptop_count, no_laptop_count)?;
        self.persist()
    }

    /// Zeroes a room's accumulated balance, then saves.
    pub fn reset_balance(&mut self, room_id: &str) -> Result<()> {
        RoomService::reset_balance(&mut self.ledger, room_id)?;
        self.persist()
    }

    /// Records a payment against a room, then saves. Returns the amount
    /// actually applied.
    pub fn pay(&mut self, room_id: &str, amount_text: &str) -> Result<f64> {
        let paid = RoomService::pay(&mut self.ledger, room_id, amount_text)?;
        self.persist()?;
        Ok(paid)
    }

    /// Re-attempts persisting the current in-memory state.
    pub fn save(&self) -> bool {
        self.persist().is_ok()
    }

    fn persist(&self) -> Result<()> {
        self.storage.save(&self.ledger).map_err(|err| {
            warn!("failed to persist room ledger: {err}");
            err
        })
    }
}
