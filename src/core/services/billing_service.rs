//! Bill splitting: the two-part weighted formula and its application.

use crate::core::errors::{BillingError, Result};
use crate::core::services::parse_amount;
use crate::domain::{Room, RoomLedger};

/// Per-student rates produced from one raw bill amount.
///
/// A split is ephemeral and never persisted: the caller computes one,
/// shows it, and hands the same instance back to commit it. Holding a
/// `BillSplit` is the confirmation that the quote was seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillSplit {
    /// Flat per-capita rate: half the bill spread across every occupant.
    pub student_share: f64,
    /// Surcharge per device owner: the other half spread across occupants
    /// with a laptop, layered on top of `student_share`.
    pub laptop_share: f64,
}

/// Stateless split computation and application over a [`RoomLedger`].
///
/// Device owners draw more power, so half the bill is charged per head
/// for fairness and the other half only to device owners for
/// cost causation.
pub struct BillingService;

impl BillingService {
    /// Converts a raw bill amount into a rate pair without touching state.
    pub fn compute_split(ledger: &RoomLedger, bill_amount_text: &str) -> Result<BillSplit> {
        let amount = parse_amount(bill_amount_text)?;
        if amount < 0.0 {
            return Err(BillingError::InvalidAmount(
                bill_amount_text.trim().to_string(),
            ));
        }

        let total_students = ledger.total_students();
        let total_with_laptop = ledger.total_with_laptop();
        if total_students == 0 {
            return Err(BillingError::NoStudents);
        }

        let student_share = (amount * 0.5) / total_students as f64;
        let laptop_share = if total_with_laptop > 0 {
            (amount * 0.5) / total_with_laptop as f64
        } else {
            0.0
        };

        Ok(BillSplit {
            student_share,
            laptop_share,
        })
    }

    /// Adds every room's charge for `split` to its accumulated balance.
    ///
    /// Visits all rooms in ledger order in a single in-memory pass; there
    /// is no partially-applied state observable afterwards.
    pub fn apply_split(ledger: &mut RoomLedger, split: &BillSplit) {
        for room in ledger.rooms_mut() {
            let charge = Self::room_charge(room, split);
            room.accumulated_balance += charge;
        }
    }

    /// A single room's total charge for a split:
    /// `occupants x student_share + laptop_count x laptop_share`.
    pub fn room_charge(room: &Room, split: &BillSplit) -> f64 {
        room.occupants() as f64 * split.student_share
            + f64::from(room.laptop_count) * split.laptop_share
    }
}
