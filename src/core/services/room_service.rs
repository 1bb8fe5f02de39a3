//! Validated mutations for individual rooms: field updates, payments,
//! and balance resets.

use crate::core::errors::{BillingError, Result};
use crate::core::services::{parse_amount, parse_count};
use crate::domain::RoomLedger;

/// Stateless mutation rules for [`crate::domain::Room`] entries.
///
/// Every operation validates fully before writing, so a failed call
/// leaves the room exactly as it was.
pub struct RoomService;

impl RoomService {
    /// Applies the supplied subset of fields to a room. Omitted fields
    /// stay untouched; a field that fails validation aborts the whole
    /// update before anything is written.
    pub fn update(
        ledger: &mut RoomLedger,
        room_id: &str,
        name: Option<&str>,
        laptop_count: Option<&str>,
        no_laptop_count: Option<&str>,
    ) -> Result<()> {
        if ledger.room(room_id).is_none() {
            return Err(BillingError::RoomNotFound(room_id.to_string()));
        }
        let laptops = laptop_count.map(parse_count).transpose()?;
        let others = no_laptop_count.map(parse_count).transpose()?;

        let room = ledger
            .room_mut(room_id)
            .ok_or_else(|| BillingError::RoomNotFound(room_id.to_string()))?;
        if let Some(name) = name {
            room.responsible_name = name.to_string();
        }
        if let Some(laptops) = laptops {
            room.laptop_count = laptops;
        }
        if let Some(others) = others {
            room.no_laptop_count = others;
        }
        Ok(())
    }

    /// Zeroes a room's accumulated balance, whatever it was.
    pub fn reset_balance(ledger: &mut RoomLedger, room_id: &str) -> Result<()> {
        let room = ledger
            .room_mut(room_id)
            .ok_or_else(|| BillingError::RoomNotFound(room_id.to_string()))?;
        room.accumulated_balance = 0.0;
        Ok(())
    }

    /// Records a partial payment against a room's balance and returns the
    /// amount applied. Payments must satisfy `0 < amount <= balance`; an
    /// overpayment is rejected outright, never clamped.
    pub fn pay(ledger: &mut RoomLedger, room_id: &str, amount_text: &str) -> Result<f64> {
        let room = ledger
            .room_mut(room_id)
            .ok_or_else(|| BillingError::RoomNotFound(room_id.to_string()))?;
        let amount = parse_amount(amount_text)?;
        if amount <= 0.0 {
            return Err(BillingError::NonPositiveAmount);
        }
        if amount > room.accumulated_balance {
            return Err(BillingError::OverpaymentRejected {
                amount,
                balance: room.accumulated_balance,
            });
        }
        room.accumulated_balance -= amount;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Room;

    fn single_room(balance: f64) -> RoomLedger {
        let mut room = Room::new("13");
        room.laptop_count = 1;
        room.no_laptop_count = 2;
        room.accumulated_balance = balance;
        RoomLedger::from_rooms(vec![room])
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut ledger = single_room(0.0);
        RoomService::update(&mut ledger, "13", Some("Fares"), None, Some("5")).unwrap();

        let room = ledger.room("13").unwrap();
        assert_eq!(room.responsible_name, "Fares");
        assert_eq!(room.laptop_count, 1);
        assert_eq!(room.no_laptop_count, 5);
    }

    #[test]
    fn update_with_bad_count_writes_nothing() {
        let mut ledger = single_room(0.0);
        let err =
            RoomService::update(&mut ledger, "13", Some("Fares"), Some("two"), Some("5"))
                .unwrap_err();
        assert!(matches!(err, BillingError::InvalidCount(_)));

        // The name and the count that did parse must be untouched too.
        let room = ledger.room("13").unwrap();
        assert_eq!(room.responsible_name, "unnamed");
        assert_eq!(room.laptop_count, 1);
        assert_eq!(room.no_laptop_count, 2);
    }

    #[test]
    fn update_rejects_unknown_rooms() {
        let mut ledger = single_room(0.0);
        assert!(matches!(
            RoomService::update(&mut ledger, "99", Some("x"), None, None),
            Err(BillingError::RoomNotFound(_))
        ));
    }

    #[test]
    fn payment_reduces_the_balance() {
        let mut ledger = single_room(100.0);
        let paid = RoomService::pay(&mut ledger, "13", "30").unwrap();
        assert_eq!(paid, 30.0);
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 70.0);
    }

    #[test]
    fn payment_may_clear_the_balance_exactly() {
        let mut ledger = single_room(55.5);
        RoomService::pay(&mut ledger, "13", "55.5").unwrap();
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 0.0);
    }

    #[test]
    fn overpayment_is_rejected_and_leaves_the_balance() {
        let mut ledger = single_room(40.0);
        let err = RoomService::pay(&mut ledger, "13", "40.01").unwrap_err();
        assert!(matches!(err, BillingError::OverpaymentRejected { .. }));
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 40.0);
    }

    #[test]
    fn zero_and_negative_payments_are_rejected() {
        let mut ledger = single_room(40.0);
        assert!(matches!(
            RoomService::pay(&mut ledger, "13", "0"),
            Err(BillingError::NonPositiveAmount)
        ));
        assert!(matches!(
            RoomService::pay(&mut ledger, "13", "-5"),
            Err(BillingError::NonPositiveAmount)
        ));
        assert!(matches!(
            RoomService::pay(&mut ledger, "13", "ten"),
            Err(BillingError::InvalidAmount(_))
        ));
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 40.0);
    }

    #[test]
    fn reset_always_yields_zero() {
        let mut ledger = single_room(123.45);
        RoomService::reset_balance(&mut ledger, "13").unwrap();
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 0.0);

        RoomService::reset_balance(&mut ledger, "13").unwrap();
        assert_eq!(ledger.room("13").unwrap().accumulated_balance, 0.0);
    }
}
