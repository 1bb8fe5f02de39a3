pub mod billing_service;
pub mod room_service;

pub use billing_service::{BillSplit, BillingService};
pub use room_service::RoomService;

use crate::core::errors::{BillingError, Result};

/// Parses a decimal amount supplied as free text.
///
/// Accepts any finite value; callers layer their own sign rules on top
/// (bills must be non-negative, payments strictly positive).
pub(crate) fn parse_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BillingError::InvalidAmount(trimmed.to_string())),
    }
}

/// Parses an occupant count supplied as free text. Negative values fail
/// the same way garbage does: counts are non-negative by construction.
pub(crate) fn parse_count(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| BillingError::InvalidCount(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_parsing_accepts_decimals_and_trims() {
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);
    }

    #[test]
    fn amount_parsing_rejects_garbage_and_non_finite() {
        assert!(matches!(
            parse_amount("abc"),
            Err(BillingError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("inf"),
            Err(BillingError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("NaN"),
            Err(BillingError::InvalidAmount(_))
        ));
    }

    #[test]
    fn count_parsing_rejects_negatives_and_fractions() {
        assert_eq!(parse_count("4").unwrap(), 4);
        assert!(matches!(
            parse_count("-1"),
            Err(BillingError::InvalidCount(_))
        ));
        assert!(matches!(
            parse_count("2.5"),
            Err(BillingError::InvalidCount(_))
        ));
    }
}
