//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, MoneyOre, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Validate the settlement invariant of a row:
/// `collect_to_me >= 0`, `collect_from_me >= 0`, and their sum must not
/// exceed the absolute transaction amount.
pub(crate) fn validate_settlements(
    amount: MoneyOre,
    collect_to_me: MoneyOre,
    collect_from_me: MoneyOre,
) -> ResultEngine<()> {
    if collect_to_me.is_negative() {
        return Err(EngineError::Validation(
            "collect_to_me must be >= 0".to_string(),
        ));
    }
    if collect_from_me.is_negative() {
        return Err(EngineError::Validation(
            "collect_from_me must be >= 0".to_string(),
        ));
    }
    let sum = collect_to_me
        .checked_add(collect_from_me)
        .ok_or_else(|| EngineError::Validation("settlement amounts too large".to_string()))?;
    if sum > amount.abs() {
        return Err(EngineError::Validation(
            "collect_to_me + collect_from_me must not exceed the transaction amount".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlements_within_amount_pass() {
        let amount = MoneyOre::new(-4500);
        assert!(validate_settlements(amount, MoneyOre::new(2000), MoneyOre::new(2500)).is_ok());
        assert!(validate_settlements(amount, MoneyOre::ZERO, MoneyOre::ZERO).is_ok());
    }

    #[test]
    fn settlements_exceeding_amount_fail() {
        let amount = MoneyOre::new(-4500);
        let err =
            validate_settlements(amount, MoneyOre::new(2000), MoneyOre::new(2501)).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn negative_settlements_fail() {
        let amount = MoneyOre::new(-4500);
        assert!(validate_settlements(amount, MoneyOre::new(-1), MoneyOre::ZERO).is_err());
        assert!(validate_settlements(amount, MoneyOre::ZERO, MoneyOre::new(-1)).is_err());
    }
}
