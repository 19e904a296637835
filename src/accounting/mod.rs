use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::lunchmoney::Id;

pub mod balance;
pub mod reconcile;

#[cfg(test)]
mod reconcile_tests;

#[derive(Debug, PartialEq, Error)]
pub enum AccountingError {
    #[error("no snapshot row for payee `{payee}` and notes `{notes}`")]
    NoMatchingSnapshotRow { payee: String, notes: String },
    #[error("`{value}` is not a currency amount")]
    InvalidSnapshotValue { value: String },
    #[error("transaction {id} has no amount")]
    MissingAmount { id: Id },
}

/// Parses a brokerage currency cell such as `$1,234.56`, `-$12.00` or `($12.00)`.
pub fn parse_currency(value: &str) -> Result<Decimal, AccountingError> {
    let trimmed = value.trim();
    let (negative, inner) = match trimmed.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let digits: String = inner
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    let amount = Decimal::from_str(&digits).map_err(|_| AccountingError::InvalidSnapshotValue {
        value: value.to_string(),
    })?;

    Ok(if negative { -amount } else { amount })
}

/// Rounds to `dp` places, ties away from zero. Never adds decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
