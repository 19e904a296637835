use rust_decimal::Decimal;

use super::{round_half_up, AccountingError};
use crate::lunchmoney::Transaction;

pub const BALANCE_PRECISION: u32 = 2;

/// Formatting of an empty sum. Only this exact text suppresses the asset update.
const EMPTY_BALANCE: &str = "0";

/// Sum of the absolute transaction amounts, rounded half-up to cents.
pub fn aggregate(transactions: &[Transaction]) -> Result<Decimal, AccountingError> {
    let total = transactions.iter().try_fold(Decimal::ZERO, |total, transaction| {
        let amount = transaction
            .amount()
            .as_ref()
            .ok_or_else(|| AccountingError::MissingAmount { id: transaction.id().clone() })?;
        Ok::<_, AccountingError>(total + amount.abs())
    })?;

    Ok(round_half_up(total, BALANCE_PRECISION))
}

/// The text to push to the asset for `balance`, or `None` when it formats as
/// exactly `"0"`.
///
/// The check is on the text: a list of zero amounts sums to `0.00`, which is
/// still pushed.
pub fn balance_update(balance: Decimal) -> Option<String> {
    let balance = balance.to_string();
    if balance == EMPTY_BALANCE {
        return None;
    }

    Some(balance)
}
