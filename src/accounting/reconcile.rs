use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::{parse_currency, AccountingError};
use crate::data::Snapshot;
use crate::lunchmoney::{Id, Transaction, TransactionUpdate};

/// A rewrite of one ledger transaction, applied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInstruction {
    pub transaction_id: Id,
    pub update: TransactionUpdate,
}

/// Investment balances are booked as outflows, so every amount comes out
/// negative whatever the sign in the export.
pub fn outflow(current_value: &str) -> Result<Decimal, AccountingError> {
    let value = parse_currency(current_value)?.abs();
    Ok(if value.is_zero() { value } else { -value })
}

/// Matches `transactions` against the snapshot and returns one instruction per
/// matched transaction, in transaction order, dated `today`.
///
/// A transaction takes part when it has a payee and its notes appear anywhere
/// in the snapshot, in any column. The row it takes its value from is then
/// looked up by (payee, notes); when the notes only matched some other column
/// that lookup can come up empty, which is reported as
/// [`AccountingError::NoMatchingSnapshotRow`].
pub fn reconcile(
    transactions: &[Transaction],
    snapshot: &Snapshot,
    today: NaiveDate,
) -> Result<Vec<UpdateInstruction>, AccountingError> {
    let mut instructions = Vec::new();

    for transaction in transactions {
        let payee = match transaction.payee().as_deref() {
            Some(payee) if !payee.is_empty() => payee,
            _ => {
                debug!("skipping transaction {} without payee", transaction.id());
                continue;
            },
        };
        let notes = match transaction.notes().as_deref() {
            Some(notes) if snapshot.contains_value(notes) => notes,
            _ => {
                debug!("skipping transaction {} with notes not in snapshot", transaction.id());
                continue;
            },
        };

        let row = snapshot
            .find(payee, notes)
            .ok_or_else(|| AccountingError::NoMatchingSnapshotRow {
                payee: payee.to_string(),
                notes: notes.to_string(),
            })?;

        instructions.push(UpdateInstruction {
            transaction_id: transaction.id().clone(),
            update: TransactionUpdate {
                date: today,
                amount: outflow(row.current_value())?,
            },
        });
    }

    Ok(instructions)
}
