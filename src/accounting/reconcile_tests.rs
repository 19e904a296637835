use anyhow::{bail, Result};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use super::reconcile::{reconcile, UpdateInstruction};
use super::*;
use crate::data::{Snapshot, SnapshotRow};
use crate::lunchmoney::{Transaction, TransactionUpdate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
}

fn snapshot(rows: &[(&str, &str, &str)]) -> Snapshot {
    rows.iter()
        .map(|(account_name, description, current_value)| SnapshotRow::new(*account_name, *description, *current_value))
        .collect()
}

fn instruction(id: i64, amount: Decimal) -> UpdateInstruction {
    UpdateInstruction {
        transaction_id: Id::from(id),
        update: TransactionUpdate { date: today(), amount },
    }
}

#[test]
fn test_matching_transaction() -> Result<()> {
    let snapshot = snapshot(&[("Fidelity", "Brokerage", "$500.00")]);
    let transactions = vec![Transaction::new(42, Some("Fidelity"), Some("Brokerage"))];

    let instructions = reconcile(&transactions, &snapshot, today())?;

    assert_eq!(instructions, vec![instruction(42, dec!(-500.00))]);
    assert_eq!(instructions[0].update.amount.to_string(), "-500.00");

    Ok(())
}

#[test]
fn test_every_match_is_dated_today() -> Result<()> {
    let snapshot = snapshot(&[("Bank", "Account", "$12345.5555")]);
    let transactions: Vec<Transaction> = (1..=11)
        .map(|id| {
            Transaction::new(id, Some("Bank"), Some("Account"))
                .with_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
        })
        .collect();

    let instructions = reconcile(&transactions, &snapshot, today())?;

    assert_eq!(instructions.len(), 11);
    for (id, instruction) in (1..=11).zip(&instructions) {
        assert_eq!(instruction.transaction_id, Id::from(id));
        assert_eq!(instruction.update.date, today());
        assert_eq!(instruction.update.amount, dec!(-12345.5555));
    }

    Ok(())
}

#[test]
fn test_keeps_transaction_order() -> Result<()> {
    let snapshot = snapshot(&[
        ("Fidelity", "Brokerage", "$500.00"),
        ("Fidelity", "Roth IRA", "$20.10"),
        ("Vanguard", "401k", "$7.00"),
    ]);
    let transactions = vec![
        Transaction::new(3, Some("Vanguard"), Some("401k")),
        Transaction::new(1, Some("Fidelity"), Some("Roth IRA")),
        Transaction::new(2, Some("Fidelity"), Some("Brokerage")),
    ];

    let instructions = reconcile(&transactions, &snapshot, today())?;

    assert_eq!(
        instructions,
        vec![
            instruction(3, dec!(-7.00)),
            instruction(1, dec!(-20.10)),
            instruction(2, dec!(-500.00)),
        ]
    );

    Ok(())
}

#[test]
fn test_skips_without_payee() -> Result<()> {
    let snapshot = snapshot(&[("Bank", "Account", "$1.00")]);
    let transactions = vec![
        Transaction::new(1, None, Some("Account")),
        Transaction::new(2, Some(""), Some("Account")),
    ];

    assert_eq!(reconcile(&transactions, &snapshot, today())?, vec![]);

    Ok(())
}

#[test]
fn test_skips_notes_not_in_snapshot() -> Result<()> {
    let snapshot = snapshot(&[("Bank", "Account", "$1.00")]);
    let transactions = vec![
        Transaction::new(4, Some("Bank"), Some("Account")),
        Transaction::new(5, Some("Bank"), Some("Accpimt")),
        Transaction::new(6, Some("Bank"), None),
    ];

    assert_eq!(reconcile(&transactions, &snapshot, today())?, vec![instruction(4, dec!(-1.00))]);

    Ok(())
}

#[test]
fn test_negative_export_value_stays_negative() -> Result<()> {
    let snapshot = snapshot(&[("Margin", "Loan", "-$250.00")]);
    let transactions = vec![Transaction::new(1, Some("Margin"), Some("Loan"))];

    assert_eq!(reconcile(&transactions, &snapshot, today())?, vec![instruction(1, dec!(-250.00))]);

    Ok(())
}

#[test]
fn test_duplicate_rows_take_first() -> Result<()> {
    let snapshot = snapshot(&[("Bank", "Account", "$1.00"), ("Bank", "Account", "$2.00")]);
    let transactions = vec![Transaction::new(1, Some("Bank"), Some("Account"))];

    assert_eq!(reconcile(&transactions, &snapshot, today())?, vec![instruction(1, dec!(-1.00))]);

    Ok(())
}

#[test]
fn test_notes_matching_another_column() -> Result<()> {
    // "Brokerage" is in the snapshot, but under a different account name.
    let snapshot = snapshot(&[("Vanguard", "Brokerage", "$9.00")]);
    let transactions = vec![Transaction::new(1, Some("Fidelity"), Some("Brokerage"))];

    if let Err(err) = reconcile(&transactions, &snapshot, today()) {
        assert_eq!(
            err,
            AccountingError::NoMatchingSnapshotRow {
                payee: "Fidelity".to_string(),
                notes: "Brokerage".to_string(),
            }
        );
    } else {
        bail!("notes found only in another row should not reconcile");
    }

    Ok(())
}

#[test]
fn test_notes_matching_a_value_cell() -> Result<()> {
    let snapshot = snapshot(&[("Fidelity", "Brokerage", "$9.00")]);
    let transactions = vec![Transaction::new(1, Some("Fidelity"), Some("$9.00"))];

    if let Err(err) = reconcile(&transactions, &snapshot, today()) {
        assert!(matches!(err, AccountingError::NoMatchingSnapshotRow { .. }));
    } else {
        bail!("a value cell is not a description");
    }

    Ok(())
}

#[test]
fn test_invalid_export_value() -> Result<()> {
    let snapshot = snapshot(&[("Fidelity", "Brokerage", "pending")]);
    let transactions = vec![Transaction::new(1, Some("Fidelity"), Some("Brokerage"))];

    if let Err(err) = reconcile(&transactions, &snapshot, today()) {
        assert_eq!(err, AccountingError::InvalidSnapshotValue { value: "pending".to_string() });
    } else {
        bail!("a non-numeric value should not reconcile");
    }

    Ok(())
}

#[test]
fn test_failure_returns_no_instructions() -> Result<()> {
    let snapshot = snapshot(&[("Bank", "Account", "$1.00"), ("Other", "Orphan", "$2.00")]);
    let transactions = vec![
        Transaction::new(1, Some("Bank"), Some("Account")),
        Transaction::new(2, Some("Bank"), Some("Orphan")),
        Transaction::new(3, Some("Bank"), Some("Account")),
    ];

    assert!(reconcile(&transactions, &snapshot, today()).is_err());

    Ok(())
}
