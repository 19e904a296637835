use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounting::{balance, reconcile, AccountingError};
use crate::data::Snapshot;
use crate::lunchmoney::{Id, Ledger, LedgerError, Tag};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no tag named `{0}`")]
    TagNotFound(String),
    #[error("the ledger has no asset to update")]
    NoAssets,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Accounting(#[from] AccountingError),
}

/// Inclusive date range the placeholder transactions are fetched for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub updated: usize,
    pub balance: Decimal,
    pub asset_updated: bool,
}

/// Tag ids by name ignore case. When several tags share a name the last one
/// listed wins.
pub fn resolve_tag_id(tags: &[Tag], name: &str) -> Option<Id> {
    tags.iter()
        .filter(|tag| tag.name().to_lowercase() == name.to_lowercase())
        .last()
        .map(|tag| tag.id().clone())
}

/// Runs one reconciliation pass against a ledger. Every step is sequential and
/// the first failure ends the run.
pub struct Synchronizer<'a, L: Ledger> {
    ledger: &'a L,
    snapshot: &'a Snapshot,
}

impl<'a, L: Ledger> Synchronizer<'a, L> {
    pub fn new(ledger: &'a L, snapshot: &'a Snapshot) -> Synchronizer<'a, L> {
        Synchronizer { ledger, snapshot }
    }

    pub fn tag_id(&self, tag_name: &str) -> Result<Id, SyncError> {
        let tags = self.ledger.list_tags()?;
        resolve_tag_id(&tags, tag_name).ok_or_else(|| SyncError::TagNotFound(tag_name.to_string()))
    }

    /// The asset balance is written to: the first one the ledger lists.
    pub fn asset_id(&self) -> Result<Id, SyncError> {
        let assets = self.ledger.list_assets()?;
        assets
            .first()
            .map(|asset| asset.id().clone())
            .ok_or(SyncError::NoAssets)
    }

    pub fn run(&self, tag_name: &str, period: Period, today: NaiveDate) -> Result<SyncReport, SyncError> {
        let tag_id = self.tag_id(tag_name)?;
        info!("tag {} has id {}", tag_name, tag_id);

        let transactions = self
            .ledger
            .list_transactions(period.start_date, period.end_date, &tag_id)?;
        info!("fetched {} transactions", transactions.len());

        let instructions = reconcile::reconcile(&transactions, self.snapshot, today)?;
        for instruction in &instructions {
            self.ledger
                .update_transaction(&instruction.transaction_id, &instruction.update)?;
        }
        info!("updated {} transactions", instructions.len());

        let transactions = self
            .ledger
            .list_transactions(period.start_date, period.end_date, &tag_id)?;
        let total = balance::aggregate(&transactions)?;

        let asset_updated = match balance::balance_update(total) {
            Some(new_balance) => {
                let asset_id = self.asset_id()?;
                self.ledger.update_asset(&asset_id, &new_balance)?;
                true
            },
            None => {
                warn!("balance is {}, leaving the asset untouched", total);
                false
            },
        };

        Ok(SyncReport {
            updated: instructions.len(),
            balance: total,
            asset_updated,
        })
    }
}
