use std::fmt;

use chrono::NaiveDate;
use getset::Getters;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod client;
pub mod requests;

pub use client::HttpLedger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("could not reach the ledger service: {0}")]
    Transport(String),
    #[error("ledger service answered with status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("ledger service rejected the request: {body}")]
    Rejected { body: String },
    #[error("unexpected response from the ledger service: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Identifier assigned by the ledger service. The service hands out numbers,
/// but nothing here depends on that, so they are kept as their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct Id(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(number) => Id(number.to_string()),
            RawId::Text(text) => Id(text),
        }
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id(id.to_string())
    }
}

macro_rules! id_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Id {
                fn from(id: $int) -> Self {
                    Id(id.to_string())
                }
            }
        )*
    };
}

id_from_integer!(i32, i64, u32, u64);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Tag {
    id: Id,
    name: String,
}

impl Tag {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Tag {
        Tag {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Transaction {
    id: Id,
    #[serde(default)]
    payee: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    amount: Option<Decimal>,
    #[serde(default)]
    date: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(id: impl Into<Id>, payee: Option<&str>, notes: Option<&str>) -> Transaction {
        Transaction {
            id: id.into(),
            payee: payee.map(str::to_string),
            notes: notes.map(str::to_string),
            amount: None,
            date: None,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Transaction {
        self.amount = Some(amount);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Transaction {
        self.date = Some(date);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Asset {
    id: Id,
    #[serde(default)]
    balance: Option<Decimal>,
}

impl Asset {
    pub fn new(id: impl Into<Id>, balance: Option<Decimal>) -> Asset {
        Asset {
            id: id.into(),
            balance,
        }
    }
}

/// The fields rewritten on a reconciled transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionUpdate {
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionList {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssetList {
    pub assets: Vec<Asset>,
}

/// Request/response contract of the remote ledger service.
///
/// Every call blocks until the service answers. Nothing is retried: a failed
/// call surfaces its error to the caller unchanged.
pub trait Ledger {
    fn list_tags(&self) -> Result<Vec<Tag>, LedgerError>;

    fn list_transactions(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        tag_id: &Id,
    ) -> Result<Vec<Transaction>, LedgerError>;

    fn update_transaction(&self, id: &Id, update: &TransactionUpdate) -> Result<(), LedgerError>;

    fn list_assets(&self) -> Result<Vec<Asset>, LedgerError>;

    /// `balance` is sent verbatim, so callers control its formatting.
    fn update_asset(&self, id: &Id, balance: &str) -> Result<(), LedgerError>;
}
