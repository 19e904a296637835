use chrono::NaiveDate;
use enum_dispatch::enum_dispatch;
use serde_json::{json, Value};

use super::{Id, TransactionUpdate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Describes one call against the ledger service's REST API.
#[enum_dispatch]
pub trait Endpoint {
    fn method(&self) -> &'static str;

    /// Path relative to the configured base url.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<Value> {
        None
    }
}

#[enum_dispatch(Endpoint)]
#[derive(Debug)]
pub enum Request {
    ListTags,
    ListTransactions,
    UpdateTransaction,
    ListAssets,
    UpdateAsset,
}

#[derive(Debug)]
pub struct ListTags;

impl Endpoint for ListTags {
    fn method(&self) -> &'static str {
        "GET"
    }

    fn path(&self) -> String {
        "tags".to_string()
    }
}

#[derive(Debug)]
pub struct ListTransactions {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tag_id: Id,
}

impl Endpoint for ListTransactions {
    fn method(&self) -> &'static str {
        "GET"
    }

    fn path(&self) -> String {
        "transactions".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", self.end_date.format(DATE_FORMAT).to_string()),
            ("tag_id", self.tag_id.to_string()),
        ]
    }
}

#[derive(Debug)]
pub struct UpdateTransaction {
    pub id: Id,
    pub update: TransactionUpdate,
}

impl Endpoint for UpdateTransaction {
    fn method(&self) -> &'static str {
        "PUT"
    }

    fn path(&self) -> String {
        format!("transactions/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({
            "transaction": {
                "date": self.update.date.format(DATE_FORMAT).to_string(),
                "amount": self.update.amount.to_string(),
            }
        }))
    }
}

#[derive(Debug)]
pub struct ListAssets;

impl Endpoint for ListAssets {
    fn method(&self) -> &'static str {
        "GET"
    }

    fn path(&self) -> String {
        "assets".to_string()
    }
}

#[derive(Debug)]
pub struct UpdateAsset {
    pub id: Id,
    pub balance: String,
}

impl Endpoint for UpdateAsset {
    fn method(&self) -> &'static str {
        "PUT"
    }

    fn path(&self) -> String {
        format!("assets/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "balance": self.balance }))
    }
}
