use chrono::NaiveDate;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::requests::{
    Endpoint, ListAssets, ListTags, ListTransactions, Request, UpdateAsset, UpdateTransaction,
};
use super::{Asset, AssetList, Id, Ledger, LedgerError, Tag, Transaction, TransactionList, TransactionUpdate};
use crate::config::LedgerConfig;

/// Blocking client for the ledger service's REST API.
pub struct HttpLedger {
    agent: ureq::Agent,
    config: LedgerConfig,
}

impl HttpLedger {
    pub fn new(config: LedgerConfig) -> HttpLedger {
        HttpLedger {
            agent: ureq::Agent::new(),
            config,
        }
    }

    fn send(&self, request: Request) -> Result<Value, LedgerError> {
        let url = self.config.url(&request.path());
        debug!("{} {}", request.method(), url);

        let mut call = self
            .agent
            .request(request.method(), &url)
            .set("Authorization", &self.config.authorization());
        for (key, value) in request.query() {
            call = call.query(key, &value);
        }

        let result = match request.body() {
            Some(body) => call.send_json(body),
            None => call.call(),
        };
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(LedgerError::Remote { status, body });
            },
            Err(ureq::Error::Transport(err)) => return Err(LedgerError::Transport(err.to_string())),
        };

        let text = response
            .into_string()
            .map_err(|err| LedgerError::Transport(err.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value = serde_json::from_str(&text)?;
        // Some validation failures come back as a 200 carrying an `error` field.
        if let Some(error) = value.get("error") {
            return Err(LedgerError::Rejected { body: error.to_string() });
        }

        Ok(value)
    }

    fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T, LedgerError> {
        Ok(serde_json::from_value(self.send(request)?)?)
    }
}

impl Ledger for HttpLedger {
    fn list_tags(&self) -> Result<Vec<Tag>, LedgerError> {
        self.fetch(ListTags.into())
    }

    fn list_transactions(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        tag_id: &Id,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let list: TransactionList = self.fetch(
            ListTransactions {
                start_date,
                end_date,
                tag_id: tag_id.clone(),
            }
            .into(),
        )?;
        Ok(list.transactions)
    }

    fn update_transaction(&self, id: &Id, update: &TransactionUpdate) -> Result<(), LedgerError> {
        info!("updating transaction {} to {} on {}", id, update.amount, update.date);
        self.send(
            UpdateTransaction {
                id: id.clone(),
                update: update.clone(),
            }
            .into(),
        )?;
        Ok(())
    }

    fn list_assets(&self) -> Result<Vec<Asset>, LedgerError> {
        let list: AssetList = self.fetch(ListAssets.into())?;
        Ok(list.assets)
    }

    fn update_asset(&self, id: &Id, balance: &str) -> Result<(), LedgerError> {
        info!("updating asset {} to balance {}", id, balance);
        self.send(
            UpdateAsset {
                id: id.clone(),
                balance: balance.to_string(),
            }
            .into(),
        )?;
        Ok(())
    }
}
