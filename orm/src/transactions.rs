use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use shared::transaction::Transaction;
use shared::tx_result::TxStatus;

use crate::schema::transactions;
use crate::utils::{naive_timestamp, pg_json, pg_text, pg_text_array};

#[derive(Debug, Clone, Serialize, Deserialize, diesel_derive_enum::DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::TxStatus"]
pub enum TxStatusDb {
    Success,
    Fail,
    Unknown,
}

impl From<TxStatus> for TxStatusDb {
    fn from(value: TxStatus) -> Self {
        match value {
            TxStatus::Success => Self::Success,
            TxStatus::Fail => Self::Fail,
            TxStatus::Unknown => Self::Unknown,
        }
    }
}

#[derive(Serialize, Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionInsertDb {
    pub hash: String,
    pub height: i64,
    pub time: chrono::NaiveDateTime,
    pub tx_type: String,
    pub fee: serde_json::Value,
    pub memo: String,
    pub status: TxStatusDb,
    pub code: i64,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub log: String,
    pub events: serde_json::Value,
    pub messages: serde_json::Value,
    pub initiator: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: serde_json::Value,
    pub correlation_hash: Option<String>,
    pub participant_addresses: Vec<String>,
    pub signers: Vec<String>,
}

pub type TransactionDb = TransactionInsertDb;

impl TryFrom<&Transaction> for TransactionInsertDb {
    type Error = anyhow::Error;

    fn try_from(tx: &Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            hash: pg_text(&tx.hash),
            height: tx.height,
            time: naive_timestamp(tx.time)?,
            tx_type: pg_text(&tx.tx_type),
            fee: pg_json(&tx.fee)?,
            memo: pg_text(&tx.memo),
            status: TxStatusDb::from(tx.status),
            code: i64::from(tx.code),
            gas_used: tx.gas_used,
            gas_wanted: tx.gas_wanted,
            log: pg_text(&tx.log),
            events: pg_json(&tx.events)?,
            messages: pg_json(&tx.messages)?,
            initiator: pg_text(&tx.initiator),
            from_address: pg_text(&tx.from),
            to_address: pg_text(&tx.to),
            amount: pg_json(&tx.amount)?,
            correlation_hash: tx.correlation_hash.as_deref().map(pg_text),
            participant_addresses: pg_text_array(&tx.participant_addresses),
            signers: pg_text_array(&tx.signers),
        })
    }
}
