use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;
use shared::transaction::TxMsg;

use crate::schema::tx_msgs;
use crate::transactions::TxStatusDb;
use crate::utils::{naive_timestamp, pg_json, pg_text, pg_text_array};

#[derive(Serialize, Queryable, Selectable, Insertable, Clone, Debug)]
#[diesel(table_name = tx_msgs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TxMsgInsertDb {
    pub tx_hash: String,
    pub msg_index: i32,
    pub tx_index: i32,
    pub height: i64,
    pub time: chrono::NaiveDateTime,
    pub msg_type: String,
    pub tx_status: TxStatusDb,
    pub tx_memo: String,
    pub tx_log: String,
    pub tx_fee: serde_json::Value,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub events: serde_json::Value,
    pub msg: serde_json::Value,
    pub addresses: Vec<String>,
    pub signers: Vec<String>,
}

pub type TxMsgDb = TxMsgInsertDb;

impl TryFrom<&TxMsg> for TxMsgInsertDb {
    type Error = anyhow::Error;

    fn try_from(msg: &TxMsg) -> Result<Self, Self::Error> {
        Ok(Self {
            tx_hash: pg_text(&msg.tx_hash),
            msg_index: msg.msg_index,
            tx_index: msg.tx_index,
            height: msg.height,
            time: naive_timestamp(msg.time)?,
            msg_type: pg_text(&msg.msg_type),
            tx_status: TxStatusDb::from(msg.tx_status),
            tx_memo: pg_text(&msg.tx_memo),
            tx_log: pg_text(&msg.tx_log),
            tx_fee: pg_json(&msg.tx_fee)?,
            gas_used: msg.gas_used,
            gas_wanted: msg.gas_wanted,
            events: pg_json(&msg.events)?,
            msg: pg_json(&msg.msg)?,
            addresses: pg_text_array(&msg.addresses),
            signers: pg_text_array(&msg.signers),
        })
    }
}
