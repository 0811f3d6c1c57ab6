use anyhow::Context;
use diesel::{PgConnection, RunQueryDsl};
use orm::schema::{transactions, tx_msgs};
use orm::transactions::TransactionInsertDb;
use orm::tx_msgs::TxMsgInsertDb;
use shared::transaction::{Transaction, TxMsg};

/// Keeps each statement below the Postgres bind parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

pub fn insert_transactions(
    transaction_conn: &mut PgConnection,
    txs: &[Transaction],
) -> anyhow::Result<()> {
    let rows = txs
        .iter()
        .map(TransactionInsertDb::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;

    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        diesel::insert_into(transactions::table)
            .values::<&[TransactionInsertDb]>(chunk)
            .execute(transaction_conn)
            .context("Failed to insert transactions in db")?;
    }

    anyhow::Ok(())
}

pub fn insert_tx_msgs(
    transaction_conn: &mut PgConnection,
    msgs: &[TxMsg],
) -> anyhow::Result<()> {
    let rows = msgs
        .iter()
        .map(TxMsgInsertDb::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?;

    for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
        diesel::insert_into(tx_msgs::table)
            .values::<&[TxMsgInsertDb]>(chunk)
            .execute(transaction_conn)
            .context("Failed to insert transaction messages in db")?;
    }

    anyhow::Ok(())
}
