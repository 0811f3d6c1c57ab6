use anyhow::Context;
use diesel::{PgConnection, RunQueryDsl};
use orm::blocks::BlockInsertDb;
use orm::schema::blocks;
use shared::block::Block;

pub fn insert_block(
    transaction_conn: &mut PgConnection,
    block: &Block,
) -> anyhow::Result<()> {
    diesel::insert_into(blocks::table)
        .values::<BlockInsertDb>(BlockInsertDb::try_from(block)?)
        .execute(transaction_conn)
        .context("Failed to insert block in db")?;

    anyhow::Ok(())
}
