use anyhow::Context;
use diesel::{
    ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl,
    SelectableHelper,
};
use orm::checkpoint::{CheckpointDb, SyncStatusDb};
use orm::schema::sync_checkpoints;
use shared::block::BlockHeight;
use shared::checkpoint::{Checkpoint, SyncStatus};
use shared::store::CommitError;

pub fn get_checkpoint(
    conn: &mut PgConnection,
    chain_id: &str,
) -> anyhow::Result<Option<Checkpoint>> {
    let checkpoint = sync_checkpoints::table
        .filter(sync_checkpoints::chain_id.eq(chain_id))
        .select(CheckpointDb::as_select())
        .first(conn)
        .optional()
        .context("Failed to read checkpoint from the db")?;

    Ok(checkpoint.map(Checkpoint::from))
}

/// Inserts the checkpoint unless the chain already has one.
pub fn insert_checkpoint_if_absent(
    conn: &mut PgConnection,
    checkpoint: Checkpoint,
) -> anyhow::Result<()> {
    diesel::insert_into(sync_checkpoints::table)
        .values::<CheckpointDb>(CheckpointDb::from(checkpoint))
        .on_conflict(sync_checkpoints::chain_id)
        .do_nothing()
        .execute(conn)
        .context("Failed to insert checkpoint in db")?;

    anyhow::Ok(())
}

/// Conditional update: applies only while the stored height is still
/// `expected_height`.
pub fn advance_checkpoint(
    transaction_conn: &mut PgConnection,
    checkpoint: &Checkpoint,
    expected_height: BlockHeight,
) -> anyhow::Result<()> {
    let updated = diesel::update(
        sync_checkpoints::table
            .filter(sync_checkpoints::chain_id.eq(&checkpoint.chain_id))
            .filter(sync_checkpoints::current_height.eq(expected_height)),
    )
    .set(CheckpointDb::from(checkpoint.clone()))
    .execute(transaction_conn)
    .context("Failed to advance checkpoint in db")?;

    if updated == 0 {
        return Err(CommitError::Conflict {
            chain_id: checkpoint.chain_id.clone(),
            expected: expected_height,
        }
        .into());
    }

    anyhow::Ok(())
}

pub fn update_status(
    conn: &mut PgConnection,
    chain_id: &str,
    status: SyncStatus,
    timestamp: i64,
) -> anyhow::Result<()> {
    diesel::update(
        sync_checkpoints::table.filter(sync_checkpoints::chain_id.eq(chain_id)),
    )
    .set((
        sync_checkpoints::status.eq(SyncStatusDb::from(status)),
        sync_checkpoints::last_update_time.eq(timestamp),
    ))
    .execute(conn)
    .context("Failed to update checkpoint status in db")?;

    anyhow::Ok(())
}
