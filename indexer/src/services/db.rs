use std::convert::identity;

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use shared::checkpoint::{Checkpoint, SyncStatus};
use shared::error::ContextDbInteractError;
use shared::store::{CommitError, SyncStore, WriteSet};

use crate::app_state::AppState;
use crate::repository::{
    block as block_repo, checkpoint as checkpoint_repo,
    transactions as transaction_repo,
};

/// `SyncStore` backed by Postgres. A write set is one database transaction.
#[derive(Clone)]
pub struct PgStore {
    app_state: AppState,
}

impl PgStore {
    pub fn new(app_state: AppState) -> Self {
        Self { app_state }
    }
}

fn classify_commit_error(reason: anyhow::Error) -> CommitError {
    let reason = match reason.downcast::<CommitError>() {
        Ok(commit_error) => return commit_error,
        Err(reason) => reason,
    };

    match reason.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            info,
        )) => CommitError::Duplicate(info.message().to_owned()),
        _ => CommitError::Storage(reason),
    }
}

#[async_trait]
impl SyncStore for PgStore {
    async fn get_checkpoint(
        &self,
        chain_id: &str,
    ) -> anyhow::Result<Option<Checkpoint>> {
        let conn = self.app_state.get_db_connection().await?;
        let chain_id = chain_id.to_owned();

        conn.interact(move |conn| {
            checkpoint_repo::get_checkpoint(conn, &chain_id)
        })
        .await
        .context_db_interact_error()
        .and_then(identity)
    }

    async fn init_checkpoint(
        &self,
        checkpoint: Checkpoint,
    ) -> anyhow::Result<Checkpoint> {
        let conn = self.app_state.get_db_connection().await?;
        let chain_id = checkpoint.chain_id.clone();

        conn.interact(move |conn| {
            conn.build_transaction().read_write().run(|transaction_conn| {
                checkpoint_repo::insert_checkpoint_if_absent(
                    transaction_conn,
                    checkpoint,
                )?;
                checkpoint_repo::get_checkpoint(transaction_conn, &chain_id)?
                    .ok_or_else(|| {
                        anyhow::anyhow!("Checkpoint for {chain_id} vanished")
                    })
            })
        })
        .await
        .context_db_interact_error()
        .and_then(identity)
    }

    async fn update_status(
        &self,
        chain_id: &str,
        status: SyncStatus,
        timestamp: i64,
    ) -> anyhow::Result<()> {
        let conn = self.app_state.get_db_connection().await?;
        let chain_id = chain_id.to_owned();

        conn.interact(move |conn| {
            checkpoint_repo::update_status(conn, &chain_id, status, timestamp)
        })
        .await
        .context_db_interact_error()
        .and_then(identity)
    }

    async fn commit(&self, write_set: WriteSet) -> Result<(), CommitError> {
        write_set.ensure_valid()?;
        let conn = self.app_state.get_db_connection().await?;

        conn.interact(move |conn| {
            conn.build_transaction().read_write().run(|transaction_conn| {
                block_repo::insert_block(transaction_conn, &write_set.block)?;
                transaction_repo::insert_transactions(
                    transaction_conn,
                    &write_set.transactions,
                )?;
                transaction_repo::insert_tx_msgs(
                    transaction_conn,
                    &write_set.messages,
                )?;
                checkpoint_repo::advance_checkpoint(
                    transaction_conn,
                    &write_set.checkpoint,
                    write_set.expected_height,
                )?;

                anyhow::Ok(())
            })
        })
        .await
        .context_db_interact_error()
        .and_then(identity)
        .map_err(classify_commit_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use diesel::{QueryDsl, RunQueryDsl};
    use orm::schema::transactions;
    use shared::block::{Block, NormalizedBlock};
    use shared::proto::bank::MsgSend;
    use shared::registry::MessageRegistry;
    use test_helpers::db::TestDb;
    use test_helpers::mock_rpc::MockRpc;
    use test_helpers::tx_builder::TxBuilder;

    use super::*;
    use crate::sync::Syncer;

    const CHAIN_ID: &str = "irishub-test";

    async fn store(db: &TestDb) -> PgStore {
        PgStore::new(AppState::from_pool(db.migrated_pool().await))
    }

    fn block(height: i64) -> NormalizedBlock {
        NormalizedBlock {
            block: Block {
                height,
                create_time: 1_600_000_000,
            },
            ..NormalizedBlock::default()
        }
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL_TEST"]
    async fn onboarding_never_overwrites() {
        let db = TestDb::new();
        let store = store(&db).await;

        let first = store
            .init_checkpoint(Checkpoint::onboard(CHAIN_ID, 100, 0))
            .await
            .unwrap();
        let second = store
            .init_checkpoint(Checkpoint::onboard(CHAIN_ID, 5, 0))
            .await
            .unwrap();

        assert_eq!(first.current_height, 99);
        assert_eq!(second, first);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL_TEST"]
    async fn commit_advances_checkpoint() {
        let db = TestDb::new();
        let store = store(&db).await;
        let prior = store
            .init_checkpoint(Checkpoint::onboard(CHAIN_ID, 1, 0))
            .await
            .unwrap();

        store
            .commit(WriteSet::new(block(1), &prior, 10))
            .await
            .unwrap();

        let stored = store.get_checkpoint(CHAIN_ID).await.unwrap().unwrap();
        assert_eq!(stored.current_height, 1);
        assert_eq!(stored.last_update_time, 10);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL_TEST"]
    async fn stale_commit_is_rolled_back() {
        let db = TestDb::new();
        let store = store(&db).await;
        let prior = store
            .init_checkpoint(Checkpoint::onboard(CHAIN_ID, 1, 0))
            .await
            .unwrap();

        store
            .commit(WriteSet::new(block(1), &prior, 10))
            .await
            .unwrap();

        let replay = store.commit(WriteSet::new(block(1), &prior, 11)).await;
        assert!(matches!(
            replay,
            Err(CommitError::Duplicate(_) | CommitError::Conflict { .. })
        ));

        let stored = store.get_checkpoint(CHAIN_ID).await.unwrap().unwrap();
        assert_eq!(stored.current_height, 1);
        assert_eq!(stored.last_update_time, 10);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL_TEST"]
    async fn nul_characters_do_not_block_commit() {
        let db = TestDb::new();
        let pool = db.migrated_pool().await;
        let tx = TxBuilder::new()
            .message(&MsgSend {
                from_address: "iaa1from".to_owned(),
                to_address: "iaa1\0to".to_owned(),
                amount: vec![],
            })
            .memo("hello\u{0}world")
            .build();
        let syncer = Syncer::new(
            CHAIN_ID,
            Arc::new(MockRpc::new().with_block(1, vec![tx])),
            Arc::new(PgStore::new(AppState::from_pool(pool.clone()))),
            Arc::new(MessageRegistry::default()),
        );
        syncer.onboard(1).await.unwrap();

        assert_eq!(syncer.sync_next_height().await, Ok(1));

        let conn = pool.get().await.unwrap();
        let (memo, to_address): (String, String) = conn
            .interact(|conn| {
                transactions::table
                    .select((transactions::memo, transactions::to_address))
                    .first(conn)
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(memo, "helloworld");
        assert_eq!(to_address, "iaa1to");
    }
}
