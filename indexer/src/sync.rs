use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use shared::block::{Block, BlockHeight, NormalizedBlock, RawBlock};
use shared::checkpoint::{Checkpoint, SyncStatus};
use shared::error::{AsDbError, AsRpcError, MainError};
use shared::fetcher;
use shared::registry::MessageRegistry;
use shared::rpc::ChainRpc;
use shared::store::{CommitError, SyncStore, WriteSet};
use shared::transaction::{tx_hash, Transaction, TxEnvelope};
use shared::tx_result::TxResult;

/// Stages one height goes through. `Committed` and `Aborted` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Fetching,
    Decoding,
    Building,
    Committing,
    Committed,
    Aborted,
}

fn now() -> i64 {
    Utc::now().timestamp()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned())
}

/// Ingests one chain, height after height.
pub struct Syncer {
    chain_id: String,
    rpc: Arc<dyn ChainRpc>,
    store: Arc<dyn SyncStore>,
    registry: Arc<MessageRegistry>,
}

impl Syncer {
    pub fn new(
        chain_id: impl Into<String>,
        rpc: Arc<dyn ChainRpc>,
        store: Arc<dyn SyncStore>,
        registry: Arc<MessageRegistry>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            rpc,
            store,
            registry,
        }
    }

    /// Creates the chain's checkpoint on first start. An existing one is
    /// returned untouched.
    pub async fn onboard(
        &self,
        from_block_height: BlockHeight,
    ) -> Result<Checkpoint, MainError> {
        let checkpoint =
            Checkpoint::onboard(&self.chain_id, from_block_height, now());
        let stored = self
            .store
            .init_checkpoint(checkpoint)
            .await
            .into_db_error()?;

        tracing::info!(
            chain_id = %self.chain_id,
            height = stored.current_height,
            status = %stored.status,
            "Resuming from checkpoint"
        );

        Ok(stored)
    }

    /// Runs one full cycle for the height after the checkpoint. Returns the
    /// committed height.
    pub async fn sync_next_height(&self) -> Result<BlockHeight, MainError> {
        let checkpoint = self
            .store
            .get_checkpoint(&self.chain_id)
            .await
            .into_db_error()?
            .ok_or_else(|| {
                tracing::error!(chain_id = %self.chain_id, "Chain has no checkpoint");
                MainError::Database
            })?;
        let height = checkpoint.next_height();

        let tip = self.rpc.latest_height().await.into_rpc_error()?;
        if height > tip {
            tracing::trace!(height, tip, "Block does not exist yet, waiting...");
            return Err(MainError::NoAction);
        }

        let block = match AssertUnwindSafe(self.prepare_block(height))
            .catch_unwind()
            .await
        {
            Ok(Ok(block)) => block,
            Ok(Err(error)) => {
                self.enter(height, CycleState::Aborted);
                return Err(error);
            }
            Err(panic) => {
                tracing::error!(
                    height,
                    chain_id = %self.chain_id,
                    cause = %panic_message(panic.as_ref()),
                    "Unexpected fault while preparing block"
                );
                NormalizedBlock::empty()
            }
        };

        if block.is_empty() {
            self.enter(height, CycleState::Aborted);
            self.mark_status(SyncStatus::Error).await;
            return Err(MainError::Aborted);
        }

        self.commit(height, block, &checkpoint).await
    }

    /// Records a graceful stop.
    pub async fn shutdown(&self) {
        self.mark_status(SyncStatus::Stopped).await;
        tracing::info!(chain_id = %self.chain_id, "Sync stopped");
    }

    fn enter(&self, height: BlockHeight, state: CycleState) {
        tracing::debug!(height, chain_id = %self.chain_id, ?state, "Cycle state");
    }

    async fn mark_status(&self, status: SyncStatus) {
        if let Err(reason) = self
            .store
            .update_status(&self.chain_id, status, now())
            .await
        {
            tracing::warn!(
                chain_id = %self.chain_id,
                %status,
                ?reason,
                "Failed to record sync status"
            );
        }
    }

    async fn prepare_block(
        &self,
        height: BlockHeight,
    ) -> Result<NormalizedBlock, MainError> {
        self.enter(height, CycleState::Fetching);
        let raw = fetcher::fetch_block(self.rpc.as_ref(), height)
            .await
            .map_err(|error| {
                tracing::error!(
                    chain_id = %self.chain_id,
                    %error,
                    "Aborting height"
                );
                MainError::RpcError
            })?;
        if raw.height != height {
            tracing::error!(
                height,
                returned = raw.height,
                "Node returned a different height"
            );
            return Err(MainError::RpcError);
        }
        tracing::debug!(height, txs = raw.txs.len(), "Fetched block");

        self.enter(height, CycleState::Decoding);
        let envelopes = self.decode_transactions(&raw);
        let mut decoded = Vec::with_capacity(envelopes.len());
        for (tx_index, envelope) in envelopes {
            let result = self.query_result(height, &envelope.hash).await;
            decoded.push((tx_index, envelope, result));
        }

        self.enter(height, CycleState::Building);
        Ok(self.build_block(&raw, decoded))
    }

    fn decode_transactions(
        &self,
        raw: &RawBlock,
    ) -> Vec<(usize, TxEnvelope)> {
        raw.txs
            .iter()
            .enumerate()
            .filter_map(|(index, bytes)| {
                match panic::catch_unwind(|| TxEnvelope::decode(bytes)) {
                    Ok(Ok(envelope)) => Some((index, envelope)),
                    Ok(Err(reason)) => {
                        tracing::error!(
                            height = raw.height,
                            tx_index = index,
                            tx_hash = %tx_hash(bytes),
                            %reason,
                            "Skipping undecodable transaction"
                        );
                        None
                    }
                    Err(panic) => {
                        tracing::error!(
                            height = raw.height,
                            tx_index = index,
                            tx_hash = %tx_hash(bytes),
                            cause = %panic_message(panic.as_ref()),
                            "Transaction decoder panicked"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    async fn query_result(&self, height: BlockHeight, hash: &str) -> TxResult {
        match self.rpc.query_tx_result(hash).await {
            Ok(result) => result,
            Err(reason) => {
                tracing::warn!(
                    height,
                    tx_hash = hash,
                    ?reason,
                    "Transaction result unavailable, using defaults"
                );
                TxResult::degraded()
            }
        }
    }

    fn build_block(
        &self,
        raw: &RawBlock,
        decoded: Vec<(usize, TxEnvelope, TxResult)>,
    ) -> NormalizedBlock {
        let mut transactions = Vec::with_capacity(decoded.len());
        let mut messages = Vec::new();

        for (tx_index, envelope, result) in decoded {
            let hash = envelope.hash.clone();
            let built = panic::catch_unwind(AssertUnwindSafe(|| {
                Transaction::build(
                    raw,
                    tx_index,
                    envelope,
                    result,
                    &self.registry,
                )
            }));

            match built {
                Ok((transaction, tx_msgs)) => {
                    transactions.push(transaction);
                    messages.extend(tx_msgs);
                }
                Err(panic) => {
                    tracing::error!(
                        height = raw.height,
                        tx_hash = %hash,
                        cause = %panic_message(panic.as_ref()),
                        "Skipping transaction"
                    );
                }
            }
        }

        NormalizedBlock {
            block: Block {
                height: raw.height,
                create_time: now(),
            },
            transactions,
            messages,
        }
    }

    async fn commit(
        &self,
        height: BlockHeight,
        block: NormalizedBlock,
        checkpoint: &Checkpoint,
    ) -> Result<BlockHeight, MainError> {
        self.enter(height, CycleState::Committing);
        let txs = block.transactions.len();
        let msgs = block.messages.len();

        match self
            .store
            .commit(WriteSet::new(block, checkpoint, now()))
            .await
        {
            Ok(()) => {
                self.enter(height, CycleState::Committed);
                tracing::info!(
                    height,
                    chain_id = %self.chain_id,
                    txs,
                    msgs,
                    "Committed block"
                );
                Ok(height)
            }
            Err(error) => {
                self.enter(height, CycleState::Aborted);
                Err(self.commit_failure(height, error))
            }
        }
    }

    fn commit_failure(&self, height: BlockHeight, error: CommitError) -> MainError {
        match error {
            CommitError::InvalidBlock => {
                tracing::error!(height, "Refused to commit invalid block");
                MainError::Aborted
            }
            CommitError::Conflict { .. } | CommitError::Duplicate(_) => {
                tracing::error!(
                    height,
                    chain_id = %self.chain_id,
                    %error,
                    "Height already applied by another writer"
                );
                MainError::CommitConflict
            }
            CommitError::Storage(reason) => {
                tracing::error!(height, ?reason, "Database error");
                MainError::Database
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use async_trait::async_trait;
    use shared::proto::bank::MsgSend;
    use shared::proto::base::Coin;
    use shared::proto::Any as ProtoAny;
    use shared::tx_result::TxStatus;
    use test_helpers::memory_store::MemoryStore;
    use test_helpers::mock_rpc::MockRpc;
    use test_helpers::tx_builder::{malformed_tx, TxBuilder};

    use super::*;

    const CHAIN_ID: &str = "irishub-1";

    fn send_tx(memo: &str) -> Vec<u8> {
        TxBuilder::new()
            .message(&MsgSend {
                from_address: "iaa1from".to_owned(),
                to_address: "iaa1to".to_owned(),
                amount: vec![Coin {
                    denom: "uiris".to_owned(),
                    amount: "10".to_owned(),
                }],
            })
            .memo(memo)
            .fee("uiris", "2000", 200_000)
            .build()
    }

    fn success() -> TxResult {
        TxResult {
            status: TxStatus::Success,
            gas_used: 60_000,
            gas_wanted: 200_000,
            ..TxResult::default()
        }
    }

    async fn syncer(
        rpc: Arc<dyn ChainRpc>,
        store: Arc<dyn SyncStore>,
    ) -> Syncer {
        let syncer = Syncer::new(
            CHAIN_ID,
            rpc,
            store,
            Arc::new(MessageRegistry::default()),
        );
        syncer.onboard(1).await.unwrap();
        syncer
    }

    #[tokio::test]
    async fn onboarding_keeps_existing_checkpoint() {
        let store = Arc::new(MemoryStore::new());
        let syncer = Syncer::new(
            CHAIN_ID,
            Arc::new(MockRpc::new()),
            store.clone(),
            Arc::new(MessageRegistry::default()),
        );

        let first = syncer.onboard(100).await.unwrap();
        let second = syncer.onboard(7).await.unwrap();

        assert_eq!(first.current_height, 99);
        assert_eq!(second.current_height, 99);
    }

    #[tokio::test]
    async fn checkpoint_advances_by_exactly_one() {
        let rpc = MockRpc::new()
            .with_block(1, vec![send_tx("one")])
            .with_block(2, vec![])
            .with_block(3, vec![send_tx("three")])
            .with_result(&tx_hash(&send_tx("one")), success())
            .with_result(&tx_hash(&send_tx("three")), success());
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;
        let started = now();

        for expected in 1..=3 {
            assert_eq!(syncer.sync_next_height().await, Ok(expected));
            let checkpoint = store.checkpoint(CHAIN_ID).unwrap();
            assert_eq!(checkpoint.current_height, expected);
            assert_eq!(checkpoint.status, SyncStatus::Running);
        }

        let blocks = store.blocks();
        assert_eq!(blocks.len(), 3);
        // Ingestion time, not the header time.
        assert!(blocks.iter().all(|block| block.create_time >= started));
        let transactions = store.transactions();
        assert_eq!(transactions.len(), 2);
        assert!(transactions
            .iter()
            .all(|tx| tx.time == 1_600_000_000 + tx.height));
        assert_eq!(store.messages().len(), 2);
    }

    #[tokio::test]
    async fn waits_at_chain_tip() {
        let rpc = MockRpc::new().with_block(1, vec![]);
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));
        assert_eq!(syncer.sync_next_height().await, Err(MainError::NoAction));
        assert_eq!(store.checkpoint(CHAIN_ID).unwrap().current_height, 1);
    }

    #[tokio::test]
    async fn malformed_transaction_is_skipped() {
        let first = send_tx("first");
        let third = send_tx("third");
        let rpc = MockRpc::new()
            .with_block(1, vec![first.clone(), malformed_tx(), third.clone()])
            .with_result(&tx_hash(&first), success())
            .with_result(&tx_hash(&third), success());
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));

        let hashes: Vec<String> =
            store.transactions().into_iter().map(|tx| tx.hash).collect();
        assert_eq!(hashes.len(), 2);
        assert!(hashes.contains(&tx_hash(&first)));
        assert!(hashes.contains(&tx_hash(&third)));
        assert_eq!(store.checkpoint(CHAIN_ID).unwrap().current_height, 1);

        let third_msg = store
            .messages()
            .into_iter()
            .find(|msg| msg.tx_hash == tx_hash(&third))
            .unwrap();
        assert_eq!(third_msg.tx_index, 2);
    }

    #[tokio::test]
    async fn unknown_message_contributes_nothing() {
        let tx = TxBuilder::new()
            .raw_message(ProtoAny {
                type_url: "/cosmos.gov.v1beta1.MsgVote".to_owned(),
                value: vec![8, 1],
            })
            .message(&MsgSend {
                from_address: "iaa1from".to_owned(),
                to_address: "iaa1to".to_owned(),
                amount: vec![],
            })
            .build();
        let rpc = MockRpc::new()
            .with_block(1, vec![tx.clone()])
            .with_result(&tx_hash(&tx), success());
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));

        let messages = store.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].msg_index, 1);
        assert_eq!(store.transactions()[0].participant_addresses.len(), 2);
    }

    #[tokio::test]
    async fn missing_result_degrades_transaction() {
        let tx = send_tx("degraded");
        let rpc = Arc::new(MockRpc::new().with_block(1, vec![tx]));
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(rpc.clone(), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));

        let transactions = store.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].status, TxStatus::Unknown);
        assert_eq!(transactions[0].gas_used, 0);
        assert_eq!(rpc.result_queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_retries_once_on_fresh_connection() {
        let rpc = Arc::new(MockRpc::new().with_block(1, vec![]).fail_pooled(1, 1));
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(rpc.clone(), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));
        assert_eq!(rpc.pooled_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(rpc.fresh_fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_failure_aborts_height() {
        let rpc = Arc::new(
            MockRpc::new()
                .with_block(1, vec![])
                .fail_pooled(1, 1)
                .fail_fresh(1, 1),
        );
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(rpc.clone(), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Err(MainError::RpcError));
        assert_eq!(rpc.fresh_fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.checkpoint(CHAIN_ID).unwrap().current_height, 0);
        assert!(store.blocks().is_empty());

        // Same height on the next attempt.
        assert_eq!(syncer.sync_next_height().await, Ok(1));
    }

    #[tokio::test]
    async fn replayed_height_is_rejected() {
        let tx = send_tx("once");
        let rpc = MockRpc::new()
            .with_block(1, vec![tx.clone()])
            .with_result(&tx_hash(&tx), success());
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Ok(1));

        // Restart that lost sight of the advance.
        store.set_height(CHAIN_ID, 0);
        assert_eq!(
            syncer.sync_next_height().await,
            Err(MainError::CommitConflict)
        );
        assert_eq!(store.blocks().len(), 1);
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.messages().len(), 1);
    }

    #[tokio::test]
    async fn failed_commit_leaves_nothing_behind() {
        let tx = send_tx("atomic");
        let rpc = MockRpc::new()
            .with_block(1, vec![tx.clone()])
            .with_result(&tx_hash(&tx), success());
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        store.fail_next_commit();
        assert_eq!(syncer.sync_next_height().await, Err(MainError::Database));
        assert!(store.blocks().is_empty());
        assert!(store.transactions().is_empty());
        assert!(store.messages().is_empty());
        assert_eq!(store.checkpoint(CHAIN_ID).unwrap().current_height, 0);

        assert_eq!(syncer.sync_next_height().await, Ok(1));
    }

    /// Hands out a checkpoint another writer has already moved past.
    struct StaleStore {
        inner: MemoryStore,
        stale: Checkpoint,
    }

    #[async_trait]
    impl SyncStore for StaleStore {
        async fn get_checkpoint(
            &self,
            _chain_id: &str,
        ) -> anyhow::Result<Option<Checkpoint>> {
            Ok(Some(self.stale.clone()))
        }

        async fn init_checkpoint(
            &self,
            checkpoint: Checkpoint,
        ) -> anyhow::Result<Checkpoint> {
            self.inner.init_checkpoint(checkpoint).await
        }

        async fn update_status(
            &self,
            chain_id: &str,
            status: SyncStatus,
            timestamp: i64,
        ) -> anyhow::Result<()> {
            self.inner.update_status(chain_id, status, timestamp).await
        }

        async fn commit(&self, write_set: WriteSet) -> Result<(), CommitError> {
            self.inner.commit(write_set).await
        }
    }

    #[tokio::test]
    async fn conflicting_writer_aborts_commit() {
        let rpc = MockRpc::new().with_block(1, vec![]).with_block(2, vec![]);
        let store = Arc::new(StaleStore {
            inner: MemoryStore::new(),
            stale: Checkpoint::onboard(CHAIN_ID, 2, 0),
        });
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(
            syncer.sync_next_height().await,
            Err(MainError::CommitConflict)
        );
        assert!(store.inner.blocks().is_empty());
        assert_eq!(store.inner.checkpoint(CHAIN_ID).unwrap().current_height, 0);
    }

    #[tokio::test]
    async fn unexpected_fault_aborts_height() {
        let rpc = MockRpc::new().with_block(1, vec![]).panic_at(1);
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(rpc), store.clone()).await;

        assert_eq!(syncer.sync_next_height().await, Err(MainError::Aborted));

        let checkpoint = store.checkpoint(CHAIN_ID).unwrap();
        assert_eq!(checkpoint.current_height, 0);
        assert_eq!(checkpoint.status, SyncStatus::Error);
        assert!(store.blocks().is_empty());
    }

    #[tokio::test]
    async fn shutdown_marks_checkpoint_stopped() {
        let store = Arc::new(MemoryStore::new());
        let syncer = syncer(Arc::new(MockRpc::new()), store.clone()).await;

        syncer.shutdown().await;

        assert_eq!(
            store.checkpoint(CHAIN_ID).unwrap().status,
            SyncStatus::Stopped
        );
    }
}
