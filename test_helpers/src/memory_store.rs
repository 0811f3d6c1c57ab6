use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use shared::block::{Block, BlockHeight};
use shared::checkpoint::{Checkpoint, SyncStatus};
use shared::store::{CommitError, SyncStore, WriteSet};
use shared::transaction::{Transaction, TxMsg};

#[derive(Default)]
struct State {
    checkpoints: HashMap<String, Checkpoint>,
    blocks: BTreeMap<BlockHeight, Block>,
    transactions: BTreeMap<String, Transaction>,
    messages: BTreeMap<(String, i32), TxMsg>,
    fail_next_commit: bool,
}

/// `SyncStore` applying each write set under one lock, all or nothing.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn checkpoint(&self, chain_id: &str) -> Option<Checkpoint> {
        self.state().checkpoints.get(chain_id).cloned()
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.state().blocks.values().cloned().collect()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state().transactions.values().cloned().collect()
    }

    pub fn messages(&self) -> Vec<TxMsg> {
        self.state().messages.values().cloned().collect()
    }

    /// Moves the checkpoint as another writer would.
    pub fn set_height(&self, chain_id: &str, height: BlockHeight) {
        if let Some(checkpoint) = self.state().checkpoints.get_mut(chain_id) {
            checkpoint.current_height = height;
        }
    }

    /// Makes the next commit fail with a storage error.
    pub fn fail_next_commit(&self) {
        self.state().fail_next_commit = true;
    }
}

#[async_trait]
impl SyncStore for MemoryStore {
    async fn get_checkpoint(
        &self,
        chain_id: &str,
    ) -> anyhow::Result<Option<Checkpoint>> {
        Ok(self.checkpoint(chain_id))
    }

    async fn init_checkpoint(
        &self,
        checkpoint: Checkpoint,
    ) -> anyhow::Result<Checkpoint> {
        let mut state = self.state();
        let stored = state
            .checkpoints
            .entry(checkpoint.chain_id.clone())
            .or_insert(checkpoint);
        Ok(stored.clone())
    }

    async fn update_status(
        &self,
        chain_id: &str,
        status: SyncStatus,
        timestamp: i64,
    ) -> anyhow::Result<()> {
        let mut state = self.state();
        let checkpoint = state
            .checkpoints
            .get_mut(chain_id)
            .ok_or_else(|| anyhow!("No checkpoint for {chain_id}"))?;
        checkpoint.status = status;
        checkpoint.last_update_time = timestamp;
        Ok(())
    }

    async fn commit(&self, write_set: WriteSet) -> Result<(), CommitError> {
        write_set.ensure_valid()?;

        let mut state = self.state();
        if std::mem::take(&mut state.fail_next_commit) {
            return Err(CommitError::Storage(anyhow!("Injected failure")));
        }

        let chain_id = write_set.checkpoint.chain_id.clone();
        let stored_height = state
            .checkpoints
            .get(&chain_id)
            .map(|checkpoint| checkpoint.current_height);
        if stored_height != Some(write_set.expected_height) {
            return Err(CommitError::Conflict {
                chain_id,
                expected: write_set.expected_height,
            });
        }

        if state.blocks.contains_key(&write_set.block.height) {
            return Err(CommitError::Duplicate(format!(
                "block {}",
                write_set.block.height
            )));
        }
        if let Some(tx) = write_set
            .transactions
            .iter()
            .find(|tx| state.transactions.contains_key(&tx.hash))
        {
            return Err(CommitError::Duplicate(format!("transaction {}", tx.hash)));
        }

        state.blocks.insert(write_set.block.height, write_set.block);
        for tx in write_set.transactions {
            state.transactions.insert(tx.hash.clone(), tx);
        }
        for msg in write_set.messages {
            state
                .messages
                .insert((msg.tx_hash.clone(), msg.msg_index), msg);
        }
        state.checkpoints.insert(chain_id, write_set.checkpoint);

        Ok(())
    }
}
