use async_trait::async_trait;
use thiserror::Error;

use crate::block::{Block, BlockHeight, NormalizedBlock};
use crate::checkpoint::{Checkpoint, SyncStatus};
use crate::transaction::{Transaction, TxMsg};

/// Everything one height writes, applied all together or not at all.
#[derive(Debug, Clone)]
pub struct WriteSet {
    pub block: Block,
    pub transactions: Vec<Transaction>,
    pub messages: Vec<TxMsg>,
    /// Checkpoint as it must look after the commit.
    pub checkpoint: Checkpoint,
    /// Height the stored checkpoint must still show for the commit to apply.
    pub expected_height: BlockHeight,
}

impl WriteSet {
    pub fn new(
        block: NormalizedBlock,
        prior: &Checkpoint,
        timestamp: i64,
    ) -> Self {
        Self {
            checkpoint: prior.advance_to(block.block.height, timestamp),
            expected_height: prior.current_height,
            block: block.block,
            transactions: block.transactions,
            messages: block.messages,
        }
    }

    /// Rejects empty shells and sets that would not move the checkpoint by
    /// exactly one height.
    pub fn ensure_valid(&self) -> Result<(), CommitError> {
        let height = self.block.height;
        if height <= 0
            || self.checkpoint.current_height != height
            || self.expected_height + 1 != height
        {
            return Err(CommitError::InvalidBlock);
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum CommitError {
    #[error("refusing to commit an empty block")]
    InvalidBlock,
    #[error("checkpoint of {chain_id} no longer at height {expected}")]
    Conflict {
        chain_id: String,
        expected: BlockHeight,
    },
    #[error("record already exists: {0}")]
    Duplicate(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait]
pub trait SyncStore: Send + Sync {
    async fn get_checkpoint(
        &self,
        chain_id: &str,
    ) -> anyhow::Result<Option<Checkpoint>>;

    /// Inserts `checkpoint` unless the chain already has one. Returns the
    /// stored record.
    async fn init_checkpoint(
        &self,
        checkpoint: Checkpoint,
    ) -> anyhow::Result<Checkpoint>;

    /// Best-effort status change; the height is left untouched.
    async fn update_status(
        &self,
        chain_id: &str,
        status: SyncStatus,
        timestamp: i64,
    ) -> anyhow::Result<()>;

    async fn commit(&self, write_set: WriteSet) -> Result<(), CommitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(height: BlockHeight) -> NormalizedBlock {
        NormalizedBlock {
            block: Block {
                height,
                create_time: 1_600_000_000,
            },
            ..NormalizedBlock::default()
        }
    }

    #[test]
    fn write_set_advances_by_one() {
        let prior = Checkpoint::onboard("irishub-1", 10, 0);
        let write_set = WriteSet::new(normalized(10), &prior, 5);

        assert_eq!(write_set.expected_height, 9);
        assert_eq!(write_set.checkpoint.current_height, 10);
        assert_eq!(write_set.checkpoint.last_update_time, 5);
        assert!(write_set.ensure_valid().is_ok());
    }

    #[test]
    fn empty_shell_is_invalid() {
        let prior = Checkpoint::onboard("irishub-1", 10, 0);
        let write_set = WriteSet::new(NormalizedBlock::empty(), &prior, 5);

        assert!(matches!(
            write_set.ensure_valid(),
            Err(CommitError::InvalidBlock)
        ));
    }

    #[test]
    fn skipping_a_height_is_invalid() {
        let prior = Checkpoint::onboard("irishub-1", 10, 0);
        let write_set = WriteSet::new(normalized(12), &prior, 5);

        assert!(matches!(
            write_set.ensure_valid(),
            Err(CommitError::InvalidBlock)
        ));
    }
}
