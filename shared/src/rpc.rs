use async_trait::async_trait;

use crate::block::{BlockHeight, RawBlock};
use crate::tx_result::TxResult;

/// Blockchain node as seen by the indexer.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Height of the latest block the node has.
    async fn latest_height(&self) -> anyhow::Result<BlockHeight>;

    /// Fetches a block through a pooled connection.
    async fn fetch_block(&self, height: BlockHeight) -> anyhow::Result<RawBlock>;

    /// Fetches a block through a connection opened for this request only.
    async fn fetch_block_fresh(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock>;

    /// Execution result of a committed transaction, keyed by its hash.
    async fn query_tx_result(&self, tx_hash: &str) -> anyhow::Result<TxResult>;
}
