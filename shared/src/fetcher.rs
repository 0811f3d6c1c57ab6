use crate::block::{BlockHeight, RawBlock};
use crate::error::FetchError;
use crate::rpc::ChainRpc;

/// Fetches `height`, retrying once on an independently acquired connection.
pub async fn fetch_block(
    rpc: &dyn ChainRpc,
    height: BlockHeight,
) -> Result<RawBlock, FetchError> {
    match rpc.fetch_block(height).await {
        Ok(block) => Ok(block),
        Err(reason) => {
            tracing::warn!(
                height,
                ?reason,
                "Block fetch failed, retrying on a fresh connection"
            );
            rpc.fetch_block_fresh(height)
                .await
                .map_err(|reason| FetchError { height, reason })
        }
    }
}
