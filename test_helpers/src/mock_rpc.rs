use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use async_trait::async_trait;
use shared::block::{BlockHeight, RawBlock};
use shared::rpc::ChainRpc;
use shared::tx_result::TxResult;

#[derive(Default)]
struct Script {
    tip: BlockHeight,
    blocks: HashMap<BlockHeight, RawBlock>,
    results: HashMap<String, TxResult>,
    pooled_failures: HashMap<BlockHeight, usize>,
    fresh_failures: HashMap<BlockHeight, usize>,
    panicking_heights: Vec<BlockHeight>,
}

/// Scripted node. Unknown heights and hashes fail.
#[derive(Default)]
pub struct MockRpc {
    script: Mutex<Script>,
    pub pooled_fetches: AtomicUsize,
    pub fresh_fetches: AtomicUsize,
    pub result_queries: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds a block at `height` and raises the tip to it.
    pub fn with_block(self, height: BlockHeight, txs: Vec<Vec<u8>>) -> Self {
        {
            let mut script = self.script();
            script.tip = script.tip.max(height);
            script.blocks.insert(
                height,
                RawBlock {
                    height,
                    time: 1_600_000_000 + height,
                    txs,
                },
            );
        }
        self
    }

    pub fn with_result(self, tx_hash: &str, result: TxResult) -> Self {
        self.script().results.insert(tx_hash.to_owned(), result);
        self
    }

    /// The next `times` pooled fetches of `height` fail.
    pub fn fail_pooled(self, height: BlockHeight, times: usize) -> Self {
        self.script().pooled_failures.insert(height, times);
        self
    }

    /// The next `times` fresh-connection fetches of `height` fail.
    pub fn fail_fresh(self, height: BlockHeight, times: usize) -> Self {
        self.script().fresh_failures.insert(height, times);
        self
    }

    /// Fetching `height` panics.
    pub fn panic_at(self, height: BlockHeight) -> Self {
        self.script().panicking_heights.push(height);
        self
    }

    fn take_failure(
        failures: &mut HashMap<BlockHeight, usize>,
        height: BlockHeight,
    ) -> bool {
        match failures.get_mut(&height) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        }
    }

    fn block(&self, height: BlockHeight) -> anyhow::Result<RawBlock> {
        let script = self.script();
        if script.panicking_heights.contains(&height) {
            drop(script);
            panic!("scripted panic at height {height}");
        }
        script
            .blocks
            .get(&height)
            .cloned()
            .ok_or_else(|| anyhow!("No block at height {height}"))
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn latest_height(&self) -> anyhow::Result<BlockHeight> {
        Ok(self.script().tip)
    }

    async fn fetch_block(&self, height: BlockHeight) -> anyhow::Result<RawBlock> {
        self.pooled_fetches.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&mut self.script().pooled_failures, height) {
            return Err(anyhow!("Connection reset"));
        }
        self.block(height)
    }

    async fn fetch_block_fresh(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock> {
        self.fresh_fetches.fetch_add(1, Ordering::SeqCst);
        if Self::take_failure(&mut self.script().fresh_failures, height) {
            return Err(anyhow!("Connection refused"));
        }
        self.block(height)
    }

    async fn query_tx_result(&self, tx_hash: &str) -> anyhow::Result<TxResult> {
        self.result_queries.fetch_add(1, Ordering::SeqCst);
        self.script()
            .results
            .get(tx_hash)
            .cloned()
            .ok_or_else(|| anyhow!("Transaction {tx_hash} not found"))
    }
}
