use anyhow::Context;
use async_trait::async_trait;
use deadpool::managed::{self, Metrics, Object, RecycleResult};
use shared::block::{BlockHeight, RawBlock};
use shared::rpc::ChainRpc;
use shared::tx_result::TxResult;
use tendermint::block::Height;
use tendermint::hash::Algorithm;
use tendermint::Hash;
use tendermint_rpc::{Client, HttpClient};

/// Opens CometBFT RPC clients for the pool.
pub struct RpcManager {
    url: String,
}

impl RpcManager {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl managed::Manager for RpcManager {
    type Type = HttpClient;
    type Error = tendermint_rpc::Error;

    async fn create(&self) -> Result<HttpClient, Self::Error> {
        HttpClient::new(self.url.as_str())
    }

    async fn recycle(
        &self,
        _client: &mut HttpClient,
        _metrics: &Metrics,
    ) -> RecycleResult<Self::Error> {
        Ok(())
    }
}

pub type RpcPool = managed::Pool<RpcManager>;

pub fn build_pool(url: &str, max_size: usize) -> anyhow::Result<RpcPool> {
    RpcPool::builder(RpcManager::new(url))
        .max_size(max_size)
        .build()
        .context("Failed to build RPC client pool")
}

/// `ChainRpc` over a pool of CometBFT clients. A client is checked out for
/// the duration of one request; one that failed is dropped from the pool.
#[derive(Clone)]
pub struct TendermintRpc {
    pool: RpcPool,
}

impl TendermintRpc {
    pub fn new(pool: RpcPool) -> Self {
        Self { pool }
    }

    async fn client(&self) -> anyhow::Result<Object<RpcManager>> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to get RPC client from pool")
    }

    async fn query_block(
        client: &HttpClient,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock> {
        let tm_height = Height::try_from(height)
            .with_context(|| format!("Invalid block height {height}"))?;
        let response = client
            .block(tm_height)
            .await
            .with_context(|| format!("Failed to query block {height}"))?;

        Ok(RawBlock {
            height,
            time: response.block.header.time.unix_timestamp(),
            txs: response.block.data,
        })
    }
}

#[async_trait]
impl ChainRpc for TendermintRpc {
    async fn latest_height(&self) -> anyhow::Result<BlockHeight> {
        let client = self.client().await?;
        let status = client
            .status()
            .await
            .context("Failed to query CometBFT's status")?;

        BlockHeight::try_from(status.sync_info.latest_block_height.value())
            .context("Latest block height out of range")
    }

    async fn fetch_block(&self, height: BlockHeight) -> anyhow::Result<RawBlock> {
        let client = self.client().await?;
        let result = Self::query_block(&client, height).await;
        if result.is_err() {
            drop(Object::take(client));
        }
        result
    }

    async fn fetch_block_fresh(
        &self,
        height: BlockHeight,
    ) -> anyhow::Result<RawBlock> {
        let client = managed::Manager::create(self.pool.manager())
            .await
            .context("Failed to open a fresh RPC client")?;
        Self::query_block(&client, height).await
    }

    async fn query_tx_result(&self, tx_hash: &str) -> anyhow::Result<TxResult> {
        let hash = Hash::from_hex_upper(Algorithm::Sha256, tx_hash)
            .with_context(|| format!("Invalid transaction hash {tx_hash}"))?;
        let client = self.client().await?;
        let response = client
            .tx(hash, false)
            .await
            .with_context(|| format!("Failed to query transaction {tx_hash}"))?;

        Ok(TxResult::from(response.tx_result))
    }
}
