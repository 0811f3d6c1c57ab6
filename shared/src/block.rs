use serde::Serialize;

use crate::transaction::{Transaction, TxMsg};

pub type BlockHeight = i64;

/// Block as returned by the node: raw transaction bytes plus the metadata the
/// normalizers need.
#[derive(Debug, Clone, Default)]
pub struct RawBlock {
    pub height: BlockHeight,
    /// Block header time, unix seconds.
    pub time: i64,
    pub txs: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    pub height: BlockHeight,
    pub create_time: i64,
}

/// Everything derived from one height, ready to be committed together with
/// the checkpoint advance.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBlock {
    pub block: Block,
    pub transactions: Vec<Transaction>,
    pub messages: Vec<TxMsg>,
}

impl NormalizedBlock {
    /// Shell standing in for a height whose build failed. Storage refuses to
    /// commit it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.block.height == 0
    }
}
