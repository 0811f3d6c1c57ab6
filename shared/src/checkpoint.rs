use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::block::BlockHeight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Running,
    Stopped,
    Error,
}

impl Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Durable sync progress of one chain. `current_height` is the last height
/// whose artifacts are fully committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub chain_id: String,
    pub current_height: BlockHeight,
    pub status: SyncStatus,
    pub last_update_time: i64,
}

impl Checkpoint {
    /// Checkpoint for a chain that starts ingesting at `start_height`.
    pub fn onboard(
        chain_id: impl Into<String>,
        start_height: BlockHeight,
        timestamp: i64,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            current_height: start_height.max(1) - 1,
            status: SyncStatus::Running,
            last_update_time: timestamp,
        }
    }

    pub fn next_height(&self) -> BlockHeight {
        self.current_height + 1
    }

    /// The record as it must look once `height` is committed.
    pub fn advance_to(&self, height: BlockHeight, timestamp: i64) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            current_height: height,
            status: SyncStatus::Running,
            last_update_time: timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_points_before_start_height() {
        let checkpoint = Checkpoint::onboard("irishub-1", 100, 0);
        assert_eq!(checkpoint.current_height, 99);
        assert_eq!(checkpoint.next_height(), 100);

        let genesis = Checkpoint::onboard("irishub-1", 0, 0);
        assert_eq!(genesis.next_height(), 1);
    }

    #[test]
    fn advance_moves_by_one_and_resets_status() {
        let mut checkpoint = Checkpoint::onboard("irishub-1", 1, 0);
        checkpoint.status = SyncStatus::Error;

        let next = checkpoint.advance_to(checkpoint.next_height(), 42);
        assert_eq!(next.current_height, checkpoint.current_height + 1);
        assert_eq!(next.status, SyncStatus::Running);
        assert_eq!(next.last_update_time, 42);
    }
}
