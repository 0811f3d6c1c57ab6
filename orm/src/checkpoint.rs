use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use shared::checkpoint::{Checkpoint, SyncStatus};

use crate::schema::sync_checkpoints;

#[derive(Debug, Clone, Serialize, Deserialize, diesel_derive_enum::DbEnum)]
#[ExistingTypePath = "crate::schema::sql_types::SyncStatus"]
pub enum SyncStatusDb {
    Running,
    Stopped,
    Error,
}

impl From<SyncStatus> for SyncStatusDb {
    fn from(value: SyncStatus) -> Self {
        match value {
            SyncStatus::Running => Self::Running,
            SyncStatus::Stopped => Self::Stopped,
            SyncStatus::Error => Self::Error,
        }
    }
}

impl From<SyncStatusDb> for SyncStatus {
    fn from(value: SyncStatusDb) -> Self {
        match value {
            SyncStatusDb::Running => Self::Running,
            SyncStatusDb::Stopped => Self::Stopped,
            SyncStatusDb::Error => Self::Error,
        }
    }
}

#[derive(
    Serialize, Queryable, Selectable, Insertable, AsChangeset, Clone, Debug,
)]
#[diesel(table_name = sync_checkpoints, primary_key(chain_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CheckpointDb {
    pub chain_id: String,
    pub current_height: i64,
    pub status: SyncStatusDb,
    pub last_update_time: i64,
}

impl From<Checkpoint> for CheckpointDb {
    fn from(value: Checkpoint) -> Self {
        Self {
            chain_id: value.chain_id,
            current_height: value.current_height,
            status: SyncStatusDb::from(value.status),
            last_update_time: value.last_update_time,
        }
    }
}

impl From<CheckpointDb> for Checkpoint {
    fn from(value: CheckpointDb) -> Self {
        Self {
            chain_id: value.chain_id,
            current_height: value.current_height,
            status: SyncStatus::from(value.status),
            last_update_time: value.last_update_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_survives_the_db_model() {
        let checkpoint = Checkpoint::onboard("irishub-1", 500, 1_700_000_000);

        let stored = CheckpointDb::from(checkpoint.clone());
        assert_eq!(stored.current_height, 499);
        assert_eq!(Checkpoint::from(stored), checkpoint);
    }
}
