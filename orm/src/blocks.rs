use diesel::{Insertable, Queryable, Selectable};
use shared::block::Block;

use crate::schema::blocks;
use crate::utils::naive_timestamp;

#[derive(Insertable, Clone, Queryable, Selectable, Debug)]
#[diesel(table_name = blocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BlockInsertDb {
    pub height: i64,
    pub create_time: chrono::NaiveDateTime,
}

pub type BlockDb = BlockInsertDb;

impl TryFrom<&Block> for BlockInsertDb {
    type Error = anyhow::Error;

    fn try_from(block: &Block) -> Result<Self, Self::Error> {
        Ok(Self {
            height: block.height,
            create_time: naive_timestamp(block.create_time)?,
        })
    }
}
