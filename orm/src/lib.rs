pub mod blocks;
pub mod checkpoint;
pub mod migrations;
pub mod schema;
pub mod transactions;
pub mod tx_msgs;
pub mod utils;
