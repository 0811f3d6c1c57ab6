pub mod db;
pub mod memory_store;
pub mod mock_rpc;
pub mod tx_builder;
