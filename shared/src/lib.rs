pub mod block;
pub mod checkpoint;
pub mod coin;
pub mod correlation;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod log_config;
pub mod message;
pub mod proto;
pub mod registry;
pub mod rpc;
pub mod store;
pub mod token;
pub mod transaction;
pub mod tx_result;
