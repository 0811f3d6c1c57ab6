pub mod block;
pub mod checkpoint;
pub mod transactions;
