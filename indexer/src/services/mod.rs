pub mod db;
pub mod tendermint;
