use thiserror::Error;

use crate::block::BlockHeight;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MainError {
    #[error("No action error")]
    NoAction,
    #[error("RPC error")]
    RpcError,
    #[error("Can't commit block to database")]
    Database,
    #[error("Checkpoint was advanced by another writer")]
    CommitConflict,
    #[error("Height aborted")]
    Aborted,
    #[error("Invalid configuration")]
    Config,
}

impl MainError {
    /// Whether the crawler should try the height again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Config)
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed raw transaction: {0}")]
    Raw(#[source] prost::DecodeError),
    #[error("malformed transaction body: {0}")]
    Body(#[source] prost::DecodeError),
    #[error("malformed auth info: {0}")]
    AuthInfo(#[source] prost::DecodeError),
    #[error("transaction carries no messages")]
    NoMessages,
}

#[derive(Error, Debug)]
pub enum MessageError {
    #[error("unknown message type {0}")]
    UnknownType(String),
    #[error("malformed {type_url} message: {source}")]
    Malformed {
        type_url: String,
        #[source]
        source: prost::DecodeError,
    },
    #[error("{0} message names no participant")]
    NoParticipants(String),
}

#[derive(Error, Debug)]
#[error("failed to fetch block {height}: {reason:#}")]
pub struct FetchError {
    pub height: BlockHeight,
    pub reason: anyhow::Error,
}

pub trait AsRpcError<T> {
    fn into_rpc_error(self) -> Result<T, MainError>;
}

impl<T> AsRpcError<T> for anyhow::Result<T> {
    #[inline]
    fn into_rpc_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "RPC error");
            MainError::RpcError
        })
    }
}

pub trait AsDbError<T> {
    fn into_db_error(self) -> Result<T, MainError>;
}

impl<T> AsDbError<T> for anyhow::Result<T> {
    #[inline]
    fn into_db_error(self) -> Result<T, MainError> {
        self.map_err(|reason| {
            tracing::error!(?reason, "Database error");
            MainError::Database
        })
    }
}

pub trait ContextDbInteractError<T> {
    fn context_db_interact_error(self) -> anyhow::Result<T>;
}

impl<T, E> ContextDbInteractError<T> for Result<T, E> {
    fn context_db_interact_error(self) -> anyhow::Result<T> {
        self.map_err(|_| anyhow::anyhow!("Failed to interact with db"))
    }
}
