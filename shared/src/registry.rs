use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;

use crate::error::MessageError;
use crate::message::NormalizedMessage;
use crate::proto::{asset, bank, ibc, nft, service, Any};

/// A chain message the indexer knows how to normalize.
pub trait DocMsg: prost::Message + Default + 'static {
    /// Runtime type tag the message is packed under.
    const TYPE_URL: &'static str;

    fn build_document(&self) -> NormalizedMessage;

    /// Every account taking part in the message, primary actor included.
    fn extract_addresses(&self) -> BTreeSet<String>;

    /// Primary actor of the message.
    fn signer(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MsgDocInfo {
    pub document: NormalizedMessage,
    pub addresses: BTreeSet<String>,
    pub signer: String,
}

pub trait MessageHandler: Send + Sync {
    fn handle(&self, raw: &[u8]) -> Result<MsgDocInfo, MessageError>;
}

struct TypedHandler<M>(PhantomData<fn() -> M>);

impl<M: DocMsg> MessageHandler for TypedHandler<M> {
    fn handle(&self, raw: &[u8]) -> Result<MsgDocInfo, MessageError> {
        let msg = M::decode(raw).map_err(|source| MessageError::Malformed {
            type_url: M::TYPE_URL.to_owned(),
            source,
        })?;

        let addresses = msg.extract_addresses();
        if addresses.is_empty() {
            return Err(MessageError::NoParticipants(M::TYPE_URL.to_owned()));
        }

        Ok(MsgDocInfo {
            document: msg.build_document(),
            addresses,
            signer: msg.signer(),
        })
    }
}

/// Type tag to handler dispatch table, filled once at startup.
pub struct MessageRegistry {
    handlers: HashMap<&'static str, Box<dyn MessageHandler>>,
}

impl MessageRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register<M: DocMsg>(&mut self) -> &mut Self {
        self.handlers
            .insert(M::TYPE_URL, Box::new(TypedHandler::<M>(PhantomData)));
        self
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.handlers.contains_key(type_url)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn normalize(&self, message: &Any) -> Result<MsgDocInfo, MessageError> {
        let handler = self
            .handlers
            .get(message.type_url.as_str())
            .ok_or_else(|| MessageError::UnknownType(message.type_url.clone()))?;

        handler.handle(&message.value)
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register::<bank::MsgSend>()
            .register::<bank::MsgMultiSend>()
            .register::<asset::MsgIssueToken>()
            .register::<asset::MsgEditToken>()
            .register::<asset::MsgMintToken>()
            .register::<asset::MsgTransferTokenOwner>()
            .register::<asset::MsgCreateGateway>()
            .register::<asset::MsgEditGateway>()
            .register::<asset::MsgTransferGatewayOwner>()
            .register::<nft::MsgIssueDenom>()
            .register::<nft::MsgMintNft>()
            .register::<nft::MsgEditNft>()
            .register::<nft::MsgTransferNft>()
            .register::<nft::MsgBurnNft>()
            .register::<service::MsgKillRequestContext>()
            .register::<service::MsgPauseRequestContext>()
            .register::<service::MsgStartRequestContext>()
            .register::<ibc::MsgRecvPacket>()
            .register::<ibc::MsgTransfer>();
        registry
    }
}
