use std::collections::BTreeSet;

use serde::Serialize;

use super::{address_set, NormalizedMessage};
use crate::proto::service::{
    MsgKillRequestContext, MsgPauseRequestContext, MsgStartRequestContext,
};
use crate::registry::DocMsg;

/// Shared shape of the request context lifecycle messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgRequestContext {
    pub request_context_id: String,
    pub consumer: String,
}

impl DocMsgRequestContext {
    fn new(request_context_id: &[u8], consumer: &str) -> Self {
        Self {
            request_context_id: hex::encode_upper(request_context_id),
            consumer: consumer.to_owned(),
        }
    }
}

impl DocMsg for MsgKillRequestContext {
    const TYPE_URL: &'static str = "/irismod.service.MsgKillRequestContext";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::KillRequestContext(DocMsgRequestContext::new(
            &self.request_context_id,
            &self.consumer,
        ))
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.consumer.as_str()])
    }

    fn signer(&self) -> String {
        self.consumer.clone()
    }
}

impl DocMsg for MsgPauseRequestContext {
    const TYPE_URL: &'static str = "/irismod.service.MsgPauseRequestContext";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::PauseRequestContext(DocMsgRequestContext::new(
            &self.request_context_id,
            &self.consumer,
        ))
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.consumer.as_str()])
    }

    fn signer(&self) -> String {
        self.consumer.clone()
    }
}

impl DocMsg for MsgStartRequestContext {
    const TYPE_URL: &'static str = "/irismod.service.MsgStartRequestContext";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::StartRequestContext(DocMsgRequestContext::new(
            &self.request_context_id,
            &self.consumer,
        ))
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.consumer.as_str()])
    }

    fn signer(&self) -> String {
        self.consumer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_context_id_is_upper_hex() {
        let msg = MsgKillRequestContext {
            request_context_id: vec![0xab, 0x01, 0xff],
            consumer: "iaa1consumer".to_owned(),
        };

        assert_eq!(
            msg.build_document(),
            NormalizedMessage::KillRequestContext(DocMsgRequestContext {
                request_context_id: "AB01FF".to_owned(),
                consumer: "iaa1consumer".to_owned(),
            })
        );
        assert_eq!(msg.signer(), "iaa1consumer");
    }
}
