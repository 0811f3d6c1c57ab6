use std::collections::BTreeSet;

use prost::Message;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::block::{BlockHeight, RawBlock};
use crate::coin::Coin;
use crate::correlation;
use crate::error::{DecodeError, MessageError};
use crate::message::NormalizedMessage;
use crate::proto::tx::{AuthInfo, TxBody, TxRaw};
use crate::proto::Any;
use crate::registry::MessageRegistry;
use crate::tx_result::{Event, TxResult, TxStatus};

/// Content hash of a raw transaction, as the node reports it.
pub fn tx_hash(raw: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(raw))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas: i64,
}

/// Decoded transaction bytes, before execution metadata is known.
#[derive(Debug, Clone, PartialEq)]
pub struct TxEnvelope {
    pub hash: String,
    pub fee: Fee,
    pub memo: String,
    pub messages: Vec<Any>,
}

impl TxEnvelope {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let tx_raw = TxRaw::decode(raw).map_err(DecodeError::Raw)?;
        let body =
            TxBody::decode(tx_raw.body_bytes.as_slice()).map_err(DecodeError::Body)?;
        let auth_info = AuthInfo::decode(tx_raw.auth_info_bytes.as_slice())
            .map_err(DecodeError::AuthInfo)?;

        if body.messages.is_empty() {
            return Err(DecodeError::NoMessages);
        }

        let fee = auth_info
            .fee
            .map(|fee| Fee {
                amount: Coin::from_proto_list(&fee.amount),
                gas: i64::try_from(fee.gas_limit).unwrap_or(i64::MAX),
            })
            .unwrap_or_default();

        Ok(Self {
            hash: tx_hash(raw),
            fee,
            memo: body.memo,
            messages: body.messages,
        })
    }
}

/// Normalized transaction document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub height: BlockHeight,
    pub time: i64,
    pub hash: String,
    pub tx_type: String,
    pub fee: Fee,
    pub memo: String,
    pub status: TxStatus,
    pub code: u32,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub log: String,
    pub events: Vec<Event>,
    pub messages: Vec<NormalizedMessage>,
    pub initiator: String,
    pub from: String,
    pub to: String,
    pub amount: Vec<Coin>,
    pub correlation_hash: Option<String>,
    pub participant_addresses: BTreeSet<String>,
    pub signers: BTreeSet<String>,
}

/// One row per normalized message, keyed by `(tx_hash, msg_index)`.
/// `tx_index` is the transaction's position in its block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxMsg {
    pub height: BlockHeight,
    pub time: i64,
    pub tx_hash: String,
    pub msg_index: i32,
    pub tx_index: i32,
    pub msg_type: String,
    pub tx_status: TxStatus,
    pub tx_memo: String,
    pub tx_log: String,
    pub tx_fee: Fee,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub events: Vec<Event>,
    pub msg: NormalizedMessage,
    pub addresses: BTreeSet<String>,
    pub signers: BTreeSet<String>,
}

impl Transaction {
    /// Joins a decoded envelope with its execution result. Messages the
    /// registry can't normalize are skipped; their siblings are kept.
    pub fn build(
        block: &RawBlock,
        tx_index: usize,
        envelope: TxEnvelope,
        result: TxResult,
        registry: &MessageRegistry,
    ) -> (Transaction, Vec<TxMsg>) {
        let mut normalized = Vec::with_capacity(envelope.messages.len());

        for (index, message) in envelope.messages.iter().enumerate() {
            match registry.normalize(message) {
                Ok(info) => normalized.push((index, info)),
                Err(MessageError::UnknownType(type_url)) => {
                    tracing::warn!(
                        height = block.height,
                        tx_hash = %envelope.hash,
                        msg_index = index,
                        %type_url,
                        "Skipping unknown message type"
                    );
                }
                Err(reason) => {
                    tracing::error!(
                        height = block.height,
                        tx_hash = %envelope.hash,
                        msg_index = index,
                        %reason,
                        "Skipping message"
                    );
                }
            }
        }

        let messages: Vec<NormalizedMessage> = normalized
            .iter()
            .map(|(_, info)| info.document.clone())
            .collect();
        let participant_addresses: BTreeSet<String> = normalized
            .iter()
            .flat_map(|(_, info)| info.addresses.iter().cloned())
            .collect();
        let signers: BTreeSet<String> = normalized
            .iter()
            .map(|(_, info)| info.signer.clone())
            .filter(|signer| !signer.is_empty())
            .collect();

        let initiator = normalized
            .first()
            .map(|(_, info)| info.signer.clone())
            .unwrap_or_default();
        let tx_type = messages
            .first()
            .map(|msg| msg.msg_type().to_owned())
            .unwrap_or_default();
        let summary = messages
            .iter()
            .find_map(NormalizedMessage::transfer_summary)
            .unwrap_or_default();
        let correlation_hash =
            correlation::correlation_hash(&messages, &result.events);
        let tx_index = i32::try_from(tx_index).unwrap_or(i32::MAX);

        let tx_msgs = normalized
            .into_iter()
            .map(|(index, info)| TxMsg {
                height: block.height,
                time: block.time,
                tx_hash: envelope.hash.clone(),
                msg_index: i32::try_from(index).unwrap_or(i32::MAX),
                tx_index,
                msg_type: info.document.msg_type().to_owned(),
                tx_status: result.status,
                tx_memo: envelope.memo.clone(),
                tx_log: result.log.clone(),
                tx_fee: envelope.fee.clone(),
                gas_used: result.gas_used,
                gas_wanted: result.gas_wanted,
                events: result.events.clone(),
                msg: info.document,
                addresses: info.addresses,
                signers: signers.clone(),
            })
            .collect();

        let transaction = Transaction {
            height: block.height,
            time: block.time,
            hash: envelope.hash,
            tx_type,
            fee: envelope.fee,
            memo: envelope.memo,
            status: result.status,
            code: result.code,
            gas_used: result.gas_used,
            gas_wanted: result.gas_wanted,
            log: result.log,
            events: result.events,
            messages,
            initiator,
            from: summary.from,
            to: summary.to,
            amount: summary.amount,
            correlation_hash,
            participant_addresses,
            signers,
        };

        (transaction, tx_msgs)
    }
}
