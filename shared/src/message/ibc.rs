use std::collections::BTreeSet;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{address_set, NormalizedMessage};
use crate::coin::Coin;
use crate::proto::ibc::{Height, MsgRecvPacket, MsgTransfer, Packet};
use crate::registry::DocMsg;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocHeight {
    pub revision_number: u64,
    pub revision_height: u64,
}

impl From<Option<&Height>> for DocHeight {
    fn from(value: Option<&Height>) -> Self {
        value
            .map(|height| Self {
                revision_number: height.revision_number,
                revision_height: height.revision_height,
            })
            .unwrap_or_default()
    }
}

impl Display for DocHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.revision_number, self.revision_height)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocPacket {
    pub sequence: u64,
    pub source_port: String,
    pub source_channel: String,
    pub destination_port: String,
    pub destination_channel: String,
    pub data: String,
    pub timeout_height: DocHeight,
    pub timeout_timestamp: u64,
}

/// ICS-20 fungible token transfer payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FungibleTokenPacketData {
    #[serde(default)]
    pub denom: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
}

impl DocPacket {
    pub fn fungible_token_data(&self) -> Option<FungibleTokenPacketData> {
        serde_json::from_str(&self.data)
            .map_err(|reason| {
                tracing::error!(
                    data = %self.data,
                    %reason,
                    "Failed to decode packet data"
                );
            })
            .ok()
    }
}

impl From<&Packet> for DocPacket {
    fn from(packet: &Packet) -> Self {
        Self {
            sequence: packet.sequence,
            source_port: packet.source_port.clone(),
            source_channel: packet.source_channel.clone(),
            destination_port: packet.destination_port.clone(),
            destination_channel: packet.destination_channel.clone(),
            data: String::from_utf8_lossy(&packet.data).into_owned(),
            timeout_height: DocHeight::from(packet.timeout_height.as_ref()),
            timeout_timestamp: packet.timeout_timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgRecvPacket {
    pub packet: DocPacket,
    pub proof: String,
    pub proof_height: DocHeight,
    pub signer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgIbcTransfer {
    pub source_port: String,
    pub source_channel: String,
    pub token: Option<Coin>,
    pub sender: String,
    pub receiver: String,
    pub timeout_height: DocHeight,
    pub timeout_timestamp: u64,
}

impl DocMsg for MsgRecvPacket {
    const TYPE_URL: &'static str = "/ibc.core.channel.v1.MsgRecvPacket";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::RecvPacket(DocMsgRecvPacket {
            packet: self.packet.as_ref().map(DocPacket::from).unwrap_or_default(),
            proof: hex::encode(&self.proof_commitment),
            proof_height: DocHeight::from(self.proof_height.as_ref()),
            signer: self.signer.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        let packet_data = self
            .packet
            .as_ref()
            .map(DocPacket::from)
            .and_then(|packet| packet.fungible_token_data())
            .unwrap_or_default();

        address_set([
            self.signer.as_str(),
            packet_data.sender.as_str(),
            packet_data.receiver.as_str(),
        ])
    }

    fn signer(&self) -> String {
        self.signer.clone()
    }
}

impl DocMsg for MsgTransfer {
    const TYPE_URL: &'static str = "/ibc.applications.transfer.v1.MsgTransfer";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::IbcTransfer(DocMsgIbcTransfer {
            source_port: self.source_port.clone(),
            source_channel: self.source_channel.clone(),
            token: self.token.as_ref().map(Coin::from),
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            timeout_height: DocHeight::from(self.timeout_height.as_ref()),
            timeout_timestamp: self.timeout_timestamp,
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str(), self.receiver.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recv_packet(data: &str) -> MsgRecvPacket {
        MsgRecvPacket {
            packet: Some(Packet {
                sequence: 7,
                source_port: "transfer".to_owned(),
                source_channel: "channel-1".to_owned(),
                destination_port: "transfer".to_owned(),
                destination_channel: "channel-0".to_owned(),
                data: data.as_bytes().to_vec(),
                timeout_height: Some(Height {
                    revision_number: 1,
                    revision_height: 500,
                }),
                timeout_timestamp: 0,
            }),
            proof_commitment: vec![1, 2],
            proof_height: None,
            signer: "iaa1relayer".to_owned(),
        }
    }

    #[test]
    fn recv_packet_summary_comes_from_packet_data() {
        let msg = recv_packet(
            r#"{"denom":"uatom","amount":"25","sender":"cosmos1src","receiver":"iaa1dst"}"#,
        );

        let doc = msg.build_document();
        let summary = doc.transfer_summary().unwrap();
        assert_eq!(summary.from, "cosmos1src");
        assert_eq!(summary.to, "iaa1dst");
        assert_eq!(summary.amount, vec![Coin::new("uatom", "25")]);
        assert_eq!(
            msg.extract_addresses().into_iter().collect::<Vec<_>>(),
            vec!["cosmos1src", "iaa1dst", "iaa1relayer"]
        );
        assert_eq!(doc.received_packet().unwrap().timeout_height.to_string(), "1-500");
    }

    #[test]
    fn undecodable_packet_data_keeps_the_relayer() {
        let msg = recv_packet("not json");

        assert!(msg.build_document().transfer_summary().is_none());
        assert_eq!(
            msg.extract_addresses().into_iter().collect::<Vec<_>>(),
            vec!["iaa1relayer"]
        );
    }
}
