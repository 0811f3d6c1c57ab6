//! Links the two halves of an IBC packet handshake. The sending chain emits a
//! `send_packet` event, the receiving chain executes a `MsgRecvPacket`
//! carrying the same packet; both sides hash the same canonical payload.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::message::ibc::{DocHeight, DocPacket};
use crate::message::NormalizedMessage;
use crate::tx_result::Event;

pub const SEND_PACKET_EVENT: &str = "send_packet";
pub const RECV_PACKET_EVENT: &str = "recv_packet";

/// Canonical encoding of a packet. Field order is part of the hash.
#[derive(Serialize)]
struct HandshakePayload<'a> {
    sequence: u64,
    source_port: &'a str,
    source_channel: &'a str,
    destination_port: &'a str,
    destination_channel: &'a str,
    data: &'a str,
    timeout_height: String,
    timeout_timestamp: u64,
}

impl<'a> From<&'a DocPacket> for HandshakePayload<'a> {
    fn from(packet: &'a DocPacket) -> Self {
        Self {
            sequence: packet.sequence,
            source_port: &packet.source_port,
            source_channel: &packet.source_channel,
            destination_port: &packet.destination_port,
            destination_channel: &packet.destination_channel,
            data: &packet.data,
            timeout_height: packet.timeout_height.to_string(),
            timeout_timestamp: packet.timeout_timestamp,
        }
    }
}

pub fn packet_hash(packet: &DocPacket) -> String {
    let payload = HandshakePayload::from(packet);
    let encoded = serde_json::to_vec(&payload).unwrap_or_default();
    hex::encode(Sha256::digest(encoded))
}

/// Rebuilds the packet advertised by a `send_packet` / `recv_packet` event.
pub fn packet_from_event(event: &Event) -> Option<DocPacket> {
    if event.kind != SEND_PACKET_EVENT && event.kind != RECV_PACKET_EVENT {
        return None;
    }

    let packet = (|| {
        Some(DocPacket {
            sequence: event.attribute("packet_sequence")?.parse().ok()?,
            source_port: event.attribute("packet_src_port")?.to_owned(),
            source_channel: event.attribute("packet_src_channel")?.to_owned(),
            destination_port: event.attribute("packet_dst_port")?.to_owned(),
            destination_channel: event
                .attribute("packet_dst_channel")?
                .to_owned(),
            data: event.attribute("packet_data")?.to_owned(),
            timeout_height: parse_height(
                event.attribute("packet_timeout_height").unwrap_or("0-0"),
            )?,
            timeout_timestamp: event
                .attribute("packet_timeout_timestamp")
                .unwrap_or("0")
                .parse()
                .ok()?,
        })
    })();

    if packet.is_none() {
        tracing::debug!(kind = %event.kind, "Incomplete packet event");
    }
    packet
}

fn parse_height(value: &str) -> Option<DocHeight> {
    let (number, height) = value.split_once('-')?;
    Some(DocHeight {
        revision_number: number.parse().ok()?,
        revision_height: height.parse().ok()?,
    })
}

/// Hash of the first handshake marker in `events`.
pub fn hash_from_events(events: &[Event]) -> Option<String> {
    events
        .iter()
        .find_map(packet_from_event)
        .map(|packet| packet_hash(&packet))
}

/// Correlation hash of a transaction: a received packet wins over emitted
/// handshake events.
pub fn correlation_hash(
    messages: &[NormalizedMessage],
    events: &[Event],
) -> Option<String> {
    messages
        .iter()
        .find_map(NormalizedMessage::received_packet)
        .map(packet_hash)
        .or_else(|| hash_from_events(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ibc::DocMsgRecvPacket;

    const PAYLOAD: &str =
        r#"{"amount":"100","denom":"uiris","receiver":"cosmos1dst","sender":"iaa1src"}"#;

    fn send_packet_event(data: &str) -> Event {
        Event::new(
            SEND_PACKET_EVENT,
            [
                ("packet_data", data),
                ("packet_timeout_height", "1-1200"),
                ("packet_timeout_timestamp", "0"),
                ("packet_sequence", "42"),
                ("packet_src_port", "transfer"),
                ("packet_src_channel", "channel-3"),
                ("packet_dst_port", "transfer"),
                ("packet_dst_channel", "channel-9"),
            ],
        )
    }

    fn recv_packet_message(data: &str) -> NormalizedMessage {
        NormalizedMessage::RecvPacket(DocMsgRecvPacket {
            packet: DocPacket {
                sequence: 42,
                source_port: "transfer".to_owned(),
                source_channel: "channel-3".to_owned(),
                destination_port: "transfer".to_owned(),
                destination_channel: "channel-9".to_owned(),
                data: data.to_owned(),
                timeout_height: DocHeight {
                    revision_number: 1,
                    revision_height: 1200,
                },
                timeout_timestamp: 0,
            },
            proof: String::new(),
            proof_height: DocHeight::default(),
            signer: "iaa1relayer".to_owned(),
        })
    }

    #[test]
    fn send_and_receive_sides_agree() {
        let send_side = correlation_hash(&[], &[send_packet_event(PAYLOAD)]);
        let recv_side = correlation_hash(&[recv_packet_message(PAYLOAD)], &[]);

        assert!(send_side.is_some());
        assert_eq!(send_side, recv_side);
    }

    #[test]
    fn one_byte_change_breaks_the_link() {
        let tampered = PAYLOAD.replace("100", "101");

        let send_side = correlation_hash(&[], &[send_packet_event(PAYLOAD)]);
        let recv_side =
            correlation_hash(&[recv_packet_message(&tampered)], &[]);

        assert_ne!(send_side, recv_side);
    }

    #[test]
    fn no_marker_means_no_hash() {
        let transfer = Event::new("transfer", [("recipient", "iaa1to")]);

        assert_eq!(correlation_hash(&[], &[transfer]), None);
        assert_eq!(correlation_hash(&[], &[]), None);
    }

    #[test]
    fn incomplete_marker_is_ignored() {
        let incomplete =
            Event::new(SEND_PACKET_EVENT, [("packet_sequence", "1")]);

        assert_eq!(hash_from_events(&[incomplete]), None);
    }

    #[test]
    fn recv_packet_event_matches_send_packet_event() {
        let mut recv_event = send_packet_event(PAYLOAD);
        recv_event.kind = RECV_PACKET_EVENT.to_owned();

        assert_eq!(
            hash_from_events(&[send_packet_event(PAYLOAD)]),
            hash_from_events(&[recv_event])
        );
    }
}
