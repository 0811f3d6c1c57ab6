use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tendermint::abci::types::ExecTxResult;
use tendermint::abci::Event as TendermintEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: BTreeMap<String, String>,
}

impl Event {
    /// Builds an event from ordered key/value pairs. A key seen twice keeps
    /// its last value.
    pub fn new<K, V>(
        kind: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes = attributes.into_iter().fold(
            BTreeMap::default(),
            |mut acc, (key, value)| {
                acc.insert(key.into(), value.into());
                acc
            },
        );
        Self {
            kind: kind.into(),
            attributes,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl From<&TendermintEvent> for Event {
    fn from(event: &TendermintEvent) -> Self {
        let attributes = event.attributes.iter().filter_map(|attribute| {
            match (attribute.key_str(), attribute.value_str()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                _ => {
                    tracing::warn!(
                        kind = %event.kind,
                        "Skipping non utf-8 event attribute"
                    );
                    None
                }
            }
        });
        Event::new(event.kind.clone(), attributes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Success,
    Fail,
    #[default]
    Unknown,
}

impl From<u32> for TxStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Success,
            _ => Self::Fail,
        }
    }
}

impl Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Fail => write!(f, "fail"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Execution outcome of a transaction, queried separately from the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxResult {
    pub status: TxStatus,
    pub code: u32,
    pub log: String,
    pub gas_used: i64,
    pub gas_wanted: i64,
    pub events: Vec<Event>,
}

impl TxResult {
    /// Best-effort fields for a transaction whose result could not be
    /// queried.
    pub fn degraded() -> Self {
        Self::default()
    }
}

impl From<ExecTxResult> for TxResult {
    fn from(value: ExecTxResult) -> Self {
        let code = value.code.value();
        Self {
            status: TxStatus::from(code),
            code,
            log: value.log,
            gas_used: value.gas_used,
            gas_wanted: value.gas_wanted,
            events: value.events.iter().map(Event::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicated_event_keys_keep_last_value() {
        let event = Event::new(
            "transfer",
            [
                ("recipient", "iaa1first"),
                ("amount", "10uiris"),
                ("recipient", "iaa1second"),
            ],
        );

        assert_eq!(event.attributes.len(), 2);
        assert_eq!(event.attribute("recipient"), Some("iaa1second"));
        assert_eq!(event.attribute("amount"), Some("10uiris"));
    }

    #[test]
    fn status_follows_result_code() {
        assert_eq!(TxStatus::from(0), TxStatus::Success);
        assert_eq!(TxStatus::from(5), TxStatus::Fail);
        assert_eq!(TxResult::degraded().status, TxStatus::Unknown);
    }

    #[test]
    fn event_serializes_kind_as_type() {
        let event = Event::new("send_packet", [("packet_sequence", "1")]);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "send_packet");
        assert_eq!(json["attributes"]["packet_sequence"], "1");
    }
}
