use std::collections::BTreeSet;

use serde::Serialize;

use super::{address_set, NormalizedMessage};
use crate::coin::Coin;
use crate::proto::bank::{MsgMultiSend, MsgSend};
use crate::registry::DocMsg;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocAccountCoins {
    pub address: String,
    pub coins: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgMultiSend {
    pub inputs: Vec<DocAccountCoins>,
    pub outputs: Vec<DocAccountCoins>,
}

impl DocMsg for MsgSend {
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::Transfer(DocMsgSend {
            from_address: self.from_address.clone(),
            to_address: self.to_address.clone(),
            amount: Coin::from_proto_list(&self.amount),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.from_address.as_str(), self.to_address.as_str()])
    }

    fn signer(&self) -> String {
        self.from_address.clone()
    }
}

impl DocMsg for MsgMultiSend {
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgMultiSend";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::MultiSend(DocMsgMultiSend {
            inputs: self
                .inputs
                .iter()
                .map(|input| DocAccountCoins {
                    address: input.address.clone(),
                    coins: Coin::from_proto_list(&input.coins),
                })
                .collect(),
            outputs: self
                .outputs
                .iter()
                .map(|output| DocAccountCoins {
                    address: output.address.clone(),
                    coins: Coin::from_proto_list(&output.coins),
                })
                .collect(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set(
            self.inputs
                .iter()
                .map(|input| input.address.as_str())
                .chain(self.outputs.iter().map(|output| output.address.as_str())),
        )
    }

    fn signer(&self) -> String {
        self.inputs
            .first()
            .map(|input| input.address.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::bank::{Input, Output};
    use crate::proto::base::Coin as ProtoCoin;

    fn coin(amount: &str) -> ProtoCoin {
        ProtoCoin {
            denom: "uiris".to_owned(),
            amount: amount.to_owned(),
        }
    }

    #[test]
    fn send_document_and_addresses() {
        let msg = MsgSend {
            from_address: "iaa1from".to_owned(),
            to_address: "iaa1to".to_owned(),
            amount: vec![coin("100")],
        };

        let NormalizedMessage::Transfer(doc) = msg.build_document() else {
            panic!("expected a transfer document");
        };
        assert_eq!(doc.amount, vec![Coin::new("uiris", "100")]);
        assert_eq!(
            msg.extract_addresses().into_iter().collect::<Vec<_>>(),
            vec!["iaa1from", "iaa1to"]
        );
        assert_eq!(msg.signer(), "iaa1from");
    }

    #[test]
    fn multisend_collects_every_party_once() {
        let msg = MsgMultiSend {
            inputs: vec![Input {
                address: "iaa1a".to_owned(),
                coins: vec![coin("2")],
            }],
            outputs: vec![
                Output {
                    address: "iaa1b".to_owned(),
                    coins: vec![coin("1")],
                },
                Output {
                    address: "iaa1a".to_owned(),
                    coins: vec![coin("1")],
                },
            ],
        };

        assert_eq!(msg.extract_addresses().len(), 2);
        assert_eq!(msg.signer(), "iaa1a");
    }
}
