use std::collections::BTreeSet;

use serde::Serialize;

use super::{address_set, NormalizedMessage};
use crate::proto::nft::{
    MsgBurnNft, MsgEditNft, MsgIssueDenom, MsgMintNft, MsgTransferNft,
};
use crate::registry::DocMsg;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgIssueDenom {
    pub id: String,
    pub name: String,
    pub schema: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgMintNft {
    pub id: String,
    pub denom: String,
    pub name: String,
    pub uri: String,
    pub data: String,
    pub sender: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgEditNft {
    pub id: String,
    pub denom: String,
    pub name: String,
    pub uri: String,
    pub data: String,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgTransferNft {
    pub id: String,
    pub denom: String,
    pub name: String,
    pub uri: String,
    pub data: String,
    pub sender: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgBurnNft {
    pub id: String,
    pub denom: String,
    pub sender: String,
}

impl DocMsg for MsgIssueDenom {
    const TYPE_URL: &'static str = "/irismod.nft.MsgIssueDenom";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::IssueDenom(DocMsgIssueDenom {
            id: self.id.to_lowercase(),
            name: self.name.clone(),
            schema: self.schema.clone(),
            sender: self.sender.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

impl DocMsg for MsgMintNft {
    const TYPE_URL: &'static str = "/irismod.nft.MsgMintNFT";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::MintNft(DocMsgMintNft {
            id: self.id.to_lowercase(),
            denom: self.denom_id.to_lowercase(),
            name: self.name.clone(),
            uri: self.uri.clone(),
            data: self.data.clone(),
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str(), self.recipient.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

impl DocMsg for MsgEditNft {
    const TYPE_URL: &'static str = "/irismod.nft.MsgEditNFT";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::EditNft(DocMsgEditNft {
            id: self.id.to_lowercase(),
            denom: self.denom_id.to_lowercase(),
            name: self.name.clone(),
            uri: self.uri.clone(),
            data: self.data.clone(),
            sender: self.sender.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

impl DocMsg for MsgTransferNft {
    const TYPE_URL: &'static str = "/irismod.nft.MsgTransferNFT";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::TransferNft(DocMsgTransferNft {
            id: self.id.to_lowercase(),
            denom: self.denom_id.to_lowercase(),
            name: self.name.clone(),
            uri: self.uri.clone(),
            data: self.data.clone(),
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str(), self.recipient.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

impl DocMsg for MsgBurnNft {
    const TYPE_URL: &'static str = "/irismod.nft.MsgBurnNFT";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::BurnNft(DocMsgBurnNft {
            id: self.id.to_lowercase(),
            denom: self.denom_id.to_lowercase(),
            sender: self.sender.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.sender.as_str()])
    }

    fn signer(&self) -> String {
        self.sender.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_nft_lowercases_identifiers() {
        let msg = MsgTransferNft {
            id: "Kitty01".to_owned(),
            denom_id: "CATS".to_owned(),
            name: "Kitty".to_owned(),
            sender: "iaa1sender".to_owned(),
            recipient: "iaa1recipient".to_owned(),
            ..Default::default()
        };

        let NormalizedMessage::TransferNft(doc) = msg.build_document() else {
            panic!("expected a transfer nft document");
        };
        assert_eq!(doc.id, "kitty01");
        assert_eq!(doc.denom, "cats");
        assert_eq!(doc.name, "Kitty");
        assert_eq!(
            msg.extract_addresses().into_iter().collect::<Vec<_>>(),
            vec!["iaa1recipient", "iaa1sender"]
        );
    }
}
