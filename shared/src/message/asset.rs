use std::collections::BTreeSet;

use serde::Serialize;

use super::{address_set, NormalizedMessage};
use crate::proto::asset::{
    AssetFamily, AssetSource, MsgCreateGateway, MsgEditGateway, MsgEditToken,
    MsgIssueToken, MsgMintToken, MsgTransferGatewayOwner,
    MsgTransferTokenOwner,
};
use crate::registry::DocMsg;
use crate::token::{TokenSource, TokenUdInfo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgIssueToken {
    pub family: String,
    pub source: String,
    pub gateway: String,
    pub symbol: String,
    pub canonical_symbol: String,
    pub name: String,
    pub decimal: u32,
    pub min_unit_alias: String,
    pub initial_supply: u64,
    pub max_supply: u64,
    pub mintable: bool,
    pub owner: String,
    pub ud_info: TokenUdInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgEditToken {
    pub token_id: String,
    pub owner: String,
    pub canonical_symbol: String,
    pub min_unit_alias: String,
    pub max_supply: u64,
    pub mintable: String,
    pub name: String,
    pub ud_info: TokenUdInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgMintToken {
    pub token_id: String,
    pub owner: String,
    pub to: String,
    pub amount: u64,
    pub ud_info: TokenUdInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgTransferTokenOwner {
    pub src_owner: String,
    pub dst_owner: String,
    pub token_id: String,
    pub ud_info: TokenUdInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgCreateGateway {
    pub owner: String,
    pub moniker: String,
    pub identity: String,
    pub details: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgEditGateway {
    pub owner: String,
    pub moniker: String,
    pub identity: String,
    pub details: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMsgTransferGatewayOwner {
    pub owner: String,
    pub moniker: String,
    pub to: String,
}

fn family_name(family: i32) -> String {
    match AssetFamily::try_from(family) {
        Ok(AssetFamily::Fungible) => "fungible".to_owned(),
        Ok(AssetFamily::NonFungible) => "non_fungible".to_owned(),
        Err(_) => {
            tracing::warn!(family, "Unknown asset family");
            String::new()
        }
    }
}

fn token_source(source: i32) -> Option<TokenSource> {
    match AssetSource::try_from(source) {
        Ok(AssetSource::Native) => Some(TokenSource::Native),
        Ok(AssetSource::External) => Some(TokenSource::External),
        Ok(AssetSource::Gateway) => Some(TokenSource::Gateway),
        Err(_) => {
            tracing::warn!(source, "Unknown asset source");
            None
        }
    }
}

impl DocMsg for MsgIssueToken {
    const TYPE_URL: &'static str = "/irishub.asset.MsgIssueToken";

    fn build_document(&self) -> NormalizedMessage {
        let source = token_source(self.source)
            .map(|source| source.to_string())
            .unwrap_or_default();

        NormalizedMessage::IssueToken(DocMsgIssueToken {
            family: family_name(self.family),
            source: source.clone(),
            gateway: self.gateway.clone(),
            symbol: self.symbol.clone(),
            canonical_symbol: self.canonical_symbol.clone(),
            name: self.name.clone(),
            decimal: self.decimal,
            min_unit_alias: self.min_unit_alias.clone(),
            initial_supply: self.initial_supply,
            max_supply: self.max_supply,
            mintable: self.mintable,
            owner: self.owner.clone(),
            ud_info: TokenUdInfo {
                source,
                gateway: self.gateway.clone(),
                symbol: self.symbol.clone(),
            },
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

impl DocMsg for MsgEditToken {
    const TYPE_URL: &'static str = "/irishub.asset.MsgEditToken";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::EditToken(DocMsgEditToken {
            token_id: self.token_id.clone(),
            owner: self.owner.clone(),
            canonical_symbol: self.canonical_symbol.clone(),
            min_unit_alias: self.min_unit_alias.clone(),
            max_supply: self.max_supply,
            mintable: self.mintable.clone(),
            name: self.name.clone(),
            ud_info: TokenUdInfo::from_token_id(&self.token_id),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

impl DocMsg for MsgMintToken {
    const TYPE_URL: &'static str = "/irishub.asset.MsgMintToken";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::MintToken(DocMsgMintToken {
            token_id: self.token_id.clone(),
            owner: self.owner.clone(),
            to: self.to.clone(),
            amount: self.amount,
            ud_info: TokenUdInfo::from_token_id(&self.token_id),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str(), self.to.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

impl DocMsg for MsgTransferTokenOwner {
    const TYPE_URL: &'static str = "/irishub.asset.MsgTransferTokenOwner";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::TransferTokenOwner(DocMsgTransferTokenOwner {
            src_owner: self.src_owner.clone(),
            dst_owner: self.dst_owner.clone(),
            token_id: self.token_id.clone(),
            ud_info: TokenUdInfo::from_token_id(&self.token_id),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.src_owner.as_str(), self.dst_owner.as_str()])
    }

    fn signer(&self) -> String {
        self.src_owner.clone()
    }
}

impl DocMsg for MsgCreateGateway {
    const TYPE_URL: &'static str = "/irishub.asset.MsgCreateGateway";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::CreateGateway(DocMsgCreateGateway {
            owner: self.owner.clone(),
            moniker: self.moniker.clone(),
            identity: self.identity.clone(),
            details: self.details.clone(),
            website: self.website.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

impl DocMsg for MsgEditGateway {
    const TYPE_URL: &'static str = "/irishub.asset.MsgEditGateway";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::EditGateway(DocMsgEditGateway {
            owner: self.owner.clone(),
            moniker: self.moniker.clone(),
            identity: self.identity.clone(),
            details: self.details.clone(),
            website: self.website.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

impl DocMsg for MsgTransferGatewayOwner {
    const TYPE_URL: &'static str = "/irishub.asset.MsgTransferGatewayOwner";

    fn build_document(&self) -> NormalizedMessage {
        NormalizedMessage::TransferGatewayOwner(DocMsgTransferGatewayOwner {
            owner: self.owner.clone(),
            moniker: self.moniker.clone(),
            to: self.to.clone(),
        })
    }

    fn extract_addresses(&self) -> BTreeSet<String> {
        address_set([self.owner.as_str(), self.to.as_str()])
    }

    fn signer(&self) -> String {
        self.owner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_token_takes_ud_info_from_its_own_fields() {
        let msg = MsgIssueToken {
            family: AssetFamily::Fungible as i32,
            source: AssetSource::Gateway as i32,
            gateway: "cats".to_owned(),
            symbol: "kitty".to_owned(),
            owner: "iaa1owner".to_owned(),
            ..Default::default()
        };

        let NormalizedMessage::IssueToken(doc) = msg.build_document() else {
            panic!("expected an issue token document");
        };
        assert_eq!(doc.family, "fungible");
        assert_eq!(
            doc.ud_info,
            TokenUdInfo::new(TokenSource::Gateway, "cats", "kitty")
        );
    }

    #[test]
    fn mint_token_derives_ud_info_from_token_id() {
        let msg = MsgMintToken {
            token_id: "x.btc".to_owned(),
            owner: "iaa1owner".to_owned(),
            to: "iaa1to".to_owned(),
            amount: 10,
        };

        let NormalizedMessage::MintToken(doc) = msg.build_document() else {
            panic!("expected a mint token document");
        };
        assert_eq!(doc.ud_info, TokenUdInfo::new(TokenSource::External, "", "btc"));
        assert_eq!(msg.extract_addresses().len(), 2);
    }

    #[test]
    fn malformed_token_id_is_not_fatal() {
        let msg = MsgTransferTokenOwner {
            src_owner: "iaa1src".to_owned(),
            dst_owner: "iaa1dst".to_owned(),
            token_id: "a.b.c".to_owned(),
        };

        let NormalizedMessage::TransferTokenOwner(doc) = msg.build_document()
        else {
            panic!("expected a transfer token owner document");
        };
        assert_eq!(doc.ud_info, TokenUdInfo::default());
        assert_eq!(doc.token_id, "a.b.c");
    }
}
