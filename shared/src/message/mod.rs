pub mod asset;
pub mod bank;
pub mod ibc;
pub mod nft;
pub mod service;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::coin::Coin;

/// Normalized document of one transaction message. Serialized as
/// `{"type": <msg type>, "msg": <document>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "msg")]
pub enum NormalizedMessage {
    #[serde(rename = "transfer")]
    Transfer(bank::DocMsgSend),
    #[serde(rename = "multisend")]
    MultiSend(bank::DocMsgMultiSend),
    #[serde(rename = "issue_token")]
    IssueToken(asset::DocMsgIssueToken),
    #[serde(rename = "edit_token")]
    EditToken(asset::DocMsgEditToken),
    #[serde(rename = "mint_token")]
    MintToken(asset::DocMsgMintToken),
    #[serde(rename = "transfer_token_owner")]
    TransferTokenOwner(asset::DocMsgTransferTokenOwner),
    #[serde(rename = "create_gateway")]
    CreateGateway(asset::DocMsgCreateGateway),
    #[serde(rename = "edit_gateway")]
    EditGateway(asset::DocMsgEditGateway),
    #[serde(rename = "transfer_gateway_owner")]
    TransferGatewayOwner(asset::DocMsgTransferGatewayOwner),
    #[serde(rename = "issue_denom")]
    IssueDenom(nft::DocMsgIssueDenom),
    #[serde(rename = "mint_nft")]
    MintNft(nft::DocMsgMintNft),
    #[serde(rename = "edit_nft")]
    EditNft(nft::DocMsgEditNft),
    #[serde(rename = "transfer_nft")]
    TransferNft(nft::DocMsgTransferNft),
    #[serde(rename = "burn_nft")]
    BurnNft(nft::DocMsgBurnNft),
    #[serde(rename = "kill_request_context")]
    KillRequestContext(service::DocMsgRequestContext),
    #[serde(rename = "pause_request_context")]
    PauseRequestContext(service::DocMsgRequestContext),
    #[serde(rename = "start_request_context")]
    StartRequestContext(service::DocMsgRequestContext),
    #[serde(rename = "recv_packet")]
    RecvPacket(ibc::DocMsgRecvPacket),
    #[serde(rename = "ibc_transfer")]
    IbcTransfer(ibc::DocMsgIbcTransfer),
}

/// Value movement carried by a message, promoted to the transaction
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferSummary {
    pub from: String,
    pub to: String,
    pub amount: Vec<Coin>,
}

impl NormalizedMessage {
    pub fn msg_type(&self) -> &'static str {
        match self {
            Self::Transfer(_) => "transfer",
            Self::MultiSend(_) => "multisend",
            Self::IssueToken(_) => "issue_token",
            Self::EditToken(_) => "edit_token",
            Self::MintToken(_) => "mint_token",
            Self::TransferTokenOwner(_) => "transfer_token_owner",
            Self::CreateGateway(_) => "create_gateway",
            Self::EditGateway(_) => "edit_gateway",
            Self::TransferGatewayOwner(_) => "transfer_gateway_owner",
            Self::IssueDenom(_) => "issue_denom",
            Self::MintNft(_) => "mint_nft",
            Self::EditNft(_) => "edit_nft",
            Self::TransferNft(_) => "transfer_nft",
            Self::BurnNft(_) => "burn_nft",
            Self::KillRequestContext(_) => "kill_request_context",
            Self::PauseRequestContext(_) => "pause_request_context",
            Self::StartRequestContext(_) => "start_request_context",
            Self::RecvPacket(_) => "recv_packet",
            Self::IbcTransfer(_) => "ibc_transfer",
        }
    }

    pub fn transfer_summary(&self) -> Option<TransferSummary> {
        match self {
            Self::Transfer(msg) => Some(TransferSummary {
                from: msg.from_address.clone(),
                to: msg.to_address.clone(),
                amount: msg.amount.clone(),
            }),
            Self::IbcTransfer(msg) => Some(TransferSummary {
                from: msg.sender.clone(),
                to: msg.receiver.clone(),
                amount: msg.token.iter().cloned().collect(),
            }),
            Self::RecvPacket(msg) => {
                msg.packet.fungible_token_data().map(|data| TransferSummary {
                    from: data.sender.clone(),
                    to: data.receiver.clone(),
                    amount: vec![Coin::new(&data.denom, &data.amount)],
                })
            }
            _ => None,
        }
    }

    pub fn received_packet(&self) -> Option<&ibc::DocPacket> {
        match self {
            Self::RecvPacket(msg) => Some(&msg.packet),
            _ => None,
        }
    }
}

/// Sorted address set without empty entries.
pub(crate) fn address_set<'a>(
    addresses: impl IntoIterator<Item = &'a str>,
) -> BTreeSet<String> {
    addresses
        .into_iter()
        .filter(|address| !address.is_empty())
        .map(str::to_owned)
        .collect()
}
