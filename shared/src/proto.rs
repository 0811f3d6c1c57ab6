//! Protobuf wire types of the transactions and messages the indexer
//! understands.

pub use prost_types::Any;

pub mod tx {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TxRaw {
        #[prost(bytes = "vec", tag = "1")]
        pub body_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(bytes = "vec", tag = "2")]
        pub auth_info_bytes: ::prost::alloc::vec::Vec<u8>,
        #[prost(bytes = "vec", repeated, tag = "3")]
        pub signatures: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct TxBody {
        #[prost(message, repeated, tag = "1")]
        pub messages: ::prost::alloc::vec::Vec<::prost_types::Any>,
        #[prost(string, tag = "2")]
        pub memo: ::prost::alloc::string::String,
        #[prost(uint64, tag = "3")]
        pub timeout_height: u64,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuthInfo {
        #[prost(message, optional, tag = "2")]
        pub fee: ::core::option::Option<Fee>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Fee {
        #[prost(message, repeated, tag = "1")]
        pub amount: ::prost::alloc::vec::Vec<super::base::Coin>,
        #[prost(uint64, tag = "2")]
        pub gas_limit: u64,
        #[prost(string, tag = "3")]
        pub payer: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub granter: ::prost::alloc::string::String,
    }
}

pub mod base {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Coin {
        #[prost(string, tag = "1")]
        pub denom: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub amount: ::prost::alloc::string::String,
    }
}

pub mod bank {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgSend {
        #[prost(string, tag = "1")]
        pub from_address: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub to_address: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "3")]
        pub amount: ::prost::alloc::vec::Vec<super::base::Coin>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Input {
        #[prost(string, tag = "1")]
        pub address: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "2")]
        pub coins: ::prost::alloc::vec::Vec<super::base::Coin>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Output {
        #[prost(string, tag = "1")]
        pub address: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "2")]
        pub coins: ::prost::alloc::vec::Vec<super::base::Coin>,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgMultiSend {
        #[prost(message, repeated, tag = "1")]
        pub inputs: ::prost::alloc::vec::Vec<Input>,
        #[prost(message, repeated, tag = "2")]
        pub outputs: ::prost::alloc::vec::Vec<Output>,
    }
}

pub mod asset {
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum AssetFamily {
        Fungible = 0,
        NonFungible = 1,
    }
    #[derive(
        Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
    )]
    #[repr(i32)]
    pub enum AssetSource {
        Native = 0,
        External = 1,
        Gateway = 2,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgIssueToken {
        #[prost(enumeration = "AssetFamily", tag = "1")]
        pub family: i32,
        #[prost(enumeration = "AssetSource", tag = "2")]
        pub source: i32,
        #[prost(string, tag = "3")]
        pub gateway: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub symbol: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub canonical_symbol: ::prost::alloc::string::String,
        #[prost(string, tag = "6")]
        pub name: ::prost::alloc::string::String,
        #[prost(uint32, tag = "7")]
        pub decimal: u32,
        #[prost(string, tag = "8")]
        pub min_unit_alias: ::prost::alloc::string::String,
        #[prost(uint64, tag = "9")]
        pub initial_supply: u64,
        #[prost(uint64, tag = "10")]
        pub max_supply: u64,
        #[prost(bool, tag = "11")]
        pub mintable: bool,
        #[prost(string, tag = "12")]
        pub owner: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgEditToken {
        #[prost(string, tag = "1")]
        pub token_id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub owner: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub canonical_symbol: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub min_unit_alias: ::prost::alloc::string::String,
        #[prost(uint64, tag = "5")]
        pub max_supply: u64,
        /// "true", "false" or "nil" when unchanged.
        #[prost(string, tag = "6")]
        pub mintable: ::prost::alloc::string::String,
        #[prost(string, tag = "7")]
        pub name: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgMintToken {
        #[prost(string, tag = "1")]
        pub token_id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub owner: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub to: ::prost::alloc::string::String,
        #[prost(uint64, tag = "4")]
        pub amount: u64,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgTransferTokenOwner {
        #[prost(string, tag = "1")]
        pub src_owner: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub dst_owner: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub token_id: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgCreateGateway {
        #[prost(string, tag = "1")]
        pub owner: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub moniker: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub identity: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub details: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub website: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgEditGateway {
        #[prost(string, tag = "1")]
        pub owner: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub moniker: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub identity: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub details: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub website: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgTransferGatewayOwner {
        #[prost(string, tag = "1")]
        pub owner: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub moniker: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub to: ::prost::alloc::string::String,
    }
}

pub mod nft {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgIssueDenom {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub name: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub schema: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub sender: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgMintNft {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub denom_id: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub name: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub uri: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub data: ::prost::alloc::string::String,
        #[prost(string, tag = "6")]
        pub sender: ::prost::alloc::string::String,
        #[prost(string, tag = "7")]
        pub recipient: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgEditNft {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub denom_id: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub name: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub uri: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub data: ::prost::alloc::string::String,
        #[prost(string, tag = "6")]
        pub sender: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgTransferNft {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub denom_id: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub name: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub uri: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub data: ::prost::alloc::string::String,
        #[prost(string, tag = "6")]
        pub sender: ::prost::alloc::string::String,
        #[prost(string, tag = "7")]
        pub recipient: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgBurnNft {
        #[prost(string, tag = "1")]
        pub id: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub denom_id: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub sender: ::prost::alloc::string::String,
    }
}

pub mod service {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgKillRequestContext {
        #[prost(bytes = "vec", tag = "1")]
        pub request_context_id: ::prost::alloc::vec::Vec<u8>,
        #[prost(string, tag = "2")]
        pub consumer: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgPauseRequestContext {
        #[prost(bytes = "vec", tag = "1")]
        pub request_context_id: ::prost::alloc::vec::Vec<u8>,
        #[prost(string, tag = "2")]
        pub consumer: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgStartRequestContext {
        #[prost(bytes = "vec", tag = "1")]
        pub request_context_id: ::prost::alloc::vec::Vec<u8>,
        #[prost(string, tag = "2")]
        pub consumer: ::prost::alloc::string::String,
    }
}

pub mod ibc {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Height {
        #[prost(uint64, tag = "1")]
        pub revision_number: u64,
        #[prost(uint64, tag = "2")]
        pub revision_height: u64,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Packet {
        #[prost(uint64, tag = "1")]
        pub sequence: u64,
        #[prost(string, tag = "2")]
        pub source_port: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub source_channel: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub destination_port: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub destination_channel: ::prost::alloc::string::String,
        #[prost(bytes = "vec", tag = "6")]
        pub data: ::prost::alloc::vec::Vec<u8>,
        #[prost(message, optional, tag = "7")]
        pub timeout_height: ::core::option::Option<Height>,
        #[prost(uint64, tag = "8")]
        pub timeout_timestamp: u64,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgRecvPacket {
        #[prost(message, optional, tag = "1")]
        pub packet: ::core::option::Option<Packet>,
        #[prost(bytes = "vec", tag = "2")]
        pub proof_commitment: ::prost::alloc::vec::Vec<u8>,
        #[prost(message, optional, tag = "3")]
        pub proof_height: ::core::option::Option<Height>,
        #[prost(string, tag = "4")]
        pub signer: ::prost::alloc::string::String,
    }
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MsgTransfer {
        #[prost(string, tag = "1")]
        pub source_port: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub source_channel: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "3")]
        pub token: ::core::option::Option<super::base::Coin>,
        #[prost(string, tag = "4")]
        pub sender: ::prost::alloc::string::String,
        #[prost(string, tag = "5")]
        pub receiver: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "6")]
        pub timeout_height: ::core::option::Option<Height>,
        #[prost(uint64, tag = "7")]
        pub timeout_timestamp: u64,
    }
}
