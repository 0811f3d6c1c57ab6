use prost::Message;
use shared::proto::base::Coin;
use shared::proto::tx::{AuthInfo, Fee, TxBody, TxRaw};
use shared::proto::Any;
use shared::registry::DocMsg;

pub fn pack<M: DocMsg>(msg: &M) -> Any {
    Any {
        type_url: M::TYPE_URL.to_owned(),
        value: msg.encode_to_vec(),
    }
}

/// Encodes protobuf transactions the way a wallet would broadcast them.
#[derive(Default)]
pub struct TxBuilder {
    messages: Vec<Any>,
    memo: String,
    fee: Option<Fee>,
}

impl TxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message<M: DocMsg>(mut self, msg: &M) -> Self {
        self.messages.push(pack(msg));
        self
    }

    pub fn raw_message(mut self, msg: Any) -> Self {
        self.messages.push(msg);
        self
    }

    pub fn memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_owned();
        self
    }

    pub fn fee(mut self, denom: &str, amount: &str, gas_limit: u64) -> Self {
        self.fee = Some(Fee {
            amount: vec![Coin {
                denom: denom.to_owned(),
                amount: amount.to_owned(),
            }],
            gas_limit,
            payer: String::new(),
            granter: String::new(),
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let body = TxBody {
            messages: self.messages,
            memo: self.memo,
            timeout_height: 0,
        };
        let auth_info = AuthInfo { fee: self.fee };

        TxRaw {
            body_bytes: body.encode_to_vec(),
            auth_info_bytes: auth_info.encode_to_vec(),
            signatures: vec![vec![0; 64]],
        }
        .encode_to_vec()
    }
}

/// Bytes no protobuf transaction decoder accepts.
pub fn malformed_tx() -> Vec<u8> {
    vec![0x0a, 0xff, 0x01]
}
