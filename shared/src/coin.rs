use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::proto::base::Coin as ProtoCoin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    /// Coin with a validated decimal amount. An amount that does not parse
    /// is recorded as zero.
    pub fn new(denom: &str, amount: &str) -> Self {
        let amount = amount.trim();
        let amount = match BigDecimal::from_str(amount) {
            Ok(_) => amount.to_owned(),
            Err(reason) => {
                tracing::error!(
                    denom,
                    amount,
                    %reason,
                    "Failed to parse coin amount"
                );
                "0".to_owned()
            }
        };

        Self {
            denom: denom.to_owned(),
            amount,
        }
    }

    pub fn from_proto_list(coins: &[ProtoCoin]) -> Vec<Self> {
        coins.iter().map(Self::from).collect()
    }
}

impl From<&ProtoCoin> for Coin {
    fn from(value: &ProtoCoin) -> Self {
        Coin::new(&value.denom, &value.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_amounts() {
        assert_eq!(Coin::new("uiris", " 1500 ").amount, "1500");
        assert_eq!(Coin::new("uiris", "0.25").amount, "0.25");
    }

    #[test]
    fn unparsable_amount_degrades_to_zero() {
        let coin = Coin::new("uiris", "12abc");
        assert_eq!(coin.denom, "uiris");
        assert_eq!(coin.amount, "0");
    }
}
