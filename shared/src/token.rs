use std::fmt::Display;

use serde::{Deserialize, Serialize};

const TOKEN_ID_SEPARATOR: char = '.';
const EXTERNAL_TOKEN_PREFIX: &str = "x";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    Native,
    External,
    Gateway,
}

impl Display for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::External => write!(f, "external"),
            Self::Gateway => write!(f, "gateway"),
        }
    }
}

/// Source, gateway and symbol of a token, as encoded in its global id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUdInfo {
    pub source: String,
    pub gateway: String,
    pub symbol: String,
}

impl TokenUdInfo {
    pub fn new(source: TokenSource, gateway: &str, symbol: &str) -> Self {
        Self {
            source: source.to_string(),
            gateway: gateway.to_owned(),
            symbol: symbol.to_owned(),
        }
    }

    /// Parses a global token id:
    /// - `[symbol]` for native tokens, e.g. `iris`
    /// - `x.[symbol]` for external tokens, e.g. `x.btc`
    /// - `[gateway].[symbol]` for gateway tokens, e.g. `cats.kitty`
    ///
    /// Any other shape yields empty fields.
    pub fn from_token_id(token_id: &str) -> Self {
        let segments: Vec<&str> = token_id.split(TOKEN_ID_SEPARATOR).collect();

        match segments.as_slice() {
            [symbol] => Self::new(TokenSource::Native, "", symbol),
            [prefix, symbol] if *prefix == EXTERNAL_TOKEN_PREFIX => {
                Self::new(TokenSource::External, "", symbol)
            }
            [gateway, symbol] => Self::new(TokenSource::Gateway, gateway, symbol),
            _ => {
                tracing::warn!(
                    token_id,
                    "Can't derive token source from token id"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_token_id() {
        assert_eq!(
            TokenUdInfo::from_token_id("iris"),
            TokenUdInfo {
                source: "native".to_owned(),
                gateway: "".to_owned(),
                symbol: "iris".to_owned(),
            }
        );
    }

    #[test]
    fn external_token_id() {
        assert_eq!(
            TokenUdInfo::from_token_id("x.btc"),
            TokenUdInfo {
                source: "external".to_owned(),
                gateway: "".to_owned(),
                symbol: "btc".to_owned(),
            }
        );
    }

    #[test]
    fn gateway_token_id() {
        assert_eq!(
            TokenUdInfo::from_token_id("cats.kitty"),
            TokenUdInfo {
                source: "gateway".to_owned(),
                gateway: "cats".to_owned(),
                symbol: "kitty".to_owned(),
            }
        );
    }

    #[test]
    fn malformed_token_id_yields_empty_fields() {
        assert_eq!(TokenUdInfo::from_token_id("a.b.c"), TokenUdInfo::default());
    }
}
