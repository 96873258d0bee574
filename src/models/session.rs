use serde::{Deserialize, Serialize};

/// Sesión del wallet persistida en localStorage
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: String,
    pub connected: bool,
}

impl WalletSession {
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connected: true,
        }
    }

    /// `0x1234...abcd` para el header
    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }
}

/// Primeros 6 y últimos 4 caracteres; direcciones cortas se devuelven tal cual
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        let session = WalletSession::connected("0x2b1eb2Ca46eB3c792A409D7EEa47E6883b6B62Eb");
        assert_eq!(session.short_address(), "0x2b1e...62Eb");
    }

    #[test]
    fn tiny_addresses_are_not_mangled() {
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }
}
