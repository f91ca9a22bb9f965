//! Tokens opacos (sesión y configuraciones compartidas)

use std::fmt::Write as _;

/// 32 bytes aleatorios en hexadecimal (64 caracteres)
pub fn random_hex_token() -> String {
    let bytes: [u8; 32] = rand::random();
    bytes.iter().fold(String::with_capacity(64), |mut token, b| {
        let _ = write!(token, "{:02x}", b);
        token
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_hex() {
        let a = random_hex_token();
        let b = random_hex_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
