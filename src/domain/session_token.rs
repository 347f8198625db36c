use hmac::{Hmac, Mac};
use regex::Regex;
use sha2::Sha256;
use std::fmt;
use std::sync::OnceLock;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_MAX_AGE_DAYS: u64 = 30;
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Session proof minted after a successful license check:
/// `hex(HMAC_SHA256(secret, "<product>:<key>")).<issued at ms>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    signature: String,
    issued_at: i64,
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9a-f]{64})\.(\d{1,16})$").expect("valid token regex"))
}

fn sign(secret: &[u8], product_id: &str, license_key: &str) -> String {
    // HMAC accepts keys of any length, including empty ones
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC takes any key length");
    mac.update(format!("{}:{}", product_id, license_key).as_bytes());
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

impl SessionToken {
    pub fn mint(secret: &[u8], product_id: &str, license_key: &str, issued_at: i64) -> Self {
        Self {
            signature: sign(secret, product_id, license_key),
            issued_at,
        }
    }

    /// Parses a stored token. Anything not shaped like a minted token is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = token_regex().captures(raw.trim())?;
        let issued_at = caps[2].parse().ok()?;
        Some(Self {
            signature: caps[1].to_string(),
            issued_at,
        })
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn expires_at(&self, max_age_days: u64) -> i64 {
        self.issued_at
            .saturating_add((max_age_days as i64).saturating_mul(MS_PER_DAY))
    }

    pub fn is_expired(&self, now: i64, max_age_days: u64) -> bool {
        now >= self.expires_at(max_age_days)
    }

    /// Checks the signature against a known product and license key.
    #[allow(dead_code)]
    pub fn verify(&self, secret: &[u8], product_id: &str, license_key: &str) -> bool {
        self.signature == sign(secret, product_id, license_key)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.signature, self.issued_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hmac_hex(key: &[u8], message: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(key).unwrap();
        mac.update(message);
        mac.finalize()
            .into_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    #[test]
    fn test_known_hmac_vector() {
        assert_eq!(
            hmac_hex(b"key", b"The quick brown fox jumps over the lazy dog"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_mint_signs_product_and_key() {
        let token = SessionToken::mint(b"secret", "prod-1", "LICENSE-KEY-1", 42);
        let expected = format!("{}.42", hmac_hex(b"secret", b"prod-1:LICENSE-KEY-1"));
        assert_eq!(token.to_string(), expected);
        assert_eq!(token.issued_at(), 42);
    }

    #[test]
    fn test_parse_round_trip() {
        let token = SessionToken::mint(b"secret", "prod", "ABCDEFGHIJ", 1_700_000_000_000);
        let parsed = SessionToken::parse(&token.to_string()).unwrap();
        assert_eq!(parsed, token);
        assert!(parsed.verify(b"secret", "prod", "ABCDEFGHIJ"));
        assert!(!parsed.verify(b"other", "prod", "ABCDEFGHIJ"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(SessionToken::parse("").is_none());
        assert!(SessionToken::parse("abc.123").is_none());
        assert!(SessionToken::parse(&format!("{}.", "a".repeat(64))).is_none());
        assert!(SessionToken::parse(&format!("{}.12x", "a".repeat(64))).is_none());
        assert!(SessionToken::parse(&format!("{}.12", "A".repeat(64))).is_none());
    }

    #[test]
    fn test_expiry() {
        let token = SessionToken::mint(b"s", "p", "k", 0);
        let thirty_days = 30 * MS_PER_DAY;
        assert!(!token.is_expired(thirty_days - 1, SESSION_MAX_AGE_DAYS));
        assert!(token.is_expired(thirty_days, SESSION_MAX_AGE_DAYS));
    }
}
