use super::error::LicenseError;
use super::session_token::SessionToken;

const MIN_KEY_LEN: usize = 10;

/// Third-party license check.
pub trait LicenseVerifier {
    /// Returns whether the licensing service accepts `license_key` for `product_id`.
    fn verify(&self, product_id: &str, license_key: &str) -> Result<bool, LicenseError>;
}

pub struct UnlockRequest<'a> {
    pub product_id: Option<&'a str>,
    pub license_key: &'a str,
    pub secret: &'a [u8],
    pub now: i64,
}

/// Validates the key, asks the verifier, and mints a session token on success.
pub fn unlock(
    verifier: &dyn LicenseVerifier,
    request: UnlockRequest<'_>,
) -> Result<SessionToken, LicenseError> {
    let product_id = request
        .product_id
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(LicenseError::MissingProductId)?;

    let key = request.license_key.trim();
    if key.chars().count() < MIN_KEY_LEN {
        return Err(LicenseError::InvalidKeyFormat);
    }

    if !verifier.verify(product_id, key)? {
        log::info!("License key rejected for product '{}'", product_id);
        return Err(LicenseError::Rejected);
    }

    Ok(SessionToken::mint(request.secret, product_id, key, request.now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FakeVerifier {
        answer: Result<bool, LicenseError>,
        calls: RefCell<Vec<(String, String)>>,
    }

    impl FakeVerifier {
        fn new(answer: Result<bool, LicenseError>) -> Self {
            Self {
                answer,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl LicenseVerifier for FakeVerifier {
        fn verify(&self, product_id: &str, license_key: &str) -> Result<bool, LicenseError> {
            self.calls
                .borrow_mut()
                .push((product_id.to_string(), license_key.to_string()));
            self.answer.clone()
        }
    }

    fn request<'a>(product_id: Option<&'a str>, key: &'a str) -> UnlockRequest<'a> {
        UnlockRequest {
            product_id,
            license_key: key,
            secret: b"secret",
            now: 1_000,
        }
    }

    #[test]
    fn test_valid_key_mints_token() {
        let verifier = FakeVerifier::new(Ok(true));
        let token = unlock(&verifier, request(Some("prod"), "  ABCD-1234-EFGH  ")).unwrap();

        assert!(token.verify(b"secret", "prod", "ABCD-1234-EFGH"));
        assert_eq!(token.issued_at(), 1_000);
        assert_eq!(
            verifier.calls.borrow()[0],
            ("prod".to_string(), "ABCD-1234-EFGH".to_string())
        );
    }

    #[test]
    fn test_missing_product_id() {
        let verifier = FakeVerifier::new(Ok(true));
        assert_eq!(
            unlock(&verifier, request(None, "ABCD-1234-EFGH")),
            Err(LicenseError::MissingProductId)
        );
        assert_eq!(
            unlock(&verifier, request(Some("  "), "ABCD-1234-EFGH")),
            Err(LicenseError::MissingProductId)
        );
        assert!(verifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_short_key_never_reaches_service() {
        let verifier = FakeVerifier::new(Ok(true));
        assert_eq!(
            unlock(&verifier, request(Some("prod"), "  short  ")),
            Err(LicenseError::InvalidKeyFormat)
        );
        assert!(verifier.calls.borrow().is_empty());
    }

    #[test]
    fn test_rejected_key() {
        let verifier = FakeVerifier::new(Ok(false));
        assert_eq!(
            unlock(&verifier, request(Some("prod"), "ABCD-1234-EFGH")),
            Err(LicenseError::Rejected)
        );
    }

    #[test]
    fn test_network_failure_is_surfaced() {
        let verifier = FakeVerifier::new(Err(LicenseError::Verification("timeout".to_string())));
        assert_eq!(
            unlock(&verifier, request(Some("prod"), "ABCD-1234-EFGH")),
            Err(LicenseError::Verification("timeout".to_string()))
        );
        assert_eq!(verifier.calls.borrow().len(), 1);
    }
}
