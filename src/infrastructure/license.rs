use crate::domain::{LicenseError, LicenseVerifier};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

pub const GUMROAD_VERIFY_URL: &str = "https://api.gumroad.com/v2/licenses/verify";

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

/// Gumroad license verification API.
pub struct GumroadVerifier {
    client: Client,
    url: String,
    increment_uses_count: bool,
}

impl GumroadVerifier {
    pub fn new(increment_uses_count: bool) -> Result<Self, LicenseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("dailyreset-cli")
            .build()
            .map_err(|e| LicenseError::Verification(e.to_string()))?;

        Ok(Self {
            client,
            url: GUMROAD_VERIFY_URL.to_string(),
            increment_uses_count,
        })
    }
}

impl LicenseVerifier for GumroadVerifier {
    fn verify(&self, product_id: &str, license_key: &str) -> Result<bool, LicenseError> {
        let increment = if self.increment_uses_count {
            "true"
        } else {
            "false"
        };
        let form = [
            ("product_id", product_id),
            ("license_key", license_key),
            ("increment_uses_count", increment),
        ];

        log::debug!("Verifying license key with {}", self.url);
        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .map_err(|e| LicenseError::Verification(e.to_string()))?;

        let status = response.status();
        // Gumroad answers unknown keys with 404 and a JSON body
        let body: VerifyResponse = response
            .json()
            .map_err(|e| LicenseError::Verification(format!("{} ({})", e, status)))?;

        if !body.success {
            if let Some(message) = body.message {
                log::info!("License service said: {}", message);
            }
        }

        Ok(body.success)
    }
}
