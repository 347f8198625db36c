use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum JournalError {
    #[error("Entry '{0}' not found")]
    EntryNotFound(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    #[error("Missing Gumroad product id. Set GUMROAD_PRODUCT_ID or 'dr config product-id'.")]
    MissingProductId,

    #[error("Enter a valid Gumroad license key.")]
    InvalidKeyFormat,

    #[error("That license key is not valid.")]
    Rejected,

    #[error("Verification failed. {0}")]
    Verification(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AudioError {
    #[error("Track '{0}' not found")]
    TrackNotFound(String),

    #[error("Track '{0}' is not stored on this device")]
    NotStored(String),

    #[error("Invalid audio data URL: {0}")]
    InvalidDataUrl(String),
}
