//! Error taxonomy for registry operations.
//!
//! Every rejected operation maps to exactly one `RegistryError` variant.
//! Variants carry no payload beyond what the caller needs to diagnose the
//! failure; the numeric `code()` is stable across releases.

use crate::fee::FeeTransferError;

/// Why a registry operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid recipient")]
    InvalidRecipient,

    #[error("invalid test type")]
    InvalidTestType,

    #[error("invalid score")]
    InvalidScore,

    #[error("invalid fingerprint")]
    InvalidFingerprint,

    #[error("invalid expiry")]
    InvalidExpiry,

    #[error("invalid level")]
    InvalidLevel,

    #[error("invalid issuer name")]
    InvalidIssuerName,

    #[error("invalid recipient name")]
    InvalidRecipientName,

    #[error("invalid location")]
    InvalidLocation,

    #[error("invalid currency")]
    InvalidCurrency,

    #[error("invalid min score")]
    InvalidMinScore,

    #[error("invalid max score")]
    InvalidMaxScore,

    #[error("invalid language")]
    InvalidLanguage,

    #[error("invalid category")]
    InvalidCategory,

    #[error("certificate capacity exceeded")]
    CapacityExceeded,

    #[error("authority not verified")]
    AuthorityNotVerified,

    #[error("not authorized")]
    NotAuthorized,

    #[error("certificate already exists")]
    AlreadyExists,

    #[error("certificate not found")]
    NotFound,

    #[error("authority already configured")]
    AlreadyConfigured,

    #[error("negative fee")]
    NegativeFee,

    #[error("invalid authority identity")]
    InvalidAuthorityIdentity,

    #[error("fee transfer failed: {0}")]
    FeeTransferFailed(#[from] FeeTransferError),
}

impl RegistryError {
    /// Stable numeric code for wire/CLI surfaces.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidRecipient => 401,
            Self::InvalidTestType => 402,
            Self::InvalidScore => 403,
            Self::InvalidFingerprint => 404,
            Self::InvalidExpiry => 405,
            Self::InvalidLevel => 406,
            Self::InvalidIssuerName => 407,
            Self::InvalidRecipientName => 408,
            Self::InvalidLocation => 409,
            Self::InvalidCurrency => 410,
            Self::AlreadyConfigured => 411,
            Self::NotAuthorized => 412,
            Self::NegativeFee => 413,
            Self::InvalidMinScore => 414,
            Self::InvalidMaxScore => 415,
            Self::InvalidAuthorityIdentity => 416,
            Self::CapacityExceeded => 417,
            Self::AuthorityNotVerified => 418,
            Self::NotFound => 419,
            Self::AlreadyExists => 420,
            Self::InvalidLanguage => 422,
            Self::InvalidCategory => 423,
            Self::FeeTransferFailed(_) => 424,
        }
    }

    /// Kebab-case kind name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRecipient => "invalid-recipient",
            Self::InvalidTestType => "invalid-test-type",
            Self::InvalidScore => "invalid-score",
            Self::InvalidFingerprint => "invalid-fingerprint",
            Self::InvalidExpiry => "invalid-expiry",
            Self::InvalidLevel => "invalid-level",
            Self::InvalidIssuerName => "invalid-issuer-name",
            Self::InvalidRecipientName => "invalid-recipient-name",
            Self::InvalidLocation => "invalid-location",
            Self::InvalidCurrency => "invalid-currency",
            Self::InvalidMinScore => "invalid-min-score",
            Self::InvalidMaxScore => "invalid-max-score",
            Self::InvalidLanguage => "invalid-language",
            Self::InvalidCategory => "invalid-category",
            Self::CapacityExceeded => "capacity-exceeded",
            Self::AuthorityNotVerified => "authority-not-verified",
            Self::NotAuthorized => "not-authorized",
            Self::AlreadyExists => "already-exists",
            Self::NotFound => "not-found",
            Self::AlreadyConfigured => "already-configured",
            Self::NegativeFee => "negative-fee",
            Self::InvalidAuthorityIdentity => "invalid-authority-identity",
            Self::FeeTransferFailed(_) => "fee-transfer-failed",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn all_kinds() -> Vec<RegistryError> {
        vec![
            RegistryError::InvalidRecipient,
            RegistryError::InvalidTestType,
            RegistryError::InvalidScore,
            RegistryError::InvalidFingerprint,
            RegistryError::InvalidExpiry,
            RegistryError::InvalidLevel,
            RegistryError::InvalidIssuerName,
            RegistryError::InvalidRecipientName,
            RegistryError::InvalidLocation,
            RegistryError::InvalidCurrency,
            RegistryError::InvalidMinScore,
            RegistryError::InvalidMaxScore,
            RegistryError::InvalidLanguage,
            RegistryError::InvalidCategory,
            RegistryError::CapacityExceeded,
            RegistryError::AuthorityNotVerified,
            RegistryError::NotAuthorized,
            RegistryError::AlreadyExists,
            RegistryError::NotFound,
            RegistryError::AlreadyConfigured,
            RegistryError::NegativeFee,
            RegistryError::InvalidAuthorityIdentity,
            RegistryError::FeeTransferFailed(FeeTransferError::InsufficientBalance {
                required: 1,
                available: 0,
            }),
        ]
    }

    #[test]
    fn codes_and_kinds_are_unique() {
        let kinds = all_kinds();
        let codes: BTreeSet<u32> = kinds.iter().map(RegistryError::code).collect();
        let names: BTreeSet<&str> = kinds.iter().map(RegistryError::kind).collect();
        assert_eq!(codes.len(), kinds.len());
        assert_eq!(names.len(), kinds.len());
    }

    #[test]
    fn fee_failure_display_includes_cause() {
        let err = RegistryError::from(FeeTransferError::InsufficientBalance {
            required: 500,
            available: 20,
        });
        insta::assert_snapshot!(
            err.to_string(),
            @"fee transfer failed: insufficient balance: required 500, available 20"
        );
    }
}
