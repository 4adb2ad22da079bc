//! Field validation for mint and update requests.
//!
//! Each rule is a pure predicate over one field. `validate_mint_request`
//! evaluates them in a fixed order and reports the first failure, so the
//! same bad request always yields the same error kind.

use crate::error::{RegistryError, RegistryResult};
use crate::fingerprint::Fingerprint;
use crate::identity::Principal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_TEST_TYPE_LEN: usize = 20;
pub const MAX_ISSUER_NAME_LEN: usize = 50;
pub const MAX_RECIPIENT_NAME_LEN: usize = 100;
pub const MAX_LOCATION_LEN: usize = 50;
pub const MAX_LANGUAGE_LEN: usize = 20;
pub const MAX_CATEGORY_LEN: usize = 30;
pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// Proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl FromStr for Level {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(RegistryError::InvalidLevel),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Currency the assessment fee was denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Stx,
    Usd,
    Btc,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Stx => "STX",
            Currency::Usd => "USD",
            Currency::Btc => "BTC",
        }
    }
}

impl FromStr for Currency {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STX" => Ok(Currency::Stx),
            "USD" => Ok(Currency::Usd),
            "BTC" => Ok(Currency::Btc),
            _ => Err(RegistryError::InvalidCurrency),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller-supplied fields of a mint, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintRequest {
    pub recipient: Principal,
    pub test_type: String,
    pub score: i64,
    pub fingerprint: Vec<u8>,
    pub expiry_date: u64,
    pub level: String,
    pub issuer_name: String,
    pub recipient_name: String,
    pub location: String,
    pub currency: String,
    pub min_score: i64,
    pub max_score: i64,
    pub language: String,
    pub category: String,
}

/// A mint request whose every field passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMint {
    pub recipient: Principal,
    pub test_type: String,
    pub score: u8,
    pub fingerprint: Fingerprint,
    pub expiry_date: u64,
    pub level: Level,
    pub issuer_name: String,
    pub recipient_name: String,
    pub location: String,
    pub currency: Currency,
    pub min_score: u8,
    pub max_score: u8,
    pub language: String,
    pub category: String,
}

pub fn check_recipient(recipient: &Principal) -> RegistryResult<()> {
    if recipient.is_null() {
        return Err(RegistryError::InvalidRecipient);
    }
    Ok(())
}

pub fn check_test_type(value: &str) -> RegistryResult<()> {
    bounded_text(value, MAX_TEST_TYPE_LEN, RegistryError::InvalidTestType)
}

pub fn check_score(score: i64) -> RegistryResult<u8> {
    percent(score, RegistryError::InvalidScore)
}

pub fn check_fingerprint(bytes: &[u8]) -> RegistryResult<Fingerprint> {
    Fingerprint::try_from(bytes)
}

/// Expiry must lie strictly after the current height.
pub fn check_expiry(expiry: u64, height: u64) -> RegistryResult<()> {
    if expiry <= height {
        return Err(RegistryError::InvalidExpiry);
    }
    Ok(())
}

pub fn check_level(value: &str) -> RegistryResult<Level> {
    value.parse()
}

pub fn check_issuer_name(value: &str) -> RegistryResult<()> {
    bounded_text(value, MAX_ISSUER_NAME_LEN, RegistryError::InvalidIssuerName)
}

pub fn check_recipient_name(value: &str) -> RegistryResult<()> {
    bounded_text(
        value,
        MAX_RECIPIENT_NAME_LEN,
        RegistryError::InvalidRecipientName,
    )
}

pub fn check_location(value: &str) -> RegistryResult<()> {
    bounded_text(value, MAX_LOCATION_LEN, RegistryError::InvalidLocation)
}

pub fn check_currency(value: &str) -> RegistryResult<Currency> {
    value.parse()
}

pub fn check_min_score(score: i64) -> RegistryResult<u8> {
    percent(score, RegistryError::InvalidMinScore)
}

pub fn check_max_score(score: i64) -> RegistryResult<u8> {
    percent(score, RegistryError::InvalidMaxScore)
}

pub fn check_language(value: &str) -> RegistryResult<()> {
    bounded_text(value, MAX_LANGUAGE_LEN, RegistryError::InvalidLanguage)
}

pub fn check_category(value: &str) -> RegistryResult<()> {
    bounded_text(value, MAX_CATEGORY_LEN, RegistryError::InvalidCategory)
}

/// Run every field rule in declaration order, stopping at the first failure.
///
/// `min_score` and `max_score` are checked independently; no ordering
/// between them, and no band check on `score`, is enforced.
pub fn validate_mint_request(request: &MintRequest, height: u64) -> RegistryResult<ValidatedMint> {
    check_recipient(&request.recipient)?;
    check_test_type(&request.test_type)?;
    let score = check_score(request.score)?;
    let fingerprint = check_fingerprint(&request.fingerprint)?;
    check_expiry(request.expiry_date, height)?;
    let level = check_level(&request.level)?;
    check_issuer_name(&request.issuer_name)?;
    check_recipient_name(&request.recipient_name)?;
    check_location(&request.location)?;
    let currency = check_currency(&request.currency)?;
    let min_score = check_min_score(request.min_score)?;
    let max_score = check_max_score(request.max_score)?;
    check_language(&request.language)?;
    check_category(&request.category)?;

    Ok(ValidatedMint {
        recipient: request.recipient.clone(),
        test_type: request.test_type.clone(),
        score,
        fingerprint,
        expiry_date: request.expiry_date,
        level,
        issuer_name: request.issuer_name.clone(),
        recipient_name: request.recipient_name.clone(),
        location: request.location.clone(),
        currency,
        min_score,
        max_score,
        language: request.language.clone(),
        category: request.category.clone(),
    })
}

fn bounded_text(value: &str, max_chars: usize, err: RegistryError) -> RegistryResult<()> {
    let len = value.chars().count();
    if len == 0 || len > max_chars {
        return Err(err);
    }
    Ok(())
}

fn percent(value: i64, err: RegistryError) -> RegistryResult<u8> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return Err(err);
    }
    u8::try_from(value).map_err(|_| err)
}
