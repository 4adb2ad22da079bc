//! Certificate and amendment records.

use crate::fingerprint::Fingerprint;
use crate::identity::Principal;
use crate::validate::{Currency, Level};
use serde::{Deserialize, Serialize};

/// Dense, monotonically assigned certificate id. The first id is 1.
pub type CertificateId = u64;

/// An issued credential record.
///
/// Only `score` and `expiry_date` change after mint, and only through an
/// amendment by the original issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,

    // ── Parties ──
    pub issuer: Principal,
    pub recipient: Principal,

    // ── Assessment ──
    pub test_type: String,
    pub score: u8,
    pub min_score: u8,
    pub max_score: u8,
    pub level: Level,

    // ── Provenance ──
    pub fingerprint: Fingerprint,
    pub issue_date: u64,
    pub expiry_date: u64,

    // ── Descriptive metadata ──
    pub issuer_name: String,
    pub recipient_name: String,
    pub location: String,
    pub currency: Currency,
    pub language: String,
    pub category: String,

    pub status: bool,
}

impl Certificate {
    /// Whether the certificate has passed its expiry at `height`.
    ///
    /// Expiry is never written back into `status`.
    pub fn is_expired_at(&self, height: u64) -> bool {
        height >= self.expiry_date
    }
}

/// The latest change applied to a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amendment {
    pub certificate_id: CertificateId,
    pub update_score: u8,
    pub update_expiry: u64,
    pub update_timestamp: u64,
    pub updater: Principal,
}
