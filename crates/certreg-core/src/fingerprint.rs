//! Content fingerprints and the global uniqueness index.
//!
//! A fingerprint is a fixed 32-byte digest of the evidence behind a
//! certificate. It is used directly as the map key; there is no string
//! encoding on the lookup path.

use crate::certificate::CertificateId;
use crate::error::RegistryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const FINGERPRINT_LEN: usize = 32;

/// Fixed-width content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(pub [u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// SHA-256 of raw evidence bytes.
    pub fn digest(evidence: &[u8]) -> Self {
        Self(Sha256::digest(evidence).into())
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; FINGERPRINT_LEN]> for Fingerprint {
    fn from(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Fingerprint {
    type Error = RegistryError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; FINGERPRINT_LEN] = bytes
            .try_into()
            .map_err(|_| RegistryError::InvalidFingerprint)?;
        Ok(Self(array))
    }
}

impl FromStr for Fingerprint {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|_| RegistryError::InvalidFingerprint)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid fingerprint: {raw}")))
    }
}

/// Maps each claimed fingerprint to the certificate that claimed it.
///
/// Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FingerprintIndex {
    claims: BTreeMap<Fingerprint, CertificateId>,
}

impl FingerprintIndex {
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.claims.contains_key(fingerprint)
    }

    /// Certificate id that claimed `fingerprint`, if any.
    pub fn id_of(&self, fingerprint: &Fingerprint) -> Option<CertificateId> {
        self.claims.get(fingerprint).copied()
    }

    /// Claim `fingerprint` for `id`.
    ///
    /// The caller must have checked `contains` first; an existing claim is
    /// never overwritten.
    pub fn register(
        &mut self,
        fingerprint: Fingerprint,
        id: CertificateId,
    ) -> Result<(), RegistryError> {
        if self.contains(&fingerprint) {
            return Err(RegistryError::AlreadyExists);
        }
        self.claims.insert(fingerprint, id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
