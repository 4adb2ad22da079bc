//! Canonical in-memory certificate table and amendment log.
//!
//! The store owns record lifecycle but not transaction ordering: `insert`
//! writes at the current counter and `advance` moves the counter, so the
//! engine can commit both as one unit.

use crate::certificate::{Amendment, Certificate, CertificateId};
use crate::error::{RegistryError, RegistryResult};
use crate::identity::Principal;
use std::collections::BTreeMap;

pub const FIRST_CERTIFICATE_ID: CertificateId = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    next_id: CertificateId,
    certificates: BTreeMap<CertificateId, Certificate>,
    amendments: BTreeMap<CertificateId, Amendment>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            next_id: FIRST_CERTIFICATE_ID,
            certificates: BTreeMap::new(),
            amendments: BTreeMap::new(),
        }
    }
}

impl RecordStore {
    /// The id the next insert will receive.
    pub fn next_id(&self) -> CertificateId {
        self.next_id
    }

    /// Number of stored certificates.
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    /// Store `record` under the current counter value and return that id.
    ///
    /// Does not advance the counter.
    pub fn insert(&mut self, mut record: Certificate) -> CertificateId {
        let id = self.next_id;
        record.id = id;
        self.certificates.insert(id, record);
        id
    }

    /// Move the counter past the most recent insert.
    pub fn advance(&mut self) {
        self.next_id += 1;
    }

    pub fn get(&self, id: CertificateId) -> Option<&Certificate> {
        self.certificates.get(&id)
    }

    /// Latest amendment recorded for `id`.
    pub fn amendment(&self, id: CertificateId) -> Option<&Amendment> {
        self.amendments.get(&id)
    }

    /// Replace score and expiry in place and record the amendment.
    ///
    /// Only the original issuer may amend. Any earlier amendment for the
    /// same id is overwritten.
    pub fn amend(
        &mut self,
        id: CertificateId,
        update_score: u8,
        update_expiry: u64,
        updater: &Principal,
        timestamp: u64,
    ) -> RegistryResult<Amendment> {
        let certificate = self
            .certificates
            .get_mut(&id)
            .ok_or(RegistryError::NotFound)?;
        if certificate.issuer != *updater {
            return Err(RegistryError::NotAuthorized);
        }

        certificate.score = update_score;
        certificate.expiry_date = update_expiry;

        let amendment = Amendment {
            certificate_id: id,
            update_score,
            update_expiry,
            update_timestamp: timestamp,
            updater: updater.clone(),
        };
        self.amendments.insert(id, amendment.clone());
        Ok(amendment)
    }

    /// Iterate certificates in id order.
    pub fn certificates(&self) -> impl Iterator<Item = &Certificate> {
        self.certificates.values()
    }

    /// Iterate amendments in certificate-id order.
    pub fn amendments(&self) -> impl Iterator<Item = &Amendment> {
        self.amendments.values()
    }

    /// Record an amendment the caller has already checked against its certificate.
    pub(crate) fn restore_amendment(&mut self, amendment: Amendment) {
        self.amendments.insert(amendment.certificate_id, amendment);
    }
}
