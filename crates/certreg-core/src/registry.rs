//! Registry engine: mint, update, and administrative operations.
//!
//! Every mutating operation runs all of its checks before touching state.
//! A rejected call leaves the counter, record store, fingerprint index,
//! and fee ledger exactly as they were.

use crate::authority::AuthorityGate;
use crate::certificate::{Amendment, Certificate, CertificateId};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::fee::{FeeTransfer, RecordingFeeTransfer};
use crate::fingerprint::{Fingerprint, FingerprintIndex};
use crate::identity::{CallContext, Principal};
use crate::store::RecordStore;
use crate::validate::{self, MintRequest};
use tracing::{debug, info};

/// Single registry instance: scalars, tables, and the fee collaborator.
#[derive(Debug, Clone)]
pub struct Registry<F = RecordingFeeTransfer> {
    max_certs: u64,
    mint_fee: u64,
    authority: AuthorityGate,
    store: RecordStore,
    fingerprints: FingerprintIndex,
    fees: F,
}

impl Default for Registry<RecordingFeeTransfer> {
    fn default() -> Self {
        Self::new(RegistryConfig::default(), RecordingFeeTransfer::default())
    }
}

impl<F: FeeTransfer> Registry<F> {
    pub fn new(config: RegistryConfig, fees: F) -> Self {
        Self {
            max_certs: config.max_certs,
            mint_fee: config.mint_fee,
            authority: AuthorityGate::default(),
            store: RecordStore::default(),
            fingerprints: FingerprintIndex::default(),
            fees,
        }
    }

    // ── Administration ──

    /// Designate the authority. Succeeds at most once per instance.
    pub fn set_authority(&mut self, identity: Principal) -> RegistryResult<()> {
        let shown = identity.to_string();
        match self.authority.configure(identity) {
            Ok(()) => {
                info!(authority = %shown, "authority configured");
                Ok(())
            }
            Err(err) => {
                debug!(kind = err.kind(), authority = %shown, "set authority rejected");
                Err(err)
            }
        }
    }

    /// Replace the mint fee. Requires a configured authority.
    pub fn set_fee(&mut self, new_fee: i64) -> RegistryResult<()> {
        if !self.authority.is_configured() {
            debug!(kind = "authority-not-verified", "set fee rejected");
            return Err(RegistryError::AuthorityNotVerified);
        }
        let fee = u64::try_from(new_fee).map_err(|_| {
            debug!(kind = "negative-fee", new_fee, "set fee rejected");
            RegistryError::NegativeFee
        })?;
        self.mint_fee = fee;
        info!(mint_fee = fee, "mint fee updated");
        Ok(())
    }

    // ── Mint ──

    /// Validate and mint a certificate, charging the current fee.
    ///
    /// Check order: capacity, field rules 1-14, fingerprint uniqueness,
    /// authority. The fee transfer runs last; state is only written once it
    /// has succeeded.
    ///
    /// Capacity rejects once `next_id > max_certs`, so an instance admits
    /// exactly `max_certs` certificates (not `max_certs - 1`).
    pub fn mint(
        &mut self,
        ctx: &CallContext,
        request: &MintRequest,
    ) -> RegistryResult<CertificateId> {
        let result = self.try_mint(ctx, request);
        match &result {
            Ok(id) => info!(
                id,
                issuer = %ctx.caller,
                height = ctx.height,
                fee = self.mint_fee,
                "certificate minted"
            ),
            Err(err) => debug!(
                kind = err.kind(),
                code = err.code(),
                caller = %ctx.caller,
                "mint rejected"
            ),
        }
        result
    }

    fn try_mint(
        &mut self,
        ctx: &CallContext,
        request: &MintRequest,
    ) -> RegistryResult<CertificateId> {
        if self.store.next_id() > self.max_certs {
            return Err(RegistryError::CapacityExceeded);
        }

        let fields = validate::validate_mint_request(request, ctx.height)?;

        if self.fingerprints.contains(&fields.fingerprint) {
            return Err(RegistryError::AlreadyExists);
        }

        let authority = self.authority.require()?.clone();

        self.fees.transfer(self.mint_fee, &ctx.caller, &authority)?;

        let fingerprint = fields.fingerprint;
        let certificate = Certificate {
            id: self.store.next_id(),
            issuer: ctx.caller.clone(),
            recipient: fields.recipient,
            test_type: fields.test_type,
            score: fields.score,
            min_score: fields.min_score,
            max_score: fields.max_score,
            level: fields.level,
            fingerprint,
            issue_date: ctx.height,
            expiry_date: fields.expiry_date,
            issuer_name: fields.issuer_name,
            recipient_name: fields.recipient_name,
            location: fields.location,
            currency: fields.currency,
            language: fields.language,
            category: fields.category,
            status: true,
        };

        let id = self.store.insert(certificate);
        self.fingerprints.register(fingerprint, id)?;
        self.store.advance();
        Ok(id)
    }

    // ── Update ──

    /// Amend score and expiry. Only the original issuer may do this.
    pub fn update(
        &mut self,
        ctx: &CallContext,
        id: CertificateId,
        score: i64,
        expiry: u64,
    ) -> RegistryResult<Amendment> {
        let result = self.try_update(ctx, id, score, expiry);
        match &result {
            Ok(amendment) => info!(
                id,
                score = amendment.update_score,
                expiry = amendment.update_expiry,
                height = ctx.height,
                "certificate amended"
            ),
            Err(err) => debug!(
                id,
                kind = err.kind(),
                code = err.code(),
                caller = %ctx.caller,
                "update rejected"
            ),
        }
        result
    }

    fn try_update(
        &mut self,
        ctx: &CallContext,
        id: CertificateId,
        score: i64,
        expiry: u64,
    ) -> RegistryResult<Amendment> {
        let existing = self.store.get(id).ok_or(RegistryError::NotFound)?;
        if existing.issuer != ctx.caller {
            return Err(RegistryError::NotAuthorized);
        }
        let score = validate::check_score(score)?;
        validate::check_expiry(expiry, ctx.height)?;

        self.store.amend(id, score, expiry, &ctx.caller, ctx.height)
    }

    // ── Reads ──

    pub fn get_certificate(&self, id: CertificateId) -> Option<&Certificate> {
        self.store.get(id)
    }

    /// Latest amendment for `id`.
    pub fn amendment(&self, id: CertificateId) -> Option<&Amendment> {
        self.store.amendment(id)
    }

    /// The next id to be assigned, i.e. one more than the number minted.
    ///
    /// Kept as next-id rather than a literal count for compatibility.
    pub fn cert_count(&self) -> u64 {
        self.store.next_id()
    }

    pub fn check_existence(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// Certificate id that claimed `fingerprint`.
    pub fn certificate_for(&self, fingerprint: &Fingerprint) -> Option<CertificateId> {
        self.fingerprints.id_of(fingerprint)
    }

    pub fn mint_fee(&self) -> u64 {
        self.mint_fee
    }

    pub fn max_certs(&self) -> u64 {
        self.max_certs
    }

    pub fn authority(&self) -> Option<&Principal> {
        self.authority.authority()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn fees(&self) -> &F {
        &self.fees
    }

    pub fn fees_mut(&mut self) -> &mut F {
        &mut self.fees
    }

    // ── Journal replay ──

    pub(crate) fn restore_authority(&mut self, identity: Principal) -> RegistryResult<()> {
        self.authority.configure(identity)
    }

    /// Re-insert a recorded certificate. Ids must arrive densely in order
    /// and stay within capacity.
    pub(crate) fn restore_certificate(
        &mut self,
        certificate: Certificate,
    ) -> Result<(), RestoreError> {
        if certificate.id > self.max_certs {
            return Err(RestoreError::OverCapacity {
                id: certificate.id,
                max_certs: self.max_certs,
            });
        }
        if certificate.id != self.store.next_id() {
            return Err(RestoreError::NonDenseId {
                expected: self.store.next_id(),
                found: certificate.id,
            });
        }
        let fingerprint = certificate.fingerprint;
        if self.fingerprints.contains(&fingerprint) {
            return Err(RestoreError::DuplicateFingerprint(fingerprint));
        }
        let id = self.store.insert(certificate);
        self.fingerprints
            .register(fingerprint, id)
            .map_err(|_| RestoreError::DuplicateFingerprint(fingerprint))?;
        self.store.advance();
        Ok(())
    }

    /// Re-attach a recorded amendment. It must come from the certificate's
    /// issuer and match the certificate's current score and expiry.
    pub(crate) fn restore_amendment(&mut self, amendment: Amendment) -> Result<(), RestoreError> {
        let id = amendment.certificate_id;
        let cert = self
            .store
            .get(id)
            .ok_or(RestoreError::UnknownCertificate(id))?;
        if amendment.updater != cert.issuer {
            return Err(RestoreError::ForeignUpdater {
                id,
                updater: amendment.updater,
            });
        }
        if amendment.update_score != cert.score || amendment.update_expiry != cert.expiry_date {
            return Err(RestoreError::AmendmentMismatch(id));
        }
        self.store.restore_amendment(amendment);
        Ok(())
    }
}

/// Invariant violations found while rebuilding a registry from history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("non-dense certificate id: expected {expected}, found {found}")]
    NonDenseId {
        expected: CertificateId,
        found: CertificateId,
    },

    #[error("duplicate fingerprint: {0}")]
    DuplicateFingerprint(Fingerprint),

    #[error("certificate {id} exceeds capacity {max_certs}")]
    OverCapacity {
        id: CertificateId,
        max_certs: u64,
    },

    #[error("amendment for unknown certificate {0}")]
    UnknownCertificate(CertificateId),

    #[error("amendment of certificate {id} by non-issuer {updater}")]
    ForeignUpdater {
        id: CertificateId,
        updater: Principal,
    },

    #[error("amendment of certificate {0} disagrees with stored score/expiry")]
    AmendmentMismatch(CertificateId),
}
