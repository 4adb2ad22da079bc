//! Thread-safe handle over one registry instance.
//!
//! Mutations take the write lock for their whole duration, so each mint or
//! update is applied completely before the next begins. Reads share the
//! read lock and never observe a half-applied operation.

use crate::certificate::{Amendment, Certificate, CertificateId};
use crate::error::RegistryResult;
use crate::fee::{FeeTransfer, RecordingFeeTransfer};
use crate::fingerprint::Fingerprint;
use crate::identity::{CallContext, Principal};
use crate::registry::Registry;
use crate::validate::MintRequest;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
pub struct SharedRegistry<F = RecordingFeeTransfer> {
    inner: Arc<RwLock<Registry<F>>>,
}

impl<F> Clone for SharedRegistry<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: FeeTransfer> SharedRegistry<F> {
    pub fn new(registry: Registry<F>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry<F>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<F>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn mint(&self, ctx: &CallContext, request: &MintRequest) -> RegistryResult<CertificateId> {
        self.write().mint(ctx, request)
    }

    pub fn update(
        &self,
        ctx: &CallContext,
        id: CertificateId,
        score: i64,
        expiry: u64,
    ) -> RegistryResult<Amendment> {
        self.write().update(ctx, id, score, expiry)
    }

    pub fn set_authority(&self, identity: Principal) -> RegistryResult<()> {
        self.write().set_authority(identity)
    }

    pub fn set_fee(&self, new_fee: i64) -> RegistryResult<()> {
        self.write().set_fee(new_fee)
    }

    pub fn get_certificate(&self, id: CertificateId) -> Option<Certificate> {
        self.read().get_certificate(id).cloned()
    }

    pub fn amendment(&self, id: CertificateId) -> Option<Amendment> {
        self.read().amendment(id).cloned()
    }

    pub fn cert_count(&self) -> u64 {
        self.read().cert_count()
    }

    pub fn check_existence(&self, fingerprint: &Fingerprint) -> bool {
        self.read().check_existence(fingerprint)
    }

    /// Run `f` against a consistent read-only view.
    pub fn with_registry<T>(&self, f: impl FnOnce(&Registry<F>) -> T) -> T {
        f(&self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    fn request(fill: u8) -> MintRequest {
        MintRequest {
            recipient: Principal::from("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"),
            test_type: "TOEFL".to_string(),
            score: 85,
            fingerprint: vec![fill; 32],
            expiry_date: 1000,
            level: "advanced".to_string(),
            issuer_name: "IssuerOrg".to_string(),
            recipient_name: "John Doe".to_string(),
            location: "USA".to_string(),
            currency: "USD".to_string(),
            min_score: 0,
            max_score: 100,
            language: "English".to_string(),
            category: "Proficiency".to_string(),
        }
    }

    #[test]
    fn concurrent_mints_of_same_fingerprint_admit_exactly_one() {
        let shared: SharedRegistry = SharedRegistry::new(Registry::default());
        shared
            .set_authority(Principal::from("ST2TEST"))
            .expect("authority should configure");

        let workers = 8;
        let barrier = Arc::new(Barrier::new(workers));
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let shared = shared.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let ctx = CallContext::new(format!("ST1WORKER{worker}"), 0);
                    shared.mint(&ctx, &request(7))
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("worker should not panic"))
            .collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(shared.cert_count(), 2);
        assert!(shared.check_existence(&Fingerprint::from([7u8; 32])));
        shared.with_registry(|registry| assert_eq!(registry.fees().transfers().len(), 1));
    }

    #[test]
    fn concurrent_distinct_mints_get_dense_ids() {
        let shared: SharedRegistry = SharedRegistry::new(Registry::default());
        shared
            .set_authority(Principal::from("ST2TEST"))
            .expect("authority should configure");

        let handles: Vec<_> = (0..16u8)
            .map(|fill| {
                let shared = shared.clone();
                thread::spawn(move || shared.mint(&CallContext::new("ST1TEST", 0), &request(fill)))
            })
            .collect();

        let mut ids: Vec<CertificateId> = handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .expect("worker should not panic")
                    .expect("distinct mint should succeed")
            })
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
        assert_eq!(shared.cert_count(), 17);
    }
}
