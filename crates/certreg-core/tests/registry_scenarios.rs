use certreg_core::{
    CallContext, Currency, FeeTransferRecord, Fingerprint, Level, MintRequest, Principal,
    RecordingFeeTransfer, Registry, RegistryConfig, RegistryError, SharedRegistry,
};

const AUTHORITY: &str = "ST2TEST";
const ISSUER: &str = "ST1TEST";
const RECIPIENT: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

fn toefl(fill: u8) -> MintRequest {
    MintRequest {
        recipient: Principal::from(RECIPIENT),
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

fn ielts(fill: u8) -> MintRequest {
    MintRequest {
        recipient: Principal::from("ST3NYX3MRK8DW6T3K7S7GDX4VNY2NX3BMX7Y3T1FY"),
        test_type: "IELTS".to_string(),
        score: 90,
        fingerprint: vec![fill; 32],
        expiry_date: 2000,
        level: "intermediate".to_string(),
        issuer_name: "IssuerCorp".to_string(),
        recipient_name: "Jane Smith".to_string(),
        location: "UK".to_string(),
        currency: "STX".to_string(),
        min_score: 50,
        max_score: 100,
        language: "French".to_string(),
        category: "Business".to_string(),
    }
}

fn registry_with(config: RegistryConfig) -> Registry {
    let mut registry = Registry::new(config, RecordingFeeTransfer::default());
    registry
        .set_authority(Principal::from(AUTHORITY))
        .expect("authority should configure");
    registry
}

fn configured() -> Registry {
    registry_with(RegistryConfig::default())
}

fn at(caller: &str, height: u64) -> CallContext {
    CallContext::new(caller, height)
}

#[test]
fn scenario_a_mint_returns_first_id_and_charges_fee() {
    let mut registry = configured();
    let id = registry
        .mint(&at(ISSUER, 0), &toefl(0))
        .expect("mint should succeed");
    assert_eq!(id, 1);

    let cert = registry.get_certificate(1).expect("certificate stored");
    assert_eq!(cert.id, 1);
    assert_eq!(cert.issuer, Principal::from(ISSUER));
    assert_eq!(cert.recipient, Principal::from(RECIPIENT));
    assert_eq!(cert.test_type, "TOEFL");
    assert_eq!(cert.score, 85);
    assert_eq!(cert.fingerprint, Fingerprint::from([0u8; 32]));
    assert_eq!(cert.issue_date, 0);
    assert_eq!(cert.expiry_date, 1000);
    assert_eq!(cert.level, Level::Advanced);
    assert_eq!(cert.issuer_name, "IssuerOrg");
    assert_eq!(cert.recipient_name, "John Doe");
    assert_eq!(cert.location, "USA");
    assert_eq!(cert.currency, Currency::Usd);
    assert_eq!(cert.min_score, 0);
    assert_eq!(cert.max_score, 100);
    assert_eq!(cert.language, "English");
    assert_eq!(cert.category, "Proficiency");
    assert!(cert.status);

    assert_eq!(
        registry.fees().transfers(),
        &[FeeTransferRecord {
            amount: 500,
            from: ISSUER.into(),
            to: AUTHORITY.into(),
        }]
    );
}

#[test]
fn scenario_b_duplicate_fingerprint_is_rejected() {
    let mut registry = configured();
    registry
        .mint(&at(ISSUER, 0), &toefl(0))
        .expect("first mint should succeed");

    let result = registry.mint(&at("ST3OTHER", 5), &ielts(0));
    assert_eq!(result, Err(RegistryError::AlreadyExists));
    assert_eq!(registry.cert_count(), 2);
    assert_eq!(registry.fees().transfers().len(), 1);
}

#[test]
fn scenario_c_invalid_score_mutates_nothing() {
    let mut registry = configured();
    let mut request = toefl(0);
    request.score = 101;

    assert_eq!(
        registry.mint(&at(ISSUER, 0), &request),
        Err(RegistryError::InvalidScore)
    );
    assert_eq!(registry.cert_count(), 1);
    assert!(registry.fees().transfers().is_empty());
    assert!(!registry.check_existence(&Fingerprint::from([0u8; 32])));
    assert!(registry.get_certificate(1).is_none());
}

#[test]
fn scenario_d_update_by_issuer_only() {
    let mut registry = configured();
    registry
        .mint(&at(ISSUER, 0), &toefl(0))
        .expect("mint should succeed");

    registry
        .update(&at(ISSUER, 0), 1, 90, 2000)
        .expect("issuer update should succeed");
    let cert = registry.get_certificate(1).expect("certificate stored");
    assert_eq!((cert.score, cert.expiry_date), (90, 2000));
    let amendment = registry.amendment(1).expect("amendment recorded");
    assert_eq!(amendment.update_score, 90);
    assert_eq!(amendment.update_expiry, 2000);
    assert_eq!(amendment.updater, Principal::from(ISSUER));

    assert_eq!(
        registry.update(&at("ST3FAKE", 0), 1, 10, 3000),
        Err(RegistryError::NotAuthorized)
    );
    let cert = registry.get_certificate(1).expect("certificate stored");
    assert_eq!((cert.score, cert.expiry_date), (90, 2000));
}

#[test]
fn scenario_e_capacity_one_admits_single_mint() {
    let mut registry = registry_with(RegistryConfig {
        max_certs: 1,
        mint_fee: 500,
    });
    assert_eq!(registry.mint(&at(ISSUER, 0), &toefl(0)), Ok(1));
    assert_eq!(
        registry.mint(&at(ISSUER, 0), &ielts(1)),
        Err(RegistryError::CapacityExceeded)
    );
    assert_eq!(registry.cert_count(), 2);
}

#[test]
fn mint_without_authority_is_not_verified() {
    let mut registry: Registry = Registry::default();
    assert_eq!(
        registry.mint(&at(ISSUER, 0), &toefl(0)),
        Err(RegistryError::AuthorityNotVerified)
    );
    assert_eq!(registry.cert_count(), 1);
    assert!(registry.fees().transfers().is_empty());
}

#[test]
fn returned_id_matches_prior_count() {
    let mut registry = configured();
    for fill in 0..5u8 {
        let before = registry.cert_count();
        let id = registry
            .mint(&at(ISSUER, u64::from(fill)), &toefl(fill))
            .expect("mint should succeed");
        assert_eq!(id, before);
        assert_eq!(registry.cert_count(), before + 1);
        assert!(registry.check_existence(&Fingerprint::from([fill; 32])));
    }
}

#[test]
fn count_is_next_id_not_population() {
    let mut registry = configured();
    registry.mint(&at(ISSUER, 0), &toefl(0)).expect("first");
    registry.mint(&at(ISSUER, 0), &ielts(1)).expect("second");
    assert_eq!(registry.cert_count(), 3);
    assert_eq!(registry.store().len(), 2);
}

#[test]
fn existence_probe_reports_absent_fingerprints() {
    let mut registry = configured();
    registry.mint(&at(ISSUER, 0), &toefl(0)).expect("mint");
    assert!(registry.check_existence(&Fingerprint::from([0u8; 32])));
    assert!(!registry.check_existence(&Fingerprint::from([255u8; 32])));
    assert_eq!(
        registry.certificate_for(&Fingerprint::from([0u8; 32])),
        Some(1)
    );
}

#[test]
fn set_authority_succeeds_exactly_once() {
    let mut registry: Registry = Registry::default();
    assert_eq!(
        registry.set_authority(Principal::null()),
        Err(RegistryError::InvalidAuthorityIdentity)
    );
    registry
        .set_authority(Principal::from(AUTHORITY))
        .expect("first set should succeed");
    assert_eq!(
        registry.set_authority(Principal::from("ST9ELSE")),
        Err(RegistryError::AlreadyConfigured)
    );
    assert_eq!(registry.authority(), Some(&Principal::from(AUTHORITY)));
}

#[test]
fn new_fee_applies_to_next_mint() {
    let mut registry = configured();
    registry.set_fee(1000).expect("fee should update");
    registry.mint(&at(ISSUER, 0), &toefl(0)).expect("mint");
    assert_eq!(
        registry.fees().transfers(),
        &[FeeTransferRecord {
            amount: 1000,
            from: ISSUER.into(),
            to: AUTHORITY.into(),
        }]
    );
}

#[test]
fn null_recipient_is_rejected_first() {
    let mut registry = configured();
    let mut request = toefl(0);
    request.recipient = Principal::null();
    request.test_type = String::new();
    assert_eq!(
        registry.mint(&at(ISSUER, 0), &request),
        Err(RegistryError::InvalidRecipient)
    );
}

#[test]
fn expiry_is_judged_against_call_height() {
    let mut registry = configured();
    assert_eq!(
        registry.mint(&at(ISSUER, 1000), &toefl(0)),
        Err(RegistryError::InvalidExpiry)
    );
    let id = registry
        .mint(&at(ISSUER, 999), &toefl(0))
        .expect("expiry after height should pass");
    let cert = registry.get_certificate(id).expect("stored");
    assert_eq!(cert.issue_date, 999);
    assert!(!cert.is_expired_at(999));
    assert!(cert.is_expired_at(1000));
}

#[test]
fn shared_handle_serves_reads_after_writes() {
    let shared = SharedRegistry::new(configured());
    let id = shared
        .mint(&at(ISSUER, 0), &toefl(3))
        .expect("mint should succeed");
    shared
        .update(&at(ISSUER, 1), id, 70, 5000)
        .expect("update should succeed");
    let cert = shared.get_certificate(id).expect("certificate stored");
    assert_eq!((cert.score, cert.expiry_date), (70, 5000));
    assert_eq!(shared.amendment(id).map(|a| a.update_timestamp), Some(1));
    assert!(shared.get_certificate(42).is_none());
}
