use crate::support::{
    certificate_json, decode_fingerprint_hex, exit_with, exit_with_journal_error, print_json,
};
use certreg_core::{
    CallContext, Fingerprint, MintRequest, Principal, RegistryError, mutate_journal,
};
use serde_json::json;
use std::fs;

pub struct Args {
    pub caller: String,
    pub height: u64,
    pub recipient: String,
    pub test_type: String,
    pub score: i64,
    pub fingerprint: Option<String>,
    pub evidence: Option<String>,
    pub expiry: u64,
    pub level: String,
    pub issuer_name: String,
    pub recipient_name: String,
    pub location: String,
    pub currency: String,
    pub min_score: i64,
    pub max_score: i64,
    pub language: String,
    pub category: String,
    pub journal: String,
    pub json: bool,
}

/// Resolve the raw fingerprint bytes for a mint.
///
/// Undecodable hex becomes an empty byte string; the registry then rejects
/// it as an invalid fingerprint in its usual rule order.
fn fingerprint_bytes(
    fingerprint: Option<&str>,
    evidence: Option<&str>,
) -> Result<Vec<u8>, String> {
    match (fingerprint, evidence) {
        (Some(hex), _) => Ok(decode_fingerprint_hex(hex).unwrap_or_default()),
        (None, Some(path)) => {
            let bytes =
                fs::read(path).map_err(|e| format!("failed to read evidence file {path}: {e}"))?;
            Ok(Fingerprint::digest(&bytes).as_bytes().to_vec())
        }
        (None, None) => Err("either --fingerprint or --evidence is required".to_string()),
    }
}

pub fn run(args: Args) {
    let fingerprint = fingerprint_bytes(args.fingerprint.as_deref(), args.evidence.as_deref())
        .unwrap_or_else(|e| exit_with(e));

    let request = MintRequest {
        recipient: Principal::new(args.recipient),
        test_type: args.test_type,
        score: args.score,
        fingerprint,
        expiry_date: args.expiry,
        level: args.level,
        issuer_name: args.issuer_name,
        recipient_name: args.recipient_name,
        location: args.location,
        currency: args.currency,
        min_score: args.min_score,
        max_score: args.max_score,
        language: args.language,
        category: args.category,
    };
    let ctx = CallContext::new(args.caller, args.height);

    let (cert, fee) = mutate_journal(&args.journal, |registry| {
        let fee = registry.mint_fee();
        let id = registry.mint(&ctx, &request)?;
        let cert = registry
            .get_certificate(id)
            .cloned()
            .ok_or(RegistryError::NotFound)?;
        Ok((cert, fee))
    })
    .unwrap_or_else(|e| exit_with_journal_error(e));

    if args.json {
        print_json(&json!({
            "action": "certificate.mint",
            "journalPath": args.journal,
            "feeCharged": fee,
            "certificate": certificate_json(&cert)
        }));
    } else {
        println!("Minted certificate: {}", cert.id);
        println!("  fingerprint: {}", cert.fingerprint);
        println!("  fee charged: {fee}");
    }
}
