use certreg_core::{
    Certificate, Fingerprint, JournalMutationError, RecordingFeeTransfer, Registry,
    RegistryError, load_registry,
};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

pub const DEFAULT_JOURNAL_PATH: &str = ".certreg/registry.jsonl";
pub const CONFIG_FILE_NAME: &str = "certreg.toml";

pub fn yes_no(ok: bool) -> &'static str {
    if ok { "yes" } else { "no" }
}

pub fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

/// Report a rejected registry operation as `error: <kind> (<code>): <message>`.
pub fn exit_with_registry_error(err: &RegistryError) -> ! {
    tracing::debug!(code = err.code(), kind = err.kind(), "operation rejected");
    exit_with(format_args!("{} ({}): {err}", err.kind(), err.code()));
}

pub fn exit_with_journal_error(err: JournalMutationError) -> ! {
    match err {
        JournalMutationError::Rejected(err) => exit_with_registry_error(&err),
        other => exit_with(other),
    }
}

pub fn load_registry_or_exit(journal: &str) -> (Registry<RecordingFeeTransfer>, PathBuf) {
    let path = PathBuf::from(journal);
    let registry = load_registry(&path).unwrap_or_else(|e| {
        exit_with(format_args!("failed to load {}: {e}", path.display()))
    });
    (registry, path)
}

/// Parse a hex fingerprint argument into raw bytes.
///
/// Length is not checked here so the registry reports it with its own code.
pub fn decode_fingerprint_hex(value: &str) -> Result<Vec<u8>, RegistryError> {
    hex::decode(value.trim()).map_err(|_| RegistryError::InvalidFingerprint)
}

pub fn parse_fingerprint_or_exit(value: &str) -> Fingerprint {
    value
        .parse()
        .unwrap_or_else(|e| exit_with_registry_error(&e))
}

pub fn print_json(payload: &Value) {
    match serde_json::to_string_pretty(payload) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => exit_with(format_args!("json serialization: {e}")),
    }
}

pub fn certificate_json(cert: &Certificate) -> Value {
    json!({
        "id": cert.id,
        "issuer": cert.issuer.as_str(),
        "recipient": cert.recipient.as_str(),
        "testType": cert.test_type,
        "score": cert.score,
        "minScore": cert.min_score,
        "maxScore": cert.max_score,
        "level": cert.level.as_str(),
        "fingerprint": cert.fingerprint.to_hex(),
        "issueDate": cert.issue_date,
        "expiryDate": cert.expiry_date,
        "issuerName": cert.issuer_name,
        "recipientName": cert.recipient_name,
        "location": cert.location,
        "currency": cert.currency.as_str(),
        "language": cert.language,
        "category": cert.category,
        "status": cert.status
    })
}

pub fn journal_display(path: &Path) -> String {
    path.display().to_string()
}
