//! JSONL event journal: the portable form of a registry instance.
//!
//! `certreg.event.v1` envelopes, one per line:
//! - deterministic emission from a live `Registry`
//! - deterministic replay back to an equivalent `Registry`
//!
//! Replay re-checks the table invariants instead of trusting the file:
//! ids are dense and within the header's capacity, fingerprints are
//! unique, and each amendment belongs to an existing certificate, was made
//! by its issuer, and matches its stored score and expiry.

use crate::certificate::{Amendment, Certificate};
use crate::config::RegistryConfig;
use crate::fee::{FeeTransferRecord, RecordingFeeTransfer};
use crate::identity::Principal;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const REGISTRY_EVENT_SCHEMA: &str = "certreg.event.v1";

fn default_registry_event_schema() -> String {
    REGISTRY_EVENT_SCHEMA.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RegistryEventAction {
    RegistryConfigured { max_certs: u64, mint_fee: u64 },
    AuthoritySet { authority: Principal },
    CertificateMinted { certificate: Certificate },
    CertificateAmended { amendment: Amendment },
    FeeTransferred { transfer: FeeTransferRecord },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEvent {
    #[serde(default = "default_registry_event_schema")]
    pub schema: String,
    pub event_id: String,
    #[serde(flatten)]
    pub action: RegistryEventAction,
}

impl RegistryEvent {
    fn new(event_id: String, action: RegistryEventAction) -> Self {
        Self {
            schema: REGISTRY_EVENT_SCHEMA.to_string(),
            event_id,
            action,
        }
    }
}

/// Canonical event sequence describing `registry`.
pub fn events_from_registry(registry: &Registry<RecordingFeeTransfer>) -> Vec<RegistryEvent> {
    let mut events = vec![RegistryEvent::new(
        "registry.configured".to_string(),
        RegistryEventAction::RegistryConfigured {
            max_certs: registry.max_certs(),
            mint_fee: registry.mint_fee(),
        },
    )];

    if let Some(authority) = registry.authority() {
        events.push(RegistryEvent::new(
            "authority.set".to_string(),
            RegistryEventAction::AuthoritySet {
                authority: authority.clone(),
            },
        ));
    }

    for certificate in registry.store().certificates() {
        events.push(RegistryEvent::new(
            format!("certificate.minted:{}", certificate.id),
            RegistryEventAction::CertificateMinted {
                certificate: certificate.clone(),
            },
        ));
    }

    for amendment in registry.store().amendments() {
        events.push(RegistryEvent::new(
            format!("certificate.amended:{}", amendment.certificate_id),
            RegistryEventAction::CertificateAmended {
                amendment: amendment.clone(),
            },
        ));
    }

    for (seq, transfer) in registry.fees().transfers().iter().enumerate() {
        events.push(RegistryEvent::new(
            format!("fee.transferred:{}", seq + 1),
            RegistryEventAction::FeeTransferred {
                transfer: transfer.clone(),
            },
        ));
    }

    events
}

/// Rebuild a registry from its journal.
///
/// An empty journal yields a default registry. Otherwise the first event
/// must be `registry_configured`.
pub fn replay_events(
    events: &[RegistryEvent],
) -> Result<Registry<RecordingFeeTransfer>, JournalError> {
    let Some((header, rest)) = events.split_first() else {
        return Ok(Registry::default());
    };
    check_schema(header)?;

    let mut registry = match &header.action {
        RegistryEventAction::RegistryConfigured {
            max_certs,
            mint_fee,
        } => Registry::new(
            RegistryConfig {
                max_certs: *max_certs,
                mint_fee: *mint_fee,
            },
            RecordingFeeTransfer::default(),
        ),
        _ => return Err(JournalError::MissingHeader(header.event_id.clone())),
    };

    for event in rest {
        check_schema(event)?;
        let replay_err = |message: String| JournalError::Replay {
            event_id: event.event_id.clone(),
            message,
        };

        match &event.action {
            RegistryEventAction::RegistryConfigured { .. } => {
                return Err(JournalError::DuplicateHeader(event.event_id.clone()));
            }
            RegistryEventAction::AuthoritySet { authority } => registry
                .restore_authority(authority.clone())
                .map_err(|e| replay_err(e.to_string()))?,
            RegistryEventAction::CertificateMinted { certificate } => registry
                .restore_certificate(certificate.clone())
                .map_err(|e| replay_err(e.to_string()))?,
            RegistryEventAction::CertificateAmended { amendment } => registry
                .restore_amendment(amendment.clone())
                .map_err(|e| replay_err(e.to_string()))?,
            RegistryEventAction::FeeTransferred { transfer } => {
                registry.fees_mut().restore(transfer.clone());
            }
        }
    }

    Ok(registry)
}

fn check_schema(event: &RegistryEvent) -> Result<(), JournalError> {
    if event.schema != REGISTRY_EVENT_SCHEMA {
        return Err(JournalError::UnsupportedSchema(event.schema.clone()));
    }
    Ok(())
}

/// Whether two registries carry identical state.
pub fn registries_equivalent(
    left: &Registry<RecordingFeeTransfer>,
    right: &Registry<RecordingFeeTransfer>,
) -> bool {
    events_from_registry(left) == events_from_registry(right)
}

pub fn read_events(reader: impl BufRead) -> Result<Vec<RegistryEvent>, JournalError> {
    let mut events = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| JournalError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event: RegistryEvent = serde_json::from_str(trimmed)
            .map_err(|e| JournalError::Parse(line_no + 1, e.to_string()))?;
        events.push(event);
    }
    Ok(events)
}

pub fn write_events(writer: &mut impl Write, events: &[RegistryEvent]) -> Result<(), JournalError> {
    for event in events {
        let line =
            serde_json::to_string(event).map_err(|e| JournalError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| JournalError::Io(0, e.to_string()))?;
    }
    Ok(())
}

pub fn read_events_from_path(path: impl AsRef<Path>) -> Result<Vec<RegistryEvent>, JournalError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| JournalError::Io(0, format!("{}: {e}", path.display())))?;
    validate_substrate_bytes(path, &bytes)?;
    read_events(BufReader::new(bytes.as_slice()))
}

/// Replace the journal at `path` atomically (temp file, fsync, rename).
pub fn write_events_to_path(
    path: impl AsRef<Path>,
    events: &[RegistryEvent],
) -> Result<(), JournalError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| JournalError::Io(0, format!("{}: {e}", parent.display())))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), JournalError> {
        let file = File::create(&tmp_path)
            .map_err(|e| JournalError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let mut writer = BufWriter::new(file);
        write_events(&mut writer, events)?;
        let file = writer
            .into_inner()
            .map_err(|e| JournalError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        file.sync_all()
            .map_err(|e| JournalError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        JournalError::Io(
            0,
            format!("{} -> {}: {e}", tmp_path.display(), path.display()),
        )
    })
}

/// Load and replay the journal at `path`.
pub fn load_registry(
    path: impl AsRef<Path>,
) -> Result<Registry<RecordingFeeTransfer>, JournalError> {
    let events = read_events_from_path(path)?;
    replay_events(&events)
}

/// Persist `registry` as a canonical journal at `path`.
pub fn save_registry(
    path: impl AsRef<Path>,
    registry: &Registry<RecordingFeeTransfer>,
) -> Result<(), JournalError> {
    write_events_to_path(path, &events_from_registry(registry))
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

fn validate_substrate_bytes(path: &Path, bytes: &[u8]) -> Result<(), JournalError> {
    if bytes.contains(&0) {
        return Err(JournalError::Corrupt(format!(
            "{}: contains NUL byte(s)",
            path.display()
        )));
    }
    if std::str::from_utf8(bytes).is_err() {
        return Err(JournalError::Corrupt(format!(
            "{}: contains non-UTF-8 byte sequence(s)",
            path.display()
        )));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("corrupted journal: {0}")]
    Corrupt(String),

    #[error("unsupported event schema: {0}")]
    UnsupportedSchema(String),

    #[error("journal must start with registry_configured, found {0}")]
    MissingHeader(String),

    #[error("duplicate registry_configured event {0}")]
    DuplicateHeader(String),

    #[error("replay failed at event {event_id}: {message}")]
    Replay { event_id: String, message: String },
}
