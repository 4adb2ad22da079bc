//! # certreg-core
//!
//! Certificate issuance and lifecycle registry.
//!
//! This crate provides:
//! - field validation for the fourteen mint inputs (`validate`)
//! - the fingerprint uniqueness index (`fingerprint`)
//! - the set-once authority gate (`authority`)
//! - the certificate table and amendment log (`store`)
//! - the registry engine that runs mint/update as all-or-nothing units
//!   (`registry`, `shared`)
//! - a JSONL event journal for portable persistence (`journal`, `atomic`)
//!
//! Transport, identity authentication, and fee settlement are external.
//! The engine consumes them through `CallContext` and the `FeeTransfer`
//! trait.
//!
//! ## Data model
//!
//! ```text
//! registry.jsonl (one event per line)
//!     ↕  replay / emit
//! Registry (counter, certificates, amendments, fingerprint index,
//!           authority, fee, fee ledger)
//! ```

pub mod atomic;
pub mod authority;
pub mod certificate;
pub mod config;
pub mod error;
pub mod fee;
pub mod fingerprint;
pub mod identity;
pub mod journal;
pub mod registry;
pub mod shared;
pub mod store;
pub mod validate;

pub use atomic::{JournalMutationError, journal_lock_path, mutate_journal};
pub use authority::AuthorityGate;
pub use certificate::{Amendment, Certificate, CertificateId};
pub use config::{ConfigError, DEFAULT_MAX_CERTS, DEFAULT_MINT_FEE, RegistryConfig};
pub use error::{RegistryError, RegistryResult};
pub use fee::{FeeTransfer, FeeTransferError, FeeTransferRecord, RecordingFeeTransfer};
pub use fingerprint::{FINGERPRINT_LEN, Fingerprint, FingerprintIndex};
pub use identity::{CallContext, NULL_PRINCIPAL, Principal};
pub use journal::{
    JournalError, REGISTRY_EVENT_SCHEMA, RegistryEvent, RegistryEventAction, events_from_registry,
    load_registry, read_events, read_events_from_path, registries_equivalent, replay_events,
    save_registry, write_events, write_events_to_path,
};
pub use registry::{Registry, RestoreError};
pub use shared::SharedRegistry;
pub use store::{FIRST_CERTIFICATE_ID, RecordStore};
pub use validate::{Currency, Level, MintRequest, ValidatedMint, validate_mint_request};
