use crate::support::{CONFIG_FILE_NAME, exit_with, print_json, yes_no};
use certreg_core::{RecordingFeeTransfer, Registry, RegistryConfig, save_registry};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub root: PathBuf,
    pub certreg_dir: PathBuf,
    pub journal_path: PathBuf,
    pub config: RegistryConfig,
    pub created_certreg_dir: bool,
    pub created_journal: bool,
}

pub fn init_layout(
    path: impl AsRef<Path>,
    config_path: Option<&Path>,
) -> Result<InitOutcome, String> {
    let root = path.as_ref().to_path_buf();
    if !root.exists() {
        fs::create_dir_all(&root)
            .map_err(|e| format!("failed to create init path {}: {e}", root.display()))?;
    }
    if !root.is_dir() {
        return Err(format!("init path is not a directory: {}", root.display()));
    }

    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    let config = RegistryConfig::load(&config_path).map_err(|e| e.to_string())?;

    let certreg_dir = root.join(".certreg");
    let mut created_certreg_dir = false;
    if !certreg_dir.exists() {
        fs::create_dir_all(&certreg_dir).map_err(|e| {
            format!(
                "failed to create certreg directory {}: {e}",
                certreg_dir.display()
            )
        })?;
        created_certreg_dir = true;
    }

    let journal_path = certreg_dir.join("registry.jsonl");
    if journal_path.exists() && !journal_path.is_file() {
        return Err(format!(
            "journal path exists but is not a file: {}",
            journal_path.display()
        ));
    }

    let mut created_journal = false;
    if !journal_path.exists() {
        let registry = Registry::new(config.clone(), RecordingFeeTransfer::default());
        save_registry(&journal_path, &registry)
            .map_err(|e| format!("failed to initialize {}: {e}", journal_path.display()))?;
        created_journal = true;
        tracing::info!(path = %journal_path.display(), "registry journal created");
    }

    Ok(InitOutcome {
        root,
        certreg_dir,
        journal_path,
        config,
        created_certreg_dir,
        created_journal,
    })
}

pub fn run(path: String, config: Option<String>, json_output: bool) {
    let outcome =
        init_layout(&path, config.as_deref().map(Path::new)).unwrap_or_else(|e| exit_with(e));

    if json_output {
        print_json(&json!({
            "action": "registry.init",
            "root": outcome.root.display().to_string(),
            "journalPath": outcome.journal_path.display().to_string(),
            "maxCerts": outcome.config.max_certs,
            "mintFee": outcome.config.mint_fee,
            "createdCertregDir": outcome.created_certreg_dir,
            "createdJournal": outcome.created_journal
        }));
        return;
    }

    println!("certreg init {path}");
    println!();
    println!("  root: {}", outcome.root.display());
    println!("  certreg dir: {}", outcome.certreg_dir.display());
    println!("  journal path: {}", outcome.journal_path.display());
    println!("  max certs: {}", outcome.config.max_certs);
    println!("  mint fee: {}", outcome.config.mint_fee);
    println!(
        "  created .certreg dir: {}",
        yes_no(outcome.created_certreg_dir)
    );
    println!("  created journal: {}", yes_no(outcome.created_journal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use certreg_core::load_registry;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "certreg-cli-init-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should exist");
        path
    }

    #[test]
    fn init_layout_creates_journal_with_defaults() {
        let root = temp_dir("create");
        let outcome = init_layout(&root, None).expect("init should succeed");
        assert!(outcome.journal_path.exists());
        assert!(outcome.created_journal);

        let registry = load_registry(&outcome.journal_path).expect("journal should load");
        assert_eq!(registry.max_certs(), 10_000);
        assert_eq!(registry.mint_fee(), 500);
        assert_eq!(registry.cert_count(), 1);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn init_layout_reads_config_from_root() {
        let root = temp_dir("config");
        fs::write(root.join(CONFIG_FILE_NAME), "max_certs = 3\nmint_fee = 42\n")
            .expect("config fixture");
        let outcome = init_layout(&root, None).expect("init should succeed");
        assert_eq!(outcome.config.max_certs, 3);

        let registry = load_registry(&outcome.journal_path).expect("journal should load");
        assert_eq!(registry.max_certs(), 3);
        assert_eq!(registry.mint_fee(), 42);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn init_layout_is_idempotent() {
        let root = temp_dir("idempotent");
        init_layout(&root, None).expect("first init should succeed");
        let second = init_layout(&root, None).expect("second init should succeed");
        assert!(!second.created_journal);
        assert!(!second.created_certreg_dir);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn init_layout_rejects_invalid_config() {
        let root = temp_dir("invalid");
        fs::write(root.join(CONFIG_FILE_NAME), "max_certs = 0\n").expect("config fixture");
        let err = init_layout(&root, None).expect_err("zero capacity must be rejected");
        assert!(err.contains("invalid configuration"));
        let _ = fs::remove_dir_all(root);
    }
}
