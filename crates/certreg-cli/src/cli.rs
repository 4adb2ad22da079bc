use crate::support::DEFAULT_JOURNAL_PATH;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "certreg",
    about = "certreg: certificate issuance and lifecycle registry",
    version
)]
pub struct Cli {
    /// Enable debug logging on stderr (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum Commands {
    /// Initialize a registry journal
    Init {
        /// Directory to initialize
        #[arg(default_value = ".")]
        path: String,

        /// Registry config TOML (defaults to <path>/certreg.toml when present)
        #[arg(long)]
        config: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Designate the fee-receiving authority (once per registry)
    SetAuthority {
        /// Authority principal
        principal: String,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the mint fee (requires a configured authority)
    SetFee {
        /// New fee amount
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mint a new certificate
    Mint {
        /// Calling (issuer) principal
        #[arg(long)]
        caller: String,

        /// Current logical height
        #[arg(long, default_value_t = 0)]
        height: u64,

        /// Recipient principal
        #[arg(long)]
        recipient: String,

        /// Test type name
        #[arg(long)]
        test_type: String,

        /// Score (0..100)
        #[arg(long, allow_negative_numbers = true)]
        score: i64,

        /// Content fingerprint as hex (32 bytes)
        #[arg(long, conflicts_with = "evidence", required_unless_present = "evidence")]
        fingerprint: Option<String>,

        /// Evidence file; its SHA-256 digest becomes the fingerprint
        #[arg(long)]
        evidence: Option<String>,

        /// Expiry height (must exceed --height)
        #[arg(long)]
        expiry: u64,

        /// Proficiency level: beginner, intermediate, advanced
        #[arg(long)]
        level: String,

        /// Issuer display name
        #[arg(long)]
        issuer_name: String,

        /// Recipient display name
        #[arg(long)]
        recipient_name: String,

        /// Location
        #[arg(long)]
        location: String,

        /// Currency: STX, USD, BTC
        #[arg(long)]
        currency: String,

        /// Minimum score of the band (0..100)
        #[arg(long, allow_negative_numbers = true)]
        min_score: i64,

        /// Maximum score of the band (0..100)
        #[arg(long, allow_negative_numbers = true)]
        max_score: i64,

        /// Language
        #[arg(long)]
        language: String,

        /// Category
        #[arg(long)]
        category: String,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Amend score and expiry of an existing certificate (issuer only)
    Update {
        /// Certificate ID
        id: u64,

        /// Calling principal
        #[arg(long)]
        caller: String,

        /// Current logical height
        #[arg(long, default_value_t = 0)]
        height: u64,

        /// New score (0..100)
        #[arg(long, allow_negative_numbers = true)]
        score: i64,

        /// New expiry height (must exceed --height)
        #[arg(long)]
        expiry: u64,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one certificate and its latest amendment
    Get {
        /// Certificate ID
        id: u64,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the next certificate id (one more than the number minted)
    Count {
        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a fingerprint has been claimed
    Exists {
        /// Fingerprint as hex (32 bytes)
        fingerprint: String,

        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded mint fee transfers
    Transfers {
        /// Path to registry journal
        #[arg(long, default_value = DEFAULT_JOURNAL_PATH)]
        journal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
