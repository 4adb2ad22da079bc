//! certreg CLI: the `certreg` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("certreg_core=debug,certreg=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, config, json } => commands::init::run(path, config, json),

        Commands::SetAuthority {
            principal,
            journal,
            json,
        } => commands::admin::run_set_authority(principal, journal, json),

        Commands::SetFee {
            amount,
            journal,
            json,
        } => commands::admin::run_set_fee(amount, journal, json),

        Commands::Mint {
            caller,
            height,
            recipient,
            test_type,
            score,
            fingerprint,
            evidence,
            expiry,
            level,
            issuer_name,
            recipient_name,
            location,
            currency,
            min_score,
            max_score,
            language,
            category,
            journal,
            json,
        } => commands::mint::run(commands::mint::Args {
            caller,
            height,
            recipient,
            test_type,
            score,
            fingerprint,
            evidence,
            expiry,
            level,
            issuer_name,
            recipient_name,
            location,
            currency,
            min_score,
            max_score,
            language,
            category,
            journal,
            json,
        }),

        Commands::Update {
            id,
            caller,
            height,
            score,
            expiry,
            journal,
            json,
        } => commands::update::run(id, caller, height, score, expiry, journal, json),

        Commands::Get { id, journal, json } => commands::query::run_get(id, journal, json),

        Commands::Count { journal, json } => commands::query::run_count(journal, json),

        Commands::Exists {
            fingerprint,
            journal,
            json,
        } => commands::query::run_exists(fingerprint, journal, json),

        Commands::Transfers { journal, json } => commands::query::run_transfers(journal, json),
    }
}
