use crate::support::{exit_with_journal_error, print_json};
use certreg_core::{Principal, mutate_journal};
use serde_json::json;

pub fn run_set_authority(principal: String, journal: String, json_output: bool) {
    let authority = Principal::new(principal);
    mutate_journal(&journal, |registry| registry.set_authority(authority.clone()))
        .unwrap_or_else(|e| exit_with_journal_error(e));

    if json_output {
        print_json(&json!({
            "action": "registry.set_authority",
            "journalPath": journal,
            "authority": authority.as_str()
        }));
    } else {
        println!("Authority set: {authority}");
    }
}

pub fn run_set_fee(amount: i64, journal: String, json_output: bool) {
    let fee = mutate_journal(&journal, |registry| {
        registry.set_fee(amount)?;
        Ok(registry.mint_fee())
    })
    .unwrap_or_else(|e| exit_with_journal_error(e));

    if json_output {
        print_json(&json!({
            "action": "registry.set_fee",
            "journalPath": journal,
            "mintFee": fee
        }));
    } else {
        println!("Mint fee set: {fee}");
    }
}
