use crate::support::{exit_with_journal_error, print_json};
use certreg_core::{CallContext, mutate_journal};
use serde_json::json;

pub fn run(
    id: u64,
    caller: String,
    height: u64,
    score: i64,
    expiry: u64,
    journal: String,
    json_output: bool,
) {
    let ctx = CallContext::new(caller, height);
    let amendment = mutate_journal(&journal, |registry| registry.update(&ctx, id, score, expiry))
        .unwrap_or_else(|e| exit_with_journal_error(e));

    if json_output {
        print_json(&json!({
            "action": "certificate.update",
            "journalPath": journal,
            "amendment": {
                "certificateId": amendment.certificate_id,
                "updateScore": amendment.update_score,
                "updateExpiry": amendment.update_expiry,
                "updateTimestamp": amendment.update_timestamp,
                "updater": amendment.updater.as_str()
            }
        }));
    } else {
        println!("Updated certificate: {}", amendment.certificate_id);
        println!("  score: {}", amendment.update_score);
        println!("  expiry: {}", amendment.update_expiry);
    }
}
