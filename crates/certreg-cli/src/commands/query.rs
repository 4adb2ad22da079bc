use crate::support::{
    certificate_json, journal_display, load_registry_or_exit, parse_fingerprint_or_exit,
    print_json, yes_no,
};
use serde_json::{Value, json};

pub fn run_get(id: u64, journal: String, json_output: bool) {
    let (registry, path) = load_registry_or_exit(&journal);
    let cert = registry.get_certificate(id);
    let amendment = registry.amendment(id);

    if json_output {
        let amendment = amendment.map(|a| {
            json!({
                "updateScore": a.update_score,
                "updateExpiry": a.update_expiry,
                "updateTimestamp": a.update_timestamp,
                "updater": a.updater.as_str()
            })
        });
        print_json(&json!({
            "action": "certificate.get",
            "journalPath": journal_display(&path),
            "id": id,
            "found": cert.is_some(),
            "certificate": cert.map(certificate_json).unwrap_or(Value::Null),
            "amendment": amendment
        }));
        return;
    }

    let Some(cert) = cert else {
        println!("Certificate {id}: not found");
        return;
    };
    println!("Certificate {}", cert.id);
    println!("  issuer: {} ({})", cert.issuer_name, cert.issuer);
    println!("  recipient: {} ({})", cert.recipient_name, cert.recipient);
    println!("  test type: {} [{}]", cert.test_type, cert.category);
    println!(
        "  score: {} (band {}..{}, level {})",
        cert.score, cert.min_score, cert.max_score, cert.level
    );
    println!("  issued: {}", cert.issue_date);
    println!("  expires: {}", cert.expiry_date);
    println!("  location: {}", cert.location);
    println!("  language: {}", cert.language);
    println!("  currency: {}", cert.currency);
    println!("  fingerprint: {}", cert.fingerprint);
    println!("  active: {}", yes_no(cert.status));
    if let Some(a) = amendment {
        println!(
            "  last amendment: score {} expiry {} at {} by {}",
            a.update_score, a.update_expiry, a.update_timestamp, a.updater
        );
    }
}

pub fn run_count(journal: String, json_output: bool) {
    let (registry, path) = load_registry_or_exit(&journal);
    let count = registry.cert_count();

    if json_output {
        print_json(&json!({
            "action": "certificate.count",
            "journalPath": journal_display(&path),
            "count": count,
            "maxCerts": registry.max_certs(),
            "mintFee": registry.mint_fee(),
            "authority": registry.authority().map(|a| a.as_str())
        }));
    } else {
        println!("Certificate count: {count}");
    }
}

pub fn run_exists(fingerprint: String, journal: String, json_output: bool) {
    let fingerprint = parse_fingerprint_or_exit(&fingerprint);
    let (registry, path) = load_registry_or_exit(&journal);
    let exists = registry.check_existence(&fingerprint);

    if json_output {
        print_json(&json!({
            "action": "certificate.exists",
            "journalPath": journal_display(&path),
            "fingerprint": fingerprint.to_hex(),
            "exists": exists,
            "certificateId": registry.certificate_for(&fingerprint)
        }));
    } else {
        println!("Fingerprint {fingerprint}: {}", yes_no(exists));
    }
}

pub fn run_transfers(journal: String, json_output: bool) {
    let (registry, path) = load_registry_or_exit(&journal);
    let transfers = registry.fees().transfers();

    if json_output {
        let items = transfers
            .iter()
            .map(|t| {
                json!({
                    "amount": t.amount,
                    "from": t.from.as_str(),
                    "to": t.to.as_str()
                })
            })
            .collect::<Vec<_>>();
        print_json(&json!({
            "action": "fee.transfers",
            "journalPath": journal_display(&path),
            "count": items.len(),
            "items": items
        }));
        return;
    }

    if transfers.is_empty() {
        println!("No fee transfers.");
        return;
    }
    for t in transfers {
        println!("{} {} -> {}", t.amount, t.from, t.to);
    }
}
