//! Basic report example demonstrating a single evaluation pass.
//!
//! This example shows how to:
//! - Turn raw JSON into resource records
//! - Evaluate them with the built-in policies
//! - Inspect verdicts and write the report
//!
//! Run with: cargo run --example basic_report

use cloudaudit::prelude::*;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Cloudaudit Basic Report Example ===\n");

    // A snapshot as produced by an inventory collector
    let source = StaticSource::from_values(vec![
        json!({
            "type": "Storage Account",
            "name": "sa1",
            "location": "westeurope",
            "resource_group": "rg1",
            "encryption_enabled": true,
            "secure_transfer_required": false
        }),
        json!({
            "type": "Virtual Machine",
            "name": "vm1",
            "resource_group": "rg1",
            "tags": {"environment": "prod"},
            "public_ips": ["52.0.0.1"]
        }),
        json!({
            "type": "Network Security Group",
            "name": "nsg1",
            "resource_group": "rg1",
            "inbound_rules": [
                {
                    "name": "deny-ssh",
                    "access": "Deny",
                    "direction": "Inbound",
                    "protocol": "Tcp",
                    "source_address_prefix": "*",
                    "destination_port_range": "22"
                },
                {
                    "name": "allow-http",
                    "access": "Allow",
                    "direction": "Inbound",
                    "protocol": "Tcp",
                    "source_address_prefix": "*",
                    "destination_port_range": "80"
                }
            ]
        }),
        json!({"type": "Resource Group", "name": "rg1"}),
    ]);

    let engine = ComplianceEngine::new();
    let records = source.load()?;
    let Evaluation { report, summary } = engine.evaluate(&records);

    println!("Run ID: {}", summary.run_id);
    println!("Records: {}", summary.total_records);
    println!("Evaluated: {}", summary.evaluated_count());
    println!("Ignored: {}", summary.ignored_count());

    println!("\n=== Findings ===");
    for (kind, entry) in report.entries() {
        let name = entry.name.as_deref().unwrap_or("<unnamed>");
        if entry.is_compliant() {
            println!("✅ {} {}", kind, name);
        } else {
            println!(
                "❌ {} {}: {}",
                kind,
                name,
                entry.compliance.failing_fields().join(", ")
            );
        }
    }

    println!("\n=== Report ===");
    let sink = JsonWriterSink::new("stdout", std::io::stdout());
    sink.write(&report)?;

    Ok(())
}
