//! Custom policy example.
//!
//! This example shows how to:
//! - Extend the built-in policies with extra checks
//! - Load an engine configuration from JSON
//! - Run the engine between a file source and a file sink
//!
//! Run with: cargo run --example custom_policy

use cloudaudit::policy::nsg::critical_ports;
use cloudaudit::prelude::*;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Cloudaudit Custom Policy Example ===\n");

    // Block WinRM as well, and treat it as a critical port
    let vm_policy = VmPolicy::baseline().with_check(
        PolicyCheck::new("block_winrm", VmCheck::port_blocked("5985"))
            .expect_flag(true)
            .with_description("An attached NSG denies inbound WinRM"),
    );

    let mut ports = critical_ports();
    ports.push("5985".to_string());
    let nsg_policy = NsgPolicy::new("strict-nsg")
        .with_check(
            PolicyCheck::new(
                "permissive_rules_count",
                NsgCheck::permissive_count(ports.clone()),
            )
            .expect_at_most(0),
        )
        .with_check(PolicyCheck::new(
            "permissive rules details",
            NsgCheck::permissive_details(ports),
        ));

    let engine = ComplianceEngine::builder()
        .with_vm_policy(vm_policy)
        .with_nsg_policy(nsg_policy)
        .build()?;

    // The same configuration can be written out and loaded back
    let config_json = serde_json::to_string_pretty(engine.config())?;
    let config = EngineConfig::from_json_str(&config_json)?;
    println!("Configured VM checks: {:?}", config.policies.virtual_machine.field_names());

    let dir = std::env::temp_dir().join("cloudaudit-demo");
    std::fs::create_dir_all(&dir)?;
    let input = dir.join("azure_resources.json");
    let output = dir.join("compliance_report.json");

    let resources = json!([
        {
            "type": "Virtual Machine",
            "name": "win-vm",
            "resource_group": "rg-win",
            "tags": {"environment": "dev", "owner": "ops"}
        },
        {
            "type": "Network Security Group",
            "name": "win-nsg",
            "resource_group": "rg-win",
            "inbound_rules": [{
                "name": "allow-winrm",
                "access": "Allow",
                "direction": "Inbound",
                "source_address_prefix": "*",
                "destination_port_range": "5985"
            }]
        }
    ]);
    std::fs::write(&input, serde_json::to_vec_pretty(&resources)?)?;

    let summary = engine.run(&JsonFileSource::new(&input), &JsonFileSink::new(&output))?;

    println!("Non-compliant resources: {}", summary.non_compliant);
    println!("Report written to {}", output.display());
    println!("\n{}", std::fs::read_to_string(&output)?);

    Ok(())
}
