//! End-to-end report scenarios through the public API.

use cloudaudit::io::{JsonFileSink, JsonFileSource, JsonWriterSink, StaticSource};
use cloudaudit::policy::nsg::critical_ports;
use cloudaudit::prelude::*;
use serde_json::{json, Value};

fn records(value: Value) -> Vec<ResourceRecord> {
    serde_json::from_value(value).unwrap()
}

fn report_json(engine: &ComplianceEngine, input: Value) -> Value {
    let evaluation = engine.evaluate(&records(input));
    serde_json::to_value(&evaluation.report).unwrap()
}

#[test]
fn test_storage_account_scenario() {
    let report = report_json(
        &ComplianceEngine::new(),
        json!([{
            "type": "Storage Account",
            "name": "sa1",
            "encryption_enabled": true,
            "secure_transfer_required": false
        }]),
    );

    assert_eq!(
        report,
        json!({
            "storage_accounts": [{
                "name": "sa1",
                "compliance": {"encryption_enabled": true, "secure_transfer_required": false}
            }],
            "virtual_machines": [],
            "network_security_groups": []
        })
    );
}

#[test]
fn test_storage_flags_require_strict_true() {
    let engine = ComplianceEngine::new();
    let evaluation = engine.evaluate(&records(json!([
        {"type": "Storage Account", "name": "one", "encryption_enabled": 1, "secure_transfer_required": "true"},
        {"type": "Storage Account", "name": "null", "encryption_enabled": null},
        {"type": "Storage Account"}
    ])));

    for entry in &evaluation.report.storage_accounts {
        assert_eq!(entry.compliance.flag("encryption_enabled"), Some(false));
        assert_eq!(entry.compliance.flag("secure_transfer_required"), Some(false));
    }
    assert_eq!(evaluation.report.storage_accounts[2].name, None);
}

#[test]
fn test_virtual_machine_scenario() {
    let report = report_json(
        &ComplianceEngine::new(),
        json!([
            {"type": "Virtual Machine", "name": "vm1", "resource_group": "rg1", "tags": {}, "public_ips": []},
            {"type": "Network Security Group", "name": "nsg1", "resource_group": "rg1", "inbound_rules": [
                {"name": "deny-ssh", "access": "Deny", "direction": "Inbound", "destination_port_range": "22"}
            ]}
        ]),
    );

    assert_eq!(
        report["virtual_machines"][0],
        json!({
            "name": "vm1",
            "compliance": {
                "environment_tags": false,
                "owner_tag": false,
                "has_public_ips": false,
                "block_rdp": false,
                "block_ssh": true
            }
        })
    );
}

#[test]
fn test_deny_on_port_wins_over_allow_in_same_group() {
    let evaluation = ComplianceEngine::new().evaluate(&records(json!([
        {"type": "Virtual Machine", "name": "vm1", "resource_group": "rg1"},
        {"type": "Network Security Group", "name": "nsg1", "resource_group": "rg1", "inbound_rules": [
            {"name": "allow-ssh", "access": "Allow", "direction": "Inbound",
             "source_address_prefix": "*", "destination_port_range": "22"},
            {"name": "deny-ssh", "access": "Deny", "direction": "Inbound",
             "source_address_prefix": "*", "destination_port_range": "22"}
        ]}
    ])));

    let vm = &evaluation.report.virtual_machines[0].compliance;
    assert_eq!(vm.flag("block_ssh"), Some(true));
    assert_eq!(vm.flag("block_rdp"), Some(false));

    let nsg = &evaluation.report.network_security_groups[0].compliance;
    assert_eq!(nsg.count("permissive_rules_count"), Some(1));
}

#[test]
fn test_virtual_machine_field_order() {
    let engine = ComplianceEngine::new();
    let evaluation = engine.evaluate(&records(json!([{"type": "Virtual Machine", "name": "vm1"}])));

    let text = serde_json::to_string(&evaluation.report).unwrap();
    let positions: Vec<usize> = [
        "environment_tags",
        "owner_tag",
        "has_public_ips",
        "block_rdp",
        "block_ssh",
    ]
    .iter()
    .map(|field| text.find(field).unwrap())
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_network_security_group_scenario() {
    let report = report_json(
        &ComplianceEngine::new(),
        json!([{
            "type": "Network Security Group",
            "name": "nsg1",
            "inbound_rules": [
                {"name": "r1", "access": "Allow", "direction": "Inbound",
                 "source_address_prefix": "*", "destination_port_range": "80"},
                {"name": "r2", "access": "Allow", "direction": "Outbound",
                 "source_address_prefix": "*", "destination_port_range": "22"},
                {"name": "r3", "access": "Allow", "direction": "Inbound",
                 "source_address_prefix": "*", "destination_port_range": "8080"}
            ]
        }]),
    );

    assert_eq!(
        report["network_security_groups"][0]["compliance"],
        json!({
            "permissive_rules_count": 1,
            "permissive rules details": [
                {"name": "r1", "source_address": "*", "destination_port": "80"}
            ]
        })
    );
}

#[test]
fn test_grouping_is_a_partition() {
    let input = json!([
        {"type": "Storage Account", "name": "sa1"},
        {"type": "Resource Group", "name": "rg1"},
        {"type": "Virtual Machine", "name": "vm1"},
        {"name": "untyped"},
        "not an object",
        {"type": "Network Security Group", "name": "nsg1"},
        {"type": "Storage Account", "name": "sa2"}
    ]);
    let evaluation = ComplianceEngine::new().evaluate(&records(input));

    let report = &evaluation.report;
    let names = |entries: &[ReportEntry]| -> Vec<Option<String>> {
        entries.iter().map(|e| e.name.clone()).collect()
    };
    assert_eq!(
        names(&report.storage_accounts),
        vec![Some("sa1".to_string()), Some("sa2".to_string())]
    );
    assert_eq!(names(&report.virtual_machines), vec![Some("vm1".to_string())]);
    assert_eq!(names(&report.network_security_groups), vec![Some("nsg1".to_string())]);
    assert_eq!(report.len(), 4);
    assert_eq!(evaluation.summary.ignored_count(), 3);

    let value = serde_json::to_value(report).unwrap();
    assert_eq!(value.as_object().map(|o| o.len()), Some(3));
}

#[test]
fn test_evaluation_is_idempotent() {
    let input = json!([
        {"type": "Virtual Machine", "name": "vm1", "resource_group": "rg1",
         "tags": {"owner": "ops"}, "public_ips": ["10.0.0.4"]},
        {"type": "Network Security Group", "name": "nsg1", "resource_group": "rg1", "inbound_rules": [
            {"name": "open-rdp", "access": "Allow", "direction": "Inbound",
             "source_address_prefix": "*", "destination_port_range": "3389"}
        ]},
        {"type": "Storage Account", "name": "sa1", "encryption_enabled": true}
    ]);

    let engine = ComplianceEngine::new();
    let first = engine.evaluate(&records(input.clone())).report.to_json_pretty().unwrap();
    let second = engine.evaluate(&records(input)).report.to_json_pretty().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unset_resource_group_option() {
    let input = json!([
        {"type": "Virtual Machine", "name": "vm1"},
        {"type": "Network Security Group", "name": "nsg1", "inbound_rules": [
            {"name": "deny-ssh", "access": "Deny", "direction": "Inbound", "destination_port_range": "22"}
        ]}
    ]);

    let strict = ComplianceEngine::new().evaluate(&records(input.clone()));
    assert_eq!(
        strict.report.virtual_machines[0].compliance.flag("block_ssh"),
        Some(false)
    );

    let loose = ComplianceEngine::builder()
        .match_unset_resource_group(true)
        .build()
        .unwrap()
        .evaluate(&records(input));
    assert_eq!(
        loose.report.virtual_machines[0].compliance.flag("block_ssh"),
        Some(true)
    );
}

#[test]
fn test_custom_policy_changes_fields() {
    let mut ports = critical_ports();
    ports.push("5985".to_string());

    let engine = ComplianceEngine::builder()
        .with_vm_policy(
            VmPolicy::new("winrm-only").with_check(
                PolicyCheck::new("block_winrm", VmCheck::port_blocked("5985")).expect_flag(true),
            ),
        )
        .with_nsg_policy(
            NsgPolicy::new("extended").with_check(
                PolicyCheck::new("open_ports", NsgCheck::permissive_count(ports)).expect_at_most(0),
            ),
        )
        .build()
        .unwrap();

    let report = report_json(
        &engine,
        json!([
            {"type": "Virtual Machine", "name": "vm1", "resource_group": "rg1"},
            {"type": "Network Security Group", "name": "nsg1", "resource_group": "rg1", "inbound_rules": [
                {"name": "open-winrm", "access": "Allow", "direction": "Inbound",
                 "source_address_prefix": "*", "destination_port_range": "5985"}
            ]}
        ]),
    );

    assert_eq!(report["virtual_machines"][0]["compliance"], json!({"block_winrm": false}));
    assert_eq!(report["network_security_groups"][0]["compliance"], json!({"open_ports": 1}));
}

#[test]
fn test_policy_config_from_json() {
    let config = EngineConfig::from_json_str(
        r#"{
            "match_unset_resource_group": true,
            "policies": {
                "storage_account": {
                    "name": "encryption-only",
                    "checks": [{
                        "field": "encrypted",
                        "check": {"type": "flag_enabled", "flag": "encryption_enabled"},
                        "expect": true
                    }]
                }
            }
        }"#,
    )
    .unwrap();

    let engine = ComplianceEngine::builder().with_config(config).build().unwrap();
    let report = report_json(
        &engine,
        json!([{"type": "Storage Account", "name": "sa1", "encryption_enabled": true}]),
    );

    assert_eq!(report["storage_accounts"][0]["compliance"], json!({"encrypted": true}));
    assert_eq!(engine.policies().virtual_machine.enabled_count(), 5);
}

#[test]
fn test_run_between_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("azure_resources.json");
    let output = dir.path().join("compliance_report.json");
    std::fs::write(
        &input,
        json!([{"type": "Storage Account", "name": "sa1", "encryption_enabled": true}]).to_string(),
    )
    .unwrap();

    let summary = ComplianceEngine::new()
        .run(&JsonFileSource::new(&input), &JsonFileSink::new(&output))
        .unwrap();
    assert_eq!(summary.non_compliant, 1);

    let written: ComplianceReport =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.storage_accounts[0].name.as_deref(), Some("sa1"));
}

#[test]
fn test_run_with_unreadable_input_writes_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("compliance_report.json");

    let err = ComplianceEngine::new()
        .run(
            &JsonFileSource::new(dir.path().join("missing.json")),
            &JsonFileSink::new(&output),
        )
        .unwrap_err();

    assert!(err.is_input_error());
    assert!(!output.exists());
}

#[test]
fn test_run_rejects_non_array_document() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("resources.json");
    std::fs::write(&input, r#"{"type": "Storage Account"}"#).unwrap();

    let sink = JsonWriterSink::new("buffer", Vec::new());
    let err = ComplianceEngine::new()
        .run(&JsonFileSource::new(&input), &sink)
        .unwrap_err();

    assert!(matches!(err, ComplianceError::ParseFailed { .. }));
    assert!(sink.into_inner().is_empty());
}

#[test]
fn test_empty_input_gives_empty_groups() {
    let source = StaticSource::default();
    let sink = JsonWriterSink::new("buffer", Vec::new());

    let summary = ComplianceEngine::new().run(&source, &sink).unwrap();
    assert!(summary.is_compliant());

    let report: Value = serde_json::from_slice(&sink.into_inner()).unwrap();
    assert_eq!(
        report,
        json!({"storage_accounts": [], "virtual_machines": [], "network_security_groups": []})
    );
}
