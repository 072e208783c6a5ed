#![cfg(test)]
use std::fs;

use fanproxy_common::node::RegistryRecord;
use fanproxy_common::system::EngineAction;
use fanproxy_core::registry::NodeRegistry;
use serde_json::Value;

use crate::support::{
    RecordingReporter, RecordingSystem, config_in, host_with, ni, provisioner, v4, IFF_UP,
};

fn read_config(path: &std::path::Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn two_public_addresses_become_two_linked_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    let interfaces = host_with(&[v4(203, 0, 113, 7, 24), v4(198, 51, 100, 9, 24)]);

    let summary = provisioner(cfg.clone(), interfaces, &system, &reporter)
        .run()
        .unwrap();

    assert_eq!(summary.nodes, 2);
    assert_eq!(
        system.calls(),
        vec![EngineAction::Install, EngineAction::Restart, EngineAction::Enable]
    );

    let doc = read_config(&cfg.config_path);
    assert_eq!(doc["inbounds"][0]["port"], 10001);
    assert_eq!(doc["inbounds"][1]["port"], 10002);
    assert_eq!(doc["outbounds"][0]["sendThrough"], "203.0.113.7");
    assert_eq!(doc["outbounds"][1]["sendThrough"], "198.51.100.9");
    assert_eq!(doc["routing"]["rules"][0]["inboundTag"][0], "in-10001");
    assert_eq!(doc["routing"]["rules"][0]["outboundTag"], "out-10001");
    assert_eq!(doc["routing"]["rules"][1]["inboundTag"][0], "in-10002");
    assert_eq!(doc["routing"]["rules"][1]["outboundTag"], "out-10002");
}

#[test]
fn registry_console_and_config_agree() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    let interfaces = host_with(&[v4(203, 0, 113, 7, 24), v4(198, 51, 100, 9, 24)]);

    provisioner(cfg.clone(), interfaces, &system, &reporter)
        .run()
        .unwrap();

    let recorded: Vec<RegistryRecord> = NodeRegistry::new(&cfg.registry_path).records().unwrap();
    let reported: Vec<RegistryRecord> = reporter.nodes.borrow().clone();
    assert_eq!(recorded, reported);

    let discovered: Vec<String> = reporter
        .discovered
        .borrow()
        .iter()
        .map(|a| a.to_string())
        .collect();
    assert_eq!(discovered, vec!["203.0.113.7", "198.51.100.9"]);

    let doc = read_config(&cfg.config_path);
    for (idx, record) in recorded.iter().enumerate() {
        let account = &doc["inbounds"][idx]["settings"]["accounts"][0];
        assert_eq!(account["user"], record.username.as_str());
        assert_eq!(account["pass"], record.password.as_str());
        assert_eq!(doc["inbounds"][idx]["port"], record.port);
        assert_eq!(record.username.len(), 8);
        assert_eq!(record.password.len(), 8);
    }
}

#[test]
fn rerun_appends_registry_but_replaces_config() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    let public = [v4(203, 0, 113, 7, 24), v4(198, 51, 100, 9, 24), v4(8, 8, 4, 4, 24)];

    for _ in 0..2 {
        provisioner(cfg.clone(), host_with(&public), &system, &reporter)
            .run()
            .unwrap();
    }

    let recorded = NodeRegistry::new(&cfg.registry_path).records().unwrap();
    assert_eq!(recorded.len(), 6);

    let doc = read_config(&cfg.config_path);
    assert_eq!(doc["inbounds"].as_array().unwrap().len(), 3);
    assert_eq!(doc["outbounds"].as_array().unwrap().len(), 3);
    assert_eq!(doc["routing"]["rules"].as_array().unwrap().len(), 3);

    let latest: Vec<&RegistryRecord> = recorded.iter().skip(3).collect();
    assert_eq!(
        doc["inbounds"][0]["settings"]["accounts"][0]["user"],
        latest[0].username.as_str()
    );
}

#[test]
fn existing_registry_lines_survive() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    fs::write(&cfg.registry_path, "192.0.2.10 10001 oldUser1 oldPass1\n").unwrap();

    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    provisioner(cfg.clone(), host_with(&[v4(203, 0, 113, 7, 24)]), &system, &reporter)
        .run()
        .unwrap();

    let content = fs::read_to_string(&cfg.registry_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "192.0.2.10 10001 oldUser1 oldPass1");
    assert!(lines[1].starts_with("203.0.113.7 10001 "));
}

#[test]
fn custom_base_port_and_listener_flow_through() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.base_port = 30000;
    cfg.udp = false;
    cfg.listen_ip = "127.0.0.1".parse().unwrap();

    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    let interfaces = vec![
        ni("eth0", 2, &[v4(203, 0, 113, 7, 24)], IFF_UP),
        ni("eth1", 3, &[v4(198, 51, 100, 9, 24)], IFF_UP),
    ];
    provisioner(cfg.clone(), interfaces, &system, &reporter)
        .run()
        .unwrap();

    let doc = read_config(&cfg.config_path);
    assert_eq!(doc["inbounds"][0]["port"], 30000);
    assert_eq!(doc["inbounds"][1]["port"], 30001);
    assert_eq!(doc["inbounds"][0]["settings"]["udp"], false);
    assert_eq!(doc["inbounds"][0]["settings"]["ip"], "127.0.0.1");
    assert_eq!(doc["outbounds"][1]["tag"], "out-30001");
}
