#![cfg(test)]
use std::fs;

use fanproxy_common::error::{DiscoveryError, EntropyError, ProvisionError};
use fanproxy_common::system::EngineAction;
use fanproxy_core::credentials::EntropySource;
use fanproxy_core::registry::NodeRegistry;

use crate::support::{
    RecordingReporter, RecordingSystem, config_in, host_with, ni, provisioner, v4, IFF_UP,
};

struct Unavailable;

impl EntropySource for Unavailable {
    fn fill(&mut self, _buf: &mut [u8]) -> Result<(), EntropyError> {
        Err(EntropyError("no entropy".to_string()))
    }
}

#[test]
fn no_public_address_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();

    let err = provisioner(cfg.clone(), host_with(&[]), &system, &reporter)
        .run()
        .unwrap_err();

    assert!(matches!(err, ProvisionError::Discovery(DiscoveryError::NoUsableAddress)));
    assert_eq!(err.stage(), "discovery");
    assert!(!cfg.config_path.exists());
    assert!(!cfg.registry_path.exists());
    assert_eq!(system.calls(), vec![EngineAction::Install]);
    assert!(reporter.nodes.borrow().is_empty());
}

#[test]
fn install_failure_aborts_before_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::failing_on(EngineAction::Install);
    let reporter = RecordingReporter::default();

    let err = provisioner(cfg.clone(), host_with(&[v4(203, 0, 113, 7, 24)]), &system, &reporter)
        .run()
        .unwrap_err();

    assert_eq!(err.stage(), "engine");
    assert!(reporter.discovered.borrow().is_empty());
    assert!(!cfg.registry_path.exists());
    assert!(!cfg.config_path.exists());
}

#[test]
fn restart_failure_keeps_written_state_and_skips_enable() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::failing_on(EngineAction::Restart);
    let reporter = RecordingReporter::default();

    let err = provisioner(cfg.clone(), host_with(&[v4(203, 0, 113, 7, 24)]), &system, &reporter)
        .run()
        .unwrap_err();

    match err {
        ProvisionError::Collaborator(e) => assert_eq!(e.action, EngineAction::Restart),
        other => panic!("expected collaborator error, got {other:?}"),
    }
    assert_eq!(system.calls(), vec![EngineAction::Install, EngineAction::Restart]);
    assert!(cfg.config_path.exists());
    assert_eq!(NodeRegistry::new(&cfg.registry_path).records().unwrap().len(), 1);
}

#[test]
fn entropy_failure_stops_before_any_node() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_in(dir.path());
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();

    let err = provisioner(cfg.clone(), host_with(&[v4(203, 0, 113, 7, 24)]), &system, &reporter)
        .with_entropy(Box::new(Unavailable))
        .run()
        .unwrap_err();

    assert_eq!(err.stage(), "credentials");
    assert_eq!(fs::read_to_string(&cfg.registry_path).unwrap(), "");
    assert!(!cfg.config_path.exists());
    assert_eq!(system.calls(), vec![EngineAction::Install]);
}

#[test]
fn port_exhaustion_leaves_registry_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.base_port = 65535;
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();
    let interfaces = vec![ni("eth0", 2, &[v4(203, 0, 113, 7, 24), v4(198, 51, 100, 9, 24)], IFF_UP)];

    let err = provisioner(cfg.clone(), interfaces, &system, &reporter)
        .run()
        .unwrap_err();

    assert!(matches!(err, ProvisionError::PortExhaustion(_)));
    assert_eq!(fs::read_to_string(&cfg.registry_path).unwrap(), "");
    assert!(!cfg.config_path.exists());
}

#[test]
fn unwritable_registry_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    cfg.registry_path = dir.path().join("missing").join("socks.txt");
    let system = RecordingSystem::default();
    let reporter = RecordingReporter::default();

    let err = provisioner(cfg.clone(), host_with(&[v4(203, 0, 113, 7, 24)]), &system, &reporter)
        .run()
        .unwrap_err();

    assert_eq!(err.stage(), "registry");
    assert!(!cfg.config_path.exists());
}
