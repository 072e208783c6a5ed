use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use fanproxy_common::config::ProvisionConfig;
use fanproxy_common::error::{CollaboratorError, DiscoveryError};
use fanproxy_common::network::address::PublicIpv4;
use fanproxy_common::network::interface::InterfaceSource;
use fanproxy_common::node::RegistryRecord;
use fanproxy_common::report::NodeReporter;
use fanproxy_common::system::{EngineAction, SystemCollaborator};
use fanproxy_core::provision::Provisioner;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use std::net::Ipv4Addr;

pub const IFF_UP: u32 = 1;
pub const IFF_LOOPBACK: u32 = 1 << 3;

pub fn ni(name: &str, index: u32, ips: &[IpNetwork], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index,
        mac: None,
        ips: ips.to_vec(),
        flags,
    }
}

pub fn v4(a: u8, b: u8, c: u8, d: u8, p: u8) -> IpNetwork {
    IpNetwork::V4(Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap())
}

/// A host with loopback, a private address and the given public ones on eth0.
pub fn host_with(public: &[IpNetwork]) -> Vec<NetworkInterface> {
    let mut eth0_ips = vec![v4(10, 0, 0, 5, 24)];
    eth0_ips.extend_from_slice(public);
    vec![
        ni("lo", 1, &[v4(127, 0, 0, 1, 8)], IFF_UP | IFF_LOOPBACK),
        ni("eth0", 2, &eth0_ips, IFF_UP),
    ]
}

pub struct FixedInterfaces(pub Vec<NetworkInterface>);

impl InterfaceSource for FixedInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

#[derive(Clone, Default)]
pub struct RecordingSystem {
    pub calls: Rc<RefCell<Vec<EngineAction>>>,
    pub fail_on: Option<EngineAction>,
}

impl RecordingSystem {
    pub fn failing_on(action: EngineAction) -> Self {
        Self {
            fail_on: Some(action),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EngineAction> {
        self.calls.borrow().clone()
    }

    fn call(&self, action: EngineAction) -> Result<(), CollaboratorError> {
        self.calls.borrow_mut().push(action);
        if self.fail_on == Some(action) {
            return Err(CollaboratorError::new(action, "exit status: 1"));
        }
        Ok(())
    }
}

impl SystemCollaborator for RecordingSystem {
    fn install(&self) -> Result<(), CollaboratorError> {
        self.call(EngineAction::Install)
    }

    fn restart(&self) -> Result<(), CollaboratorError> {
        self.call(EngineAction::Restart)
    }

    fn enable(&self) -> Result<(), CollaboratorError> {
        self.call(EngineAction::Enable)
    }
}

#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub discovered: Rc<RefCell<Vec<PublicIpv4>>>,
    pub nodes: Rc<RefCell<Vec<RegistryRecord>>>,
}

impl NodeReporter for RecordingReporter {
    fn addresses_discovered(&self, addresses: &[PublicIpv4]) {
        self.discovered.borrow_mut().extend_from_slice(addresses);
    }

    fn node_provisioned(&self, record: &RegistryRecord) {
        self.nodes.borrow_mut().push(record.clone());
    }
}

pub fn config_in(dir: &Path) -> ProvisionConfig {
    ProvisionConfig {
        config_path: dir.join("etc").join("config.json"),
        registry_path: dir.join("socks.txt"),
        ..ProvisionConfig::default()
    }
}

pub fn provisioner(
    cfg: ProvisionConfig,
    interfaces: Vec<NetworkInterface>,
    system: &RecordingSystem,
    reporter: &RecordingReporter,
) -> Provisioner {
    Provisioner::new(
        cfg,
        Box::new(FixedInterfaces(interfaces)),
        Box::new(system.clone()),
        Box::new(reporter.clone()),
    )
}
