//! # Provisioning Run
//!
//! Orchestrates one end-to-end run:
//! 1. install the engine,
//! 2. discover public IPv4 addresses,
//! 3. make sure the node registry exists,
//! 4. build the topology, recording and reporting each node as it is built,
//! 5. write the engine configuration,
//! 6. restart, then enable, the engine service.
//!
//! The run is strictly sequential and stops at the first error. Nothing is
//! rolled back: registry lines appended before a failure stay on disk.

use std::path::PathBuf;

use tracing::info;

use fanproxy_common::config::ProvisionConfig;
use fanproxy_common::engine::ListenerOptions;
use fanproxy_common::error::{DiscoveryError, ProvisionError};
use fanproxy_common::network::address::PublicIpv4;
use fanproxy_common::network::interface::{self, InterfaceSource};
use fanproxy_common::node::RegistryRecord;
use fanproxy_common::report::NodeReporter;
use fanproxy_common::system::SystemCollaborator;

use crate::credentials::{CredentialGenerator, EntropySource, OsEntropy};
use crate::registry::NodeRegistry;
use crate::serializer;
use crate::topology::TopologyBuilder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSummary {
    pub nodes: usize,
    pub config_path: PathBuf,
    pub registry_path: PathBuf,
}

pub struct Provisioner {
    config: ProvisionConfig,
    interfaces: Box<dyn InterfaceSource>,
    system: Box<dyn SystemCollaborator>,
    reporter: Box<dyn NodeReporter>,
    entropy: Box<dyn EntropySource>,
}

impl Provisioner {
    pub fn new(
        config: ProvisionConfig,
        interfaces: Box<dyn InterfaceSource>,
        system: Box<dyn SystemCollaborator>,
        reporter: Box<dyn NodeReporter>,
    ) -> Self {
        Self {
            config,
            interfaces,
            system,
            reporter,
            entropy: Box::new(OsEntropy),
        }
    }

    pub fn with_entropy(mut self, entropy: Box<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn run(&mut self) -> Result<ProvisionSummary, ProvisionError> {
        self.system.install()?;

        let addresses: Vec<PublicIpv4> = interface::discover(self.interfaces.as_ref())?;
        if addresses.is_empty() {
            return Err(DiscoveryError::NoUsableAddress.into());
        }
        info!("Found {} public IPv4 address(es)", addresses.len());
        self.reporter.addresses_discovered(&addresses);

        let registry = NodeRegistry::new(&self.config.registry_path);
        registry.ensure_store()?;

        let listener = ListenerOptions {
            listen_ip: self.config.listen_ip,
            udp: self.config.udp,
        };
        let credentials = CredentialGenerator::new(&mut self.entropy, self.config.credential_length);
        let reporter: &dyn NodeReporter = self.reporter.as_ref();

        let topology = TopologyBuilder::new(credentials, self.config.base_port)
            .with_listener(listener)
            .build_with(&addresses, |node| {
                let record = RegistryRecord::from(node);
                reporter.node_provisioned(&record);
                registry.append(&record)?;
                Ok(())
            })?;

        serializer::write_config(&topology, &self.config.config_path)?;

        self.system.restart()?;
        self.system.enable()?;
        info!("Engine service restarted");

        Ok(ProvisionSummary {
            nodes: topology.len(),
            config_path: self.config.config_path.clone(),
            registry_path: self.config.registry_path.clone(),
        })
    }
}
