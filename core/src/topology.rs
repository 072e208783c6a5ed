use tracing::debug;

use fanproxy_common::engine::{ListenerOptions, OutboundProtocol, RoutingTriple, Topology};
use fanproxy_common::error::{PortExhaustionError, ProvisionError};
use fanproxy_common::network::address::PublicIpv4;
use fanproxy_common::node::Node;

use crate::credentials::{CredentialGenerator, EntropySource};

/// Port of the node at `index`, counting up from `base`.
pub fn port_for(base: u16, index: usize) -> Result<u16, PortExhaustionError> {
    u16::try_from(index)
        .ok()
        .and_then(|offset| base.checked_add(offset))
        .filter(|port| *port != 0)
        .ok_or(PortExhaustionError { base, index })
}

/// Turns public addresses into nodes and their routing triples.
pub struct TopologyBuilder<E> {
    credentials: CredentialGenerator<E>,
    base_port: u16,
    listener: ListenerOptions,
    protocol: OutboundProtocol,
}

impl<E: EntropySource> TopologyBuilder<E> {
    pub fn new(credentials: CredentialGenerator<E>, base_port: u16) -> Self {
        Self {
            credentials,
            base_port,
            listener: ListenerOptions::default(),
            protocol: OutboundProtocol::default(),
        }
    }

    pub fn with_listener(mut self, listener: ListenerOptions) -> Self {
        self.listener = listener;
        self
    }

    pub fn build(&mut self, addresses: &[PublicIpv4]) -> Result<Topology, ProvisionError> {
        self.build_with(addresses, |_| Ok(()))
    }

    /// Builds one node per address, in order, calling `on_node` for each
    /// before moving to the next address.
    ///
    /// The whole port range is checked before the first node is built, so an
    /// oversized address list fails without side effects.
    pub fn build_with<F>(
        &mut self,
        addresses: &[PublicIpv4],
        mut on_node: F,
    ) -> Result<Topology, ProvisionError>
    where
        F: FnMut(&Node) -> Result<(), ProvisionError>,
    {
        if let Some(last) = addresses.len().checked_sub(1) {
            port_for(self.base_port, last)?;
        }

        let mut topology = Topology::new();

        for (index, address) in addresses.iter().enumerate() {
            let port: u16 = port_for(self.base_port, index)?;
            debug!("Configuring {} on port {}", address, port);

            let credential = self.credentials.credential()?;
            let node = Node::new(*address, port, credential);

            topology.push(RoutingTriple::from_node(&node, self.listener, self.protocol.clone()));
            on_node(&node)?;
        }

        Ok(topology)
    }
}
