use crate::network::address::PublicIpv4;
use crate::node::RegistryRecord;

/// Operator-facing progress of a run.
///
/// `node_provisioned` fires once per node, as soon as the node is built and
/// recorded, so partial results are visible before the engine config exists.
pub trait NodeReporter {
    fn addresses_discovered(&self, addresses: &[PublicIpv4]);
    fn node_provisioned(&self, record: &RegistryRecord);
}

