use std::collections::HashSet;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::debug;

use crate::error::DiscoveryError;
use crate::network::address::PublicIpv4;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is administratively down.
    IsDown,
    /// The interface is a loopback device.
    IsLoopback,
    /// The interface has no IPv4 address bound.
    NoIpv4,
}

/// Where interface listings come from.
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, DiscoveryError>;
}

/// Reads the host's interfaces through pnet.
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, DiscoveryError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        if interfaces.is_empty() {
            return Err(DiscoveryError::Enumeration);
        }
        debug!("Identified {} network interface(s)", interfaces.len());
        Ok(interfaces)
    }
}

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Enumerates every public IPv4 address bound to an up, non-loopback interface.
///
/// Order follows interface enumeration, then address order within each
/// interface. An address bound twice is reported once. The result may be
/// empty; deciding whether that is fatal is up to the caller.
pub fn discover(source: &dyn InterfaceSource) -> Result<Vec<PublicIpv4>, DiscoveryError> {
    let interfaces: Vec<NetworkInterface> = source.interfaces()?;
    Ok(public_ipv4_addresses(&interfaces))
}

pub fn public_ipv4_addresses(interfaces: &[NetworkInterface]) -> Vec<PublicIpv4> {
    let mut seen: HashSet<PublicIpv4> = HashSet::new();

    interfaces
        .iter()
        .filter(|interface| match is_viable_egress_interface(interface) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping interface {}: {:?}", interface.name, reason);
                false
            }
        })
        .flat_map(|interface| interface.get_ipv4_nets())
        .filter_map(|net| PublicIpv4::try_from(net.ip()).ok())
        .filter(|addr| seen.insert(*addr))
        .collect()
}

fn is_viable_egress_interface(interface: &NetworkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if interface.get_ipv4_nets().is_empty() {
        return Err(ViabilityError::NoIpv4);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
