//! # Public IPv4 Addresses
//!
//! A host may carry several globally routable IPv4 addresses. Each of them
//! becomes the egress address of exactly one node. Anything inside the
//! reserved blocks below is never used for egress:
//!
//! * `127.0.0.0/8` (loopback)
//! * `10.0.0.0/8`, `172.16.0.0/12`, `192.168.0.0/16` (private)
//! * `169.254.0.0/16` (link-local)

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// An IPv4 address known to be outside the reserved blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PublicIpv4(Ipv4Addr);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid IPv4 address: {0}")]
    Invalid(String),
    #[error("{0} is not a public address")]
    Reserved(Ipv4Addr),
}

/// Returns true if `ip` lies outside loopback, private and link-local space.
pub fn is_public(ip: &Ipv4Addr) -> bool {
    !(ip.is_loopback() || ip.is_private() || ip.is_link_local())
}

impl PublicIpv4 {
    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }
}

impl TryFrom<Ipv4Addr> for PublicIpv4 {
    type Error = AddressError;

    fn try_from(ip: Ipv4Addr) -> Result<Self, Self::Error> {
        if is_public(&ip) {
            Ok(Self(ip))
        } else {
            Err(AddressError::Reserved(ip))
        }
    }
}

impl FromStr for PublicIpv4 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ip: Ipv4Addr = s
            .parse()
            .map_err(|_| AddressError::Invalid(s.to_string()))?;
        Self::try_from(ip)
    }
}

impl From<PublicIpv4> for Ipv4Addr {
    fn from(addr: PublicIpv4) -> Self {
        addr.0
    }
}

impl fmt::Display for PublicIpv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
