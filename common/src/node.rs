//! # Nodes
//!
//! A node is one provisioned listener: a port, a credential pair and the
//! public address its traffic leaves through. Ports are unique within a run.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::network::address::PublicIpv4;

/// Username/password pair guarding one listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub address: PublicIpv4,
    pub port: u16,
    pub credential: Credential,
}

impl Node {
    pub fn new(address: PublicIpv4, port: u16, credential: Credential) -> Self {
        Self {
            address,
            port,
            credential,
        }
    }

    pub fn inbound_tag(&self) -> String {
        format!("in-{}", self.port)
    }

    pub fn outbound_tag(&self) -> String {
        format!("out-{}", self.port)
    }
}

/// One line of the node registry: `address port username password`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryRecord {
    pub address: PublicIpv4,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("bad address: {0}")]
    Address(String),
    #[error("bad port: {0}")]
    Port(String),
}

impl From<&Node> for RegistryRecord {
    fn from(node: &Node) -> Self {
        Self {
            address: node.address,
            port: node.port,
            username: node.credential.username.clone(),
            password: node.credential.password.clone(),
        }
    }
}

impl fmt::Display for RegistryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.address, self.port, self.username, self.password
        )
    }
}

impl FromStr for RegistryRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        let [address, port, username, password] = &fields[..] else {
            return Err(RecordParseError::FieldCount(fields.len()));
        };

        Ok(Self {
            address: address
                .parse()
                .map_err(|_| RecordParseError::Address(address.to_string()))?,
            port: port
                .parse()
                .map_err(|_| RecordParseError::Port(port.to_string()))?,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}
