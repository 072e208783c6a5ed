//! # Engine Configuration Model
//!
//! The engine-facing projection of provisioned nodes. Each node becomes a
//! [`RoutingTriple`]: a SOCKS inbound, an outbound pinned to the node's
//! public address, and a rule binding the two. All three tags derive from
//! the node's port and nothing else.
//!
//! Field names match the engine's JSON schema (`streamSettings`,
//! `sendThrough`, `inboundTag`, ...).

use std::net::Ipv4Addr;

use serde::Serialize;

use crate::network::address::PublicIpv4;
use crate::node::Node;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineConfig {
    pub inbounds: Vec<Inbound>,
    pub outbounds: Vec<Outbound>,
    pub routing: Routing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routing {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    pub port: u16,
    pub protocol: InboundProtocol,
    pub settings: InboundSettings,
    pub stream_settings: StreamSettings,
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InboundProtocol {
    Socks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundSettings {
    pub auth: AuthMethod,
    pub accounts: Vec<Account>,
    pub udp: bool,
    pub ip: Ipv4Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSettings {
    pub network: Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Tcp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    #[serde(flatten)]
    pub protocol: OutboundProtocol,
    pub send_through: PublicIpv4,
    pub tag: String,
}

/// Outbound protocol and its settings, rendered as `protocol` + `settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "protocol", content = "settings", rename_all = "lowercase")]
pub enum OutboundProtocol {
    /// Direct egress; the engine takes no settings for it.
    Freedom(FreedomSettings),
}

impl Default for OutboundProtocol {
    fn default() -> Self {
        OutboundProtocol::Freedom(FreedomSettings {})
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreedomSettings {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub inbound_tag: Vec<String>,
    pub outbound_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Field,
}

/// How the SOCKS listeners are exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    pub listen_ip: Ipv4Addr,
    pub udp: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            listen_ip: Ipv4Addr::UNSPECIFIED,
            udp: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTriple {
    pub inbound: Inbound,
    pub outbound: Outbound,
    pub rule: Rule,
}

impl RoutingTriple {
    pub fn from_node(node: &Node, listener: ListenerOptions, protocol: OutboundProtocol) -> Self {
        let inbound_tag: String = node.inbound_tag();
        let outbound_tag: String = node.outbound_tag();

        let inbound = Inbound {
            port: node.port,
            protocol: InboundProtocol::Socks,
            settings: InboundSettings {
                auth: AuthMethod::Password,
                accounts: vec![Account {
                    user: node.credential.username.clone(),
                    pass: node.credential.password.clone(),
                }],
                udp: listener.udp,
                ip: listener.listen_ip,
            },
            stream_settings: StreamSettings {
                network: Transport::Tcp,
            },
            tag: inbound_tag.clone(),
        };

        let outbound = Outbound {
            protocol,
            send_through: node.address,
            tag: outbound_tag.clone(),
        };

        let rule = Rule {
            kind: RuleKind::Field,
            inbound_tag: vec![inbound_tag],
            outbound_tag,
        };

        Self {
            inbound,
            outbound,
            rule,
        }
    }
}

/// All triples of one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    triples: Vec<RoutingTriple>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, triple: RoutingTriple) {
        self.triples.push(triple);
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoutingTriple> {
        self.triples.iter()
    }

    /// Splits the triples into the engine's three parallel collections.
    pub fn to_engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig {
            inbounds: Vec::with_capacity(self.len()),
            outbounds: Vec::with_capacity(self.len()),
            routing: Routing {
                rules: Vec::with_capacity(self.len()),
            },
        };

        for triple in &self.triples {
            config.inbounds.push(triple.inbound.clone());
            config.outbounds.push(triple.outbound.clone());
            config.routing.rules.push(triple.rule.clone());
        }

        config
    }
}
