use crate::terminal::colors;
use colored::*;
use fanproxy_common::node::RegistryRecord;

pub type Detail = (String, ColoredString);

pub fn record_to_details(record: &RegistryRecord) -> Vec<Detail> {
    vec![
        ("Port".to_string(), record.port.to_string().color(colors::PORT)),
        ("User".to_string(), record.username.color(colors::SECRET)),
        ("Pass".to_string(), record.password.color(colors::SECRET)),
    ]
}

/// One-line summary printed the moment a node is provisioned.
pub fn record_line(record: &RegistryRecord) -> String {
    format!(
        " IP: {} Port: {} User: {} Pass: {}",
        record.address.to_string().color(colors::IPV4_ADDR),
        record.port.to_string().color(colors::PORT),
        record.username.color(colors::SECRET),
        record.password.color(colors::SECRET),
    )
}
