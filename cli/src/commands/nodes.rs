use std::path::Path;

use fanproxy_common::node::RegistryRecord;
use fanproxy_core::registry::NodeRegistry;

use crate::terminal::{format, print};

pub fn nodes(registry_path: &Path) -> anyhow::Result<()> {
    let records: Vec<RegistryRecord> = NodeRegistry::new(registry_path).records()?;

    if records.is_empty() {
        print::no_results();
        return Ok(());
    }

    for (idx, record) in records.iter().enumerate() {
        print::tree_head(idx, &record.address.to_string());
        print::as_tree_one_level(format::record_to_details(record));
    }

    print::fat_separator();
    print::centerln(&format!("{} nodes recorded", records.len()));
    Ok(())
}
