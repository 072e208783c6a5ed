use fanproxy_common::config::ProvisionConfig;
use fanproxy_common::error::CollaboratorError;
use fanproxy_common::network::address::PublicIpv4;
use fanproxy_common::network::interface::SystemInterfaces;
use fanproxy_common::node::RegistryRecord;
use fanproxy_common::report::NodeReporter;
use fanproxy_common::system::SystemCollaborator;
use fanproxy_core::provision::{ProvisionSummary, Provisioner};
use fanproxy_core::system::XraySystemd;

use crate::terminal::{format, print, spinner};

pub fn provision(args: super::ProvisionArgs) -> anyhow::Result<()> {
    let cfg: ProvisionConfig = args.into();
    let system = InstallSpinner(XraySystemd::from_config(&cfg));

    let mut provisioner = Provisioner::new(
        cfg,
        Box::new(SystemInterfaces),
        Box::new(system),
        Box::new(ConsoleReporter),
    );
    let summary: ProvisionSummary = provisioner.run()?;

    print::fat_separator();
    print::aligned_line("Nodes", summary.nodes.to_string());
    print::aligned_line("Config", summary.config_path.display().to_string());
    print::aligned_line("Registry", summary.registry_path.display().to_string());
    print::centerln("Deployment complete");
    Ok(())
}

/// Prints each node the moment it is provisioned.
struct ConsoleReporter;

impl NodeReporter for ConsoleReporter {
    fn addresses_discovered(&self, addresses: &[PublicIpv4]) {
        let joined: String = addresses
            .iter()
            .map(|addr| addr.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        print::print_status(format!("Public IPv4 addresses: {joined}"));
    }

    fn node_provisioned(&self, record: &RegistryRecord) {
        print::print(&format::record_line(record));
    }
}

/// Shows a spinner while the engine is being installed.
struct InstallSpinner<C>(C);

impl<C: SystemCollaborator> SystemCollaborator for InstallSpinner<C> {
    fn install(&self) -> Result<(), CollaboratorError> {
        let pb = spinner::start("Checking proxy engine installation...");
        let result = self.0.install();
        spinner::finish(&pb);
        result
    }

    fn restart(&self) -> Result<(), CollaboratorError> {
        self.0.restart()
    }

    fn enable(&self) -> Result<(), CollaboratorError> {
        self.0.enable()
    }
}
