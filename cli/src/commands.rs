pub mod nodes;
pub mod provision;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fanproxy_common::config::{
    self, DEFAULT_BASE_PORT, DEFAULT_CONFIG_PATH, DEFAULT_ENGINE_VERSION, DEFAULT_INSTALL_URL,
    DEFAULT_REGISTRY_PATH, DEFAULT_SERVICE_NAME, ProvisionConfig,
};

#[derive(Parser)]
#[command(name = "fanproxy")]
#[command(about = "One authenticated SOCKS5 listener per public IPv4 address.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the engine, generate one node per public address and reload
    #[command(alias = "p")]
    Provision(ProvisionArgs),
    /// Print every node recorded in the registry
    #[command(alias = "n")]
    Nodes {
        #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
        registry_path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Engine configuration file (replaced on every run)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,
    /// Append-only node registry
    #[arg(long, default_value = DEFAULT_REGISTRY_PATH)]
    pub registry_path: PathBuf,
    /// Port of the first node
    #[arg(long, default_value_t = DEFAULT_BASE_PORT,
          value_parser = clap::value_parser!(u16).range(1..))]
    pub base_port: u16,
    /// Address the SOCKS listeners bind to
    #[arg(long, default_value_t = Ipv4Addr::UNSPECIFIED)]
    pub listen_ip: Ipv4Addr,
    /// Do not relay UDP
    #[arg(long)]
    pub no_udp: bool,
    /// Engine release installed when missing
    #[arg(long, default_value = DEFAULT_ENGINE_VERSION)]
    pub engine_version: String,
    #[arg(long, default_value = DEFAULT_INSTALL_URL)]
    pub install_url: String,
    /// Init system unit of the engine
    #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,
}

impl From<ProvisionArgs> for ProvisionConfig {
    fn from(args: ProvisionArgs) -> Self {
        ProvisionConfig {
            config_path: args.config_path,
            registry_path: args.registry_path,
            base_port: args.base_port,
            credential_length: config::DEFAULT_CREDENTIAL_LENGTH,
            listen_ip: args.listen_ip,
            udp: !args.no_udp,
            engine_version: args.engine_version,
            install_url: args.install_url,
            service_name: args.service_name,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
