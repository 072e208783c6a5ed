use std::net::Ipv4Addr;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "/usr/local/etc/xray/config.json";
pub const DEFAULT_REGISTRY_PATH: &str = "/home/socks.txt";
pub const DEFAULT_BASE_PORT: u16 = 10001;
pub const DEFAULT_CREDENTIAL_LENGTH: usize = 8;
pub const DEFAULT_ENGINE_VERSION: &str = "v1.8.4";
pub const DEFAULT_INSTALL_URL: &str =
    "https://github.com/XTLS/Xray-install/raw/main/install-release.sh";
pub const DEFAULT_SERVICE_NAME: &str = "xray";

/// Everything a provisioning run needs to know up front.
///
/// Passed into the pipeline explicitly so tests can point it at temporary
/// paths and arbitrary ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    /// Where the engine reads its configuration document.
    pub config_path: PathBuf,
    /// Append-only plain-text node registry.
    pub registry_path: PathBuf,
    /// Port of the first node; each further node takes the next one.
    pub base_port: u16,
    /// Length of every generated username and password.
    pub credential_length: usize,
    /// Address the SOCKS listeners bind to.
    pub listen_ip: Ipv4Addr,
    /// Whether the listeners relay UDP.
    pub udp: bool,
    pub engine_version: String,
    pub install_url: String,
    pub service_name: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            base_port: DEFAULT_BASE_PORT,
            credential_length: DEFAULT_CREDENTIAL_LENGTH,
            listen_ip: Ipv4Addr::UNSPECIFIED,
            udp: true,
            engine_version: DEFAULT_ENGINE_VERSION.to_string(),
            install_url: DEFAULT_INSTALL_URL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}
