use std::process::{Command, Output};

use tracing::info;

use fanproxy_common::config::ProvisionConfig;
use fanproxy_common::error::CollaboratorError;
use fanproxy_common::system::{EngineAction, SystemCollaborator};

const ENGINE_BINARY: &str = "xray";

/// Xray installed through its upstream script and managed by systemd.
pub struct XraySystemd {
    binary: String,
    service: String,
    install_url: String,
    version: String,
}

impl XraySystemd {
    pub fn from_config(cfg: &ProvisionConfig) -> Self {
        Self {
            binary: ENGINE_BINARY.to_string(),
            service: cfg.service_name.clone(),
            install_url: cfg.install_url.clone(),
            version: cfg.engine_version.clone(),
        }
    }

    fn is_installed(&self) -> bool {
        Command::new(&self.binary).arg("version").output().is_ok()
    }

    fn install_script(&self) -> String {
        format!(
            "curl -L {} | bash -s install --version {}",
            self.install_url, self.version
        )
    }
}

impl SystemCollaborator for XraySystemd {
    fn install(&self) -> Result<(), CollaboratorError> {
        if self.is_installed() {
            info!("Xray already installed");
            return Ok(());
        }

        info!("Xray not found, installing {}", self.version);
        run(
            EngineAction::Install,
            Command::new("bash").arg("-c").arg(self.install_script()),
        )?;
        info!("Xray installed");
        Ok(())
    }

    fn restart(&self) -> Result<(), CollaboratorError> {
        run(
            EngineAction::Restart,
            Command::new("systemctl").args(["restart", self.service.as_str()]),
        )
    }

    fn enable(&self) -> Result<(), CollaboratorError> {
        run(
            EngineAction::Enable,
            Command::new("systemctl").args(["enable", self.service.as_str()]),
        )
    }
}

fn run(action: EngineAction, command: &mut Command) -> Result<(), CollaboratorError> {
    let output: Output = command
        .output()
        .map_err(|e| CollaboratorError::new(action, e.to_string()))?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let reason = match stderr.lines().rev().find(|line| !line.trim().is_empty()) {
        Some(line) => format!("{}: {}", output.status, line.trim()),
        None => output.status.to_string(),
    };
    Err(CollaboratorError::new(action, reason))
}
