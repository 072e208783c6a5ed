mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, nodes, provision};
use fanproxy_common::error::{ProvisionError, StorageError};
use terminal::{logging, print};

fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let result: anyhow::Result<()> = match commands.command {
        Commands::Provision(args) => {
            print::banner();
            print::header("provisioning egress nodes");
            provision::provision(args)
        }
        Commands::Nodes { registry_path } => {
            print::header("recorded nodes");
            nodes::nodes(&registry_path)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print::failure(&diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}

/// `<stage>: <cause>` for pipeline failures, the bare message otherwise.
fn diagnostic(e: &anyhow::Error) -> String {
    if let Some(err) = e.downcast_ref::<ProvisionError>() {
        format!("{}: {}", err.stage(), err)
    } else if let Some(err) = e.downcast_ref::<StorageError>() {
        format!("registry: {err}")
    } else {
        e.to_string()
    }
}
