//! End-to-end tests of the provisioning pipeline against stubbed interfaces
//! and a recording engine collaborator.

#[cfg(test)]
mod provision;
#[cfg(test)]
mod support;
