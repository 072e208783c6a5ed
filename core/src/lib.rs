//! # Fanproxy Core
//!
//! The provisioning pipeline. Discovery hands public addresses to the
//! [`topology`] builder, which draws credentials from [`credentials`] and
//! records every node through the [`registry`] as it goes. The finished
//! topology is rendered by the [`serializer`], then the engine is reloaded
//! through a [`fanproxy_common::system::SystemCollaborator`].
//!
//! [`provision::Provisioner`] runs the whole sequence and stops at the first
//! error.

pub mod credentials;
pub mod provision;
pub mod registry;
pub mod serializer;
pub mod system;
pub mod topology;
