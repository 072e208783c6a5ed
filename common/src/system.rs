use std::fmt;

use crate::error::CollaboratorError;

/// The calls a run makes into the engine's host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineAction {
    Install,
    Restart,
    Enable,
}

impl fmt::Display for EngineAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineAction::Install => "engine install",
            EngineAction::Restart => "service restart",
            EngineAction::Enable => "service enable",
        };
        f.write_str(name)
    }
}

/// Installs and drives the external proxy engine.
///
/// Each call is synchronous and either succeeds or returns a terminal error.
/// Production binds this to the OS package tooling and init system; tests
/// bind it to a recording stub.
pub trait SystemCollaborator {
    fn install(&self) -> Result<(), CollaboratorError>;
    fn restart(&self) -> Result<(), CollaboratorError>;
    fn enable(&self) -> Result<(), CollaboratorError>;
}

