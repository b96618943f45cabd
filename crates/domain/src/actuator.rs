use std::fmt;

/// Command sent to the external resolver-control daemon.
///
/// Fire-and-forget; both operations are idempotent on the resolver side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActuatorCommand {
    Block(String),
    Unblock(String),
}

impl ActuatorCommand {
    pub fn domain(&self) -> &str {
        match self {
            ActuatorCommand::Block(domain) | ActuatorCommand::Unblock(domain) => domain,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ActuatorCommand::Block(_) => "block",
            ActuatorCommand::Unblock(_) => "unblock",
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action(), self.domain())
    }
}
