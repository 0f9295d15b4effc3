use thiserror::Error;

/// Typed failures surfaced at the edges of the simulation kernel.
///
/// The simulation itself never fails: generators and operator commands
/// report degraded subsystems as ordinary data. These variants cover
/// construction-time and input-parsing problems only.
#[derive(Debug, Error, PartialEq)]
pub enum RadioError {
    #[error("invalid weights for '{name}': {reason}")]
    InvalidWeights { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("command '{command}' expects {expected}")]
    InvalidArgument { command: String, expected: String },
}

impl RadioError {
    pub(crate) fn invalid_argument(command: &str, expected: &str) -> Self {
        RadioError::InvalidArgument {
            command: command.to_string(),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = RadioError::UnknownCommand("explode".into());
        assert_eq!(err.to_string(), "unknown command 'explode'");

        let err = RadioError::invalid_argument("humor", "a value between 0 and 100");
        assert_eq!(
            err.to_string(),
            "command 'humor' expects a value between 0 and 100"
        );
    }
}
