//! Error types shared by the store clients
//!
//! Everything outside startup collapses to "log and continue", so the
//! taxonomy only needs to tell a dead connection apart from a failed command.

use thiserror::Error;

/// Errors raised by a queue store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("failed to connect to store at {addr}: {reason}")]
    Connection { addr: String, reason: String },

    #[error("store command {command} failed on {key}: {reason}")]
    Command {
        command: &'static str,
        key: String,
        reason: String,
    },

    #[error("store value at {key} is not a list")]
    WrongType { key: String },
}

impl StoreError {
    pub fn command(command: &'static str, key: &str, reason: impl ToString) -> Self {
        StoreError::Command {
            command,
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = StoreError::command("LPUSH", "acme:queue", "broken pipe");
        assert_eq!(
            err.to_string(),
            "store command LPUSH failed on acme:queue: broken pipe"
        );
    }

    #[test]
    fn test_connection_error_display() {
        let err = StoreError::Connection {
            addr: "localhost:6379".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("localhost:6379"));
    }
}
