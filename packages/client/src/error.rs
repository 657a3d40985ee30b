//! Error types for the chat client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be established or was lost mid-session.
    #[error("Connection error: {0}")]
    Connection(String),
}
