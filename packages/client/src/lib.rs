//! CLI client for the chat relay: connects over WebSocket, joins a room
//! and maps stdin lines to commands.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use error::ClientError;
pub use runner::run_client;
