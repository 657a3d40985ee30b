//! UI layer: the axum WebSocket gateway and HTTP read API.

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
