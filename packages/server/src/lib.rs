//! Multi-room chat relay server library.
//!
//! Clients join named rooms over WebSocket, exchange short text messages,
//! and see a live roster and online count. The domain layer owns room
//! lifecycle, membership and the bounded message log; the use-case layer
//! orchestrates the join/send/leave state machine; the UI layer is the
//! axum gateway.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
