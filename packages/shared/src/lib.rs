//! Shared library for the Banter chat relay.
//!
//! Holds the JSON wire protocol spoken between server and clients, plus the
//! time and logging utilities both binaries use.

pub mod logger;
pub mod protocol;
pub mod time;
