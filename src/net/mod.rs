//! Networking: room lookup over HTTP and the live room socket.
//!
//! DESIGN
//! ======
//! `resolver` and `socket` are the only modules that touch the network.
//! `session` drives the connection lifecycle through the `transport` traits,
//! so it runs against a fake transport in tests.

pub mod resolver;
pub mod session;
pub mod socket;
pub mod transport;
pub mod types;
