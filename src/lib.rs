//! # chat-widget
//!
//! One-to-one chat panel client. It finds or reopens a conversation room
//! through the chat service's HTTP API, holds a single live WebSocket to
//! that room, and renders history and live messages into a view.
//!
//! The connection lifecycle lives in [`net::session`], panel behavior in
//! [`controller`], and the tokio event loop tying them to the network in
//! [`widget`]. Views implement [`view::ConversationView`].

pub mod config;
pub mod controller;
pub mod error;
pub mod net;
pub mod state;
pub mod view;
pub mod widget;
