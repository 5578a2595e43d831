//! Client-side UI state.
//!
//! DESIGN
//! ======
//! Kept separate from the session so panel visibility can be reasoned about
//! (and tested) without any connection in play.

pub mod ui;
