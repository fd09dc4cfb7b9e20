//! Terminal client for learning the Indian Constitution: a multiple-choice
//! quiz scored by a remote backend and a chat assistant backed by a
//! retrieval service.

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod quiz;
pub mod review;
pub mod state;
pub mod tui;
pub mod ui;
pub mod worker;
