//! eventease-admin: terminal admin console for the EventEase marketplace

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod store;
pub mod tui;
pub mod types;
