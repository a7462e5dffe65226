//! TUI widgets

pub mod confirm;
pub mod detail;
pub mod help;
pub mod login;
pub mod spinner;
pub mod table;
pub mod tabs;
pub mod views;
