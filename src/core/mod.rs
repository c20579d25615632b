pub mod config;
pub mod engine;
pub mod game;
pub mod logging;
pub mod terminal; // Plain stdout output outside the TUI
