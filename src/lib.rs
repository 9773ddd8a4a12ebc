pub mod config;
pub mod engine;
pub mod print;
pub mod tui;
