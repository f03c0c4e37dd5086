pub mod commands;
pub mod repl;
pub mod setup;
pub mod ui;
