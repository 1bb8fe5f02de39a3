pub mod commands;
pub mod output;
pub mod shell;

pub use shell::run_cli;
