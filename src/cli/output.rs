//! Labeled, colored output helpers for the shell.

use colored::Colorize;
use std::fmt;

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan().bold(), message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green().bold(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red().bold(), message);
}

pub fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

/// Raw block output (tables, invoices); no label, no styling.
pub fn block(content: &str) {
    println!("{}", content);
}
