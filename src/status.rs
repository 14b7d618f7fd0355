//! Operator-facing console lines, each tagged with a status marker.

use std::fmt::Display;

use console::style;

pub fn info(message: impl Display) {
    println!("{} {}", style("[+]").cyan(), message);
}

pub fn success(message: impl Display) {
    println!("{} {}", style("[✔]").green().bold(), message);
}

pub fn failure(message: impl Display) {
    println!("{} {}", style("[✘]").red().bold(), message);
}

pub fn warning(message: impl Display) {
    println!("{} {}", style("[!]").yellow(), message);
}

/// Fatal errors go to stderr with the full context chain.
pub fn fatal(error: &anyhow::Error) {
    eprintln!("{} {:#}", style("[!]").red().bold(), error);
}
