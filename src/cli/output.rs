//! Terminal output with colors
//!
//! `colored` honours NO_COLOR, CLICOLOR and CLICOLOR_FORCE. Diagnostics go to
//! stderr, data and results to stdout.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::{Address, Entry, NO_ADDRESS};

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Status line of a panel action: green when it changed the document,
/// a warning when it was refused or had nothing to do.
pub fn status(text: &str, changed: bool) {
    if changed {
        println!("{} {}", "✓".green(), text);
    } else {
        warning(text);
    }
}

/// Whether a menu action is available (`✓ copy` / `✗ paste`).
pub fn availability(name: &str, enabled: bool) {
    if enabled {
        println!("  {} {}", "✓".green(), name);
    } else {
        println!("  {} {}", "✗".red(), name.dimmed());
    }
}

/// Completed action with a green label.
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// One entry with its structural links; unset links are dimmed.
pub fn entry_links(entry: &Entry) {
    let link = |name: &str, address: Address| {
        let text = format!("{}={:#06x}", name, address);
        if address == NO_ADDRESS {
            text.dimmed().to_string()
        } else {
            text
        }
    };
    println!(
        "  {:<10} {} {} {} {} {}",
        entry.to_string(),
        link("address", entry.address),
        link("parent", entry.parent),
        link("sibling", entry.sibling),
        link("child", entry.child),
        link("root", entry.root)
    );
}

/// Plain data output, no color.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
