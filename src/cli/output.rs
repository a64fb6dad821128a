//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{CategoryDiff, CategoryNode, DiffStatus, EntryDiff, EntryNode};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data output)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Render a value as a termtree for terminal display.
pub trait ToDisplayTree {
    fn to_display_tree(&self) -> Tree<String>;
}

fn status_line(status: DiffStatus, text: String) -> String {
    match status {
        DiffStatus::Added => format!("{} {}", "+".green().bold(), text.green()),
        DiffStatus::Removed => format!("{} {}", "-".red().bold(), text.red()),
        DiffStatus::Unchanged => format!("  {}", text),
    }
}

impl ToDisplayTree for CategoryDiff {
    fn to_display_tree(&self) -> Tree<String> {
        let root = status_line(self.status, format!("{} [{}]", self.label, self.def_name));
        let leaves: Vec<_> = self.entries.iter().map(|e| e.to_display_tree()).collect();
        Tree::new(root).with_leaves(leaves)
    }
}

impl ToDisplayTree for EntryDiff {
    fn to_display_tree(&self) -> Tree<String> {
        let root = status_line(self.status, self.label.clone());
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_display_tree()).collect();
        Tree::new(root).with_leaves(leaves)
    }
}

impl ToDisplayTree for CategoryNode {
    fn to_display_tree(&self) -> Tree<String> {
        let root = format!("{} [{}]", self.label, self.def_name);
        let leaves: Vec<_> = self.entries.iter().map(|e| e.to_display_tree()).collect();
        Tree::new(root).with_leaves(leaves)
    }
}

impl ToDisplayTree for EntryNode {
    fn to_display_tree(&self) -> Tree<String> {
        let leaves: Vec<_> = self
            .children()
            .iter()
            .map(|c| c.to_display_tree())
            .collect();
        Tree::new(self.label().to_string()).with_leaves(leaves)
    }
}
