//! Operator notifications for routed faxes.
//!
//! Stands in for an outbound message; the console notifier just prints.

use std::path::Path;

use crate::pipeline::types::Category;

/// Receives one notification per routed fax.
pub trait Notifier: Send + Sync {
    fn fax_routed(&self, category: Category, dest: &Path);
}

/// Human-readable notification text.
pub fn format_notification(category: Category, dest: &Path) -> String {
    format!(
        "New fax classified as \"{}\" and saved in:\n  {}",
        category.label(),
        dest.display()
    )
}

/// Prints notifications to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn fax_routed(&self, category: Category, dest: &Path) {
        println!("{}", format_notification(category, dest));
    }
}
