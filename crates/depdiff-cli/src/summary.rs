//! One-line colored summary on stderr.

use colored::Colorize;
use depdiff_core::ClassifiedSet;

pub fn print_summary(set: &ClassifiedSet) {
    let updated = set.added.names().filter(|n| set.removed.contains(n)).count();
    let added = set.added.len() - updated;
    let removed = set.removed.len() - updated;

    if added + updated + removed == 0 {
        eprintln!("{}", "No dependency changes found.".dimmed());
        return;
    }

    eprintln!(
        "📦 {} added, {} updated, {} removed",
        added.to_string().green().bold(),
        updated.to_string().yellow().bold(),
        removed.to_string().red().bold()
    );
}
