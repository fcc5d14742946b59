use crate::commands::{print_json, Context};
use addressbook_core::{AddressBook, ContactId, ContactNew};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an array of contacts
    pub file: PathBuf,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    pub added: Vec<ImportedEntry>,
    pub rejected: Vec<RejectedEntry>,
}

#[derive(Debug, Serialize)]
pub struct ImportedEntry {
    pub index: usize,
    pub id: ContactId,
}

#[derive(Debug, Serialize)]
pub struct RejectedEntry {
    pub index: usize,
    pub error: String,
}

pub fn import_contacts(ctx: &mut Context<'_>, args: ImportArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("read import file {}", args.file.display()))?;
    let entries: Vec<ContactNew> = serde_json::from_str(&raw)
        .map_err(|err| crate::error::invalid_input(format!("invalid import file: {err}")))?;

    let report = import_entries(&mut ctx.book, entries);
    info!(
        added = report.added.len(),
        rejected = report.rejected.len(),
        "import finished"
    );

    if ctx.json {
        print_json(&report)?;
    } else {
        for entry in &report.added {
            println!("added #{} as {}", entry.index, entry.id);
        }
        for entry in &report.rejected {
            println!("rejected #{}: {}", entry.index, entry.error);
        }
        println!(
            "imported {} of {}",
            report.added.len(),
            report.added.len() + report.rejected.len()
        );
    }
    Ok(())
}

/// Adds each entry on its own; a rejected entry does not stop the rest.
pub fn import_entries<B>(book: &mut B, entries: Vec<ContactNew>) -> ImportReport
where
    B: AddressBook,
    B::Error: std::fmt::Display,
{
    let mut report = ImportReport::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match book.add_contact(entry) {
            Ok(id) => report.added.push(ImportedEntry { index, id }),
            Err(err) => {
                warn!(index, error = %err, "import entry rejected");
                report.rejected.push(RejectedEntry {
                    index,
                    error: err.to_string(),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::import_entries;
    use addressbook_core::{ContactNew, IdCounter, IncrementIdGenerator, MemoryAddressBook};

    #[test]
    fn import_reports_rejections_and_continues() {
        let mut book = MemoryAddressBook::new(IncrementIdGenerator::new(IdCounter::new()));
        let entries = vec![
            ContactNew::named("Pedro").with_surname("Ballesteros"),
            ContactNew::named(" "),
            ContactNew::named("pedro").with_surname("BALLESTEROS"),
            ContactNew::named("Ana"),
        ];
        let report = import_entries(&mut book, entries);
        let added: Vec<usize> = report.added.iter().map(|entry| entry.index).collect();
        let rejected: Vec<usize> = report.rejected.iter().map(|entry| entry.index).collect();
        assert_eq!(added, vec![0, 3]);
        assert_eq!(rejected, vec![1, 2]);
        assert_eq!(book.len(), 2);
        assert!(report.rejected[0].error.contains("first name is required"));
    }
}
