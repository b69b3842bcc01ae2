//! Find command implementation.

use crate::bootup::BootupPack;
use flagdb_core::FlagType;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One matching flag.
#[derive(Debug, Serialize)]
pub struct FlagMatch {
    /// Flag name.
    pub name: String,
    /// Signed hash of the name.
    pub hash: i32,
    /// Container data type.
    pub flag_type: String,
    /// Whether the flag participates in save data.
    pub is_save: bool,
    /// Whether the flag lives in a revival container.
    pub is_revival: bool,
}

/// Search result for one query.
#[derive(Debug, Serialize)]
pub struct FindReport {
    /// The searched name fragment.
    pub query: String,
    /// Matching flags, in container order then by name.
    pub matches: Vec<FlagMatch>,
    /// How many of the matches participate in save data.
    pub save_matches: usize,
    /// Whether the matches were deleted.
    pub deleted: bool,
}

/// Runs the find command.
pub fn run(
    directory: &Path,
    flag_name: &str,
    delete: bool,
    format: &str,
    force_big: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Searching {:?} for {:?}", directory, flag_name);
    let mut pack = BootupPack::load(directory)?;

    let mut matches = Vec::new();
    let mut hits: Vec<(FlagType, i32)> = Vec::new();
    for ftype in FlagType::ALL {
        for flag in pack.store().find_all(ftype, flag_name) {
            hits.push((ftype, flag.hash()));
            matches.push(FlagMatch {
                name: flag.name().to_string(),
                hash: flag.hash(),
                flag_type: ftype.as_str().to_string(),
                is_save: flag.is_save,
                is_revival: flag.is_revival,
            });
        }
    }
    let save_matches = matches.iter().filter(|entry| entry.is_save).count();

    if delete {
        for (ftype, hash) in &hits {
            pack.store_mut().remove(*ftype, *hash);
        }
    }

    let report = FindReport {
        query: flag_name.to_string(),
        matches,
        save_matches,
        deleted: delete,
    };
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text_output(&report);
        }
    }

    if delete && pack.store().total_changes() > 0 {
        pack.write_back(force_big)?;
    }

    Ok(())
}

fn print_text_output(report: &FindReport) {
    println!("flagdb Flag Search");
    println!("==================");
    println!();
    println!("Query: {}", report.query);
    println!();

    if report.matches.is_empty() {
        println!("No matching flags.");
        return;
    }

    println!("Matches:");
    for entry in &report.matches {
        let mut notes = Vec::new();
        if entry.is_save {
            notes.push("save");
        }
        if entry.is_revival {
            notes.push("revival");
        }
        let suffix = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join(", "))
        };
        println!(
            "  [{}] {} ({:#010x}){}",
            entry.flag_type, entry.name, entry.hash, suffix
        );
    }
    println!();
    println!("Game data matches: {}", report.matches.len());
    println!("Save data matches: {}", report.save_matches);
    if report.deleted {
        println!("Deleted:           {}", report.matches.len());
    }
}
