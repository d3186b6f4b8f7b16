//! # Group Listing Validator
//!
//! A command-line utility for checking group listing documents before a
//! server loads them.
//!
//! ## Overview
//!
//! Each document is imported exactly as a host would import it, which covers:
//! - JSON syntax
//! - Payload shape (required fields, field types)
//! - Group names (non-empty, no separator, unique among siblings)
//! - Parent references and cycles (flat row documents)
//! - Membership references to groups and entities
//!
//! Documents with a top-level `memberships` array are read as flat row
//! documents; everything else is read as a JSON listing payload.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin groups-validator listings/tools.json
//! cargo run --bin groups-validator ./listings/
//! ```
//!
//! ## Output Example
//!
//! ```text
//! Validating listing file: listings/tools.json
//! ✓ Listing is valid!
//!
//! Listing Summary:
//!   Format: json
//!   Version: W/"3q2+7w8gAAA="
//!   Groups: 3
//!   Tools: 2, Prompts: 1, Resources: 0
//!   Hierarchy:
//!     - com (0 members)
//!     - com.example (1 members)
//!     - com.example.api (2 members)
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: All documents are valid
//! - `1`: One or more documents are invalid or could not be read

use mcp_groups::{Converter, EntityKind, FlatConverter, GroupTree, JsonConverter};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <listing-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} listings/tools.json", args[0]);
        eprintln!("  {} ./listings/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path);
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating listing file: {}", file_path.display());

    match load_listing(file_path) {
        Ok((format, tree)) => {
            println!("✓ Listing is valid!");
            print_summary(format, &tree);
        }
        Err(e) => {
            eprintln!("❌ Listing validation failed: {}", e);
            process::exit(1);
        }
    }
}

fn validate_directory(dir_path: &Path) {
    println!("Validating listings in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();

    let mut valid_count = 0;
    let mut error_count = 0;

    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", name);

        match load_listing(&path) {
            Ok((format, tree)) => {
                println!(
                    "  ✓ Valid - {} group(s), {} entit(ies), {} format",
                    tree.len(),
                    tree.entities().count(),
                    format
                );
                valid_count += 1;
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid listings: {}", valid_count);
    println!("  Invalid listings: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn load_listing(file_path: &Path) -> Result<(&'static str, GroupTree), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let payload: Value = serde_json::from_str(&content)?;

    if payload.get("memberships").is_some() {
        Ok(("flat", FlatConverter::default().from_external(&payload)?))
    } else {
        Ok(("json", JsonConverter::default().from_external(&payload)?))
    }
}

fn print_summary(format: &str, tree: &GroupTree) {
    let count = |kind: EntityKind| tree.entities().filter(|e| e.kind() == kind).count();

    println!();
    println!("Listing Summary:");
    println!("  Format: {}", format);
    println!("  Version: {}", tree.listing_version().to_etag());
    println!("  Groups: {}", tree.len());
    println!(
        "  Tools: {}, Prompts: {}, Resources: {}",
        count(EntityKind::Tool),
        count(EntityKind::Prompt),
        count(EntityKind::Resource)
    );

    if tree.is_empty() {
        return;
    }

    println!("  Hierarchy:");
    for id in tree.walk() {
        let fqn = tree.fully_qualified_name(id).unwrap_or_default();
        let members = tree.member_keys(id).map(|keys| keys.len()).unwrap_or(0);
        println!("    - {} ({} members)", fqn, members);
    }

    let ungrouped = tree
        .entities()
        .filter(|entity| tree.groups_of(&entity.key()).is_empty())
        .count();
    if ungrouped > 0 {
        println!("  Ungrouped entities: {}", ungrouped);
    }
}
