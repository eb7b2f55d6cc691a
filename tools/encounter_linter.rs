/// Encounter Linter: validates encounter definitions and reports suspicious content.
///
/// Usage: encounter_linter <encounter.ron | encounter_dir>
///
/// A directory is scanned the same way the runtime library loads it: only
/// the `.ron` files directly inside it.
///
/// Set RUST_LOG=debug for loader output.

use encounter_engine::core::library::EncounterLibrary;
use encounter_engine::core::validate::{lint, validate};
use encounter_engine::schema::encounter::Encounter;
use std::collections::HashSet;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: encounter_linter <encounter.ron | encounter_dir>");
        process::exit(0);
    }

    let root = Path::new(&args[1]);
    let mut files = Vec::new();
    if root.is_file() {
        files.push(root.to_path_buf());
    } else if root.is_dir() {
        match EncounterLibrary::ron_files(root) {
            Ok(found) => files = found,
            Err(e) => {
                eprintln!("ERROR: {}: {}", root.display(), e);
                process::exit(1);
            }
        }
    } else {
        eprintln!("ERROR: Path '{}' does not exist", root.display());
        process::exit(1);
    }

    println!("Checking {} encounter file(s)", files.len());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();

    for path in &files {
        let encounter = match Encounter::load_from_ron(path) {
            Ok(e) => e,
            Err(e) => {
                errors.push(format!("{}: {}", path.display(), e));
                continue;
            }
        };

        if !seen_ids.insert(encounter.id.clone()) {
            errors.push(format!(
                "{}: duplicate encounter id '{}'",
                path.display(),
                encounter.id
            ));
        }

        if let Err(e) = validate(&encounter) {
            errors.push(format!("{}: {}", path.display(), e));
            continue;
        }

        println!(
            "  {}: '{}' ({} states, {} transitions, difficulty {})",
            path.display(),
            encounter.id,
            encounter.states.len(),
            encounter.transitions.len(),
            encounter.difficulty
        );

        for finding in lint(&encounter) {
            warnings.push(format!("{} [{}]: {}", path.display(), encounter.id, finding));
        }
    }

    println!("\n=== Encounter Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}
