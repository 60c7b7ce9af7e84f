// nectar-convert: expand a Hunspell dictionary into categorized word lists.
//
// Reads <PREFIX>.dic and <PREFIX>.aff and writes four plain-text word
// lists, one word per line, sorted case-insensitively:
//   <name>_common.txt, <name>_proper_nouns.txt,
//   <name>_acronyms.txt, <name>_profanity.txt
//
// Usage:
//   nectar-convert PREFIX [OUTPUT_DIR]
//
// PREFIX is the dictionary path without extension, e.g.
// `wordlists/en_US`. Output files land next to the dictionary unless
// OUTPUT_DIR is given. A parse error aborts with a non-zero status
// before any output file is touched.

use std::path::{Path, PathBuf};

use nectar_core::category::Category;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if nectar_cli::wants_help(&args) || args.is_empty() {
        println!("nectar-convert: expand a Hunspell dictionary into word lists.");
        println!();
        println!("Usage: nectar-convert PREFIX [OUTPUT_DIR]");
        println!();
        println!("Reads PREFIX.dic and PREFIX.aff, e.g. wordlists/en_US reads");
        println!("wordlists/en_US.dic + .aff. Writes four word-list files");
        println!("(<name>_common.txt, <name>_proper_nouns.txt, <name>_acronyms.txt,");
        println!("<name>_profanity.txt) into OUTPUT_DIR, default: next to PREFIX.");
        println!();
        println!("Options:");
        println!("  -h, --help   Print this help");
        if args.is_empty() {
            std::process::exit(1);
        }
        return;
    }

    let prefix = PathBuf::from(&args[0]);
    let name = match prefix.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => nectar_cli::fatal(&format!("invalid dictionary prefix {:?}", args[0])),
    };

    for path in [prefix.with_extension("dic"), prefix.with_extension("aff")] {
        if !path.is_file() {
            nectar_cli::fatal(&format!("{} not found", path.display()));
        }
    }

    let output_dir = match args.get(1) {
        Some(dir) => PathBuf::from(dir),
        None => match prefix.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
    };

    let conversion = nectar_hunspell::convert_pair(&prefix)
        .unwrap_or_else(|e| nectar_cli::fatal(&e.to_string()));

    for diagnostic in &conversion.diagnostics {
        eprintln!("warning: {diagnostic}");
    }

    let written = conversion
        .lists
        .write_to(&output_dir, &name)
        .unwrap_or_else(|e| nectar_cli::fatal(&format!("writing word lists: {e}")));

    for (category, path) in Category::ALL.iter().zip(&written) {
        report(conversion.lists.get(*category).len(), category.label(), path);
    }
}

fn report(count: usize, label: &str, path: &Path) {
    println!("Wrote {count} {label} to {}", path.display());
}
