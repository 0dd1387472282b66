use std::fs;
use std::path::Path;

use jielong_core::dict::{is_compiled, CharIndex, DictStats, Dictionary};
use jielong_core::IdiomEntry;

pub fn compile(input_file: &str, output_file: &str) {
    let dict = die!(
        Dictionary::open(Path::new(input_file)),
        "Error reading {input_file}: {}"
    );
    let stats = dict.stats();
    eprintln!(
        "Compiling {} idioms ({} with pinyin, {} leading chars)...",
        stats.idioms, stats.with_pinyin, stats.leading_chars
    );

    die!(
        dict.save(Path::new(output_file)),
        "Error writing dictionary: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {output_file} ({:.1} KB)", file_size as f64 / 1024.0);
}

pub fn info(file: &str) {
    let raw = die!(fs::read(file), "Error reading {file}: {}");
    let dict = die!(
        Dictionary::open(Path::new(file)),
        "Error opening dictionary: {}"
    );
    print!("{}", format_info(file, &raw, &dict.stats()));
}

/// Summary shown by `idiomtool info`; `raw` is the file content.
pub fn format_info(file: &str, raw: &[u8], stats: &DictStats) -> String {
    let format = match raw.get(4) {
        Some(version) if is_compiled(raw) => format!("compiled (JLDX v{version})"),
        _ => "text (TSV)".to_string(),
    };
    format!(
        "Dictionary:    {file}\n\
         Format:        {format}\n\
         File size:     {:.1} KB\n\
         Idioms:        {}\n\
         With pinyin:   {}\n\
         Leading chars: {}\n",
        raw.len() as f64 / 1024.0,
        stats.idioms,
        stats.with_pinyin,
        stats.leading_chars
    )
}

pub fn lookup(dict_file: &str, idiom: &str) {
    let dict = open(dict_file);
    match dict.lookup(idiom.trim()) {
        Some(entry) => print!("{}", format_entry(entry)),
        None => println!("{idiom}: not found"),
    }
}

pub fn starts(dict_file: &str, leading: char) {
    let dict = open(dict_file);
    let index = CharIndex::build(&dict);
    let ids = index.bucket(leading);
    if ids.is_empty() {
        println!("{leading}: no idioms");
        return;
    }
    println!("{leading}: {} idioms", ids.len());
    for &id in ids {
        if let Some(entry) = dict.get(id) {
            print!("{}", format_entry(entry));
        }
    }
}

fn open(dict_file: &str) -> Dictionary {
    die!(
        Dictionary::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

pub fn format_entry(entry: &IdiomEntry) -> String {
    if entry.has_pinyin() {
        format!(
            "  {} [{}] {}\n",
            entry.text,
            entry.pinyin.join(" "),
            entry.definition
        )
    } else {
        format!("  {} {}\n", entry.text, entry.definition)
    }
}
