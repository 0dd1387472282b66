use std::fs;

use jielong_core::settings::{self, Settings};

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!("{}", summary(&s));
}

fn summary(s: &Settings) -> String {
    format!(
        "OK: matcher.top={}, matcher.mode={}, matcher.ranking={}, chain.max_steps={}, dictionary.path={}",
        s.matcher.top,
        s.matcher.mode,
        s.matcher.ranking,
        s.chain.max_steps,
        s.dictionary.path.display()
    )
}
