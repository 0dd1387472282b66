use clap::{Parser, Subcommand};

use jielong_cli::commands::{config_ops, dict_ops};
use jielong_cli::trace_init;

#[derive(Parser)]
#[command(name = "idiomtool", about = "Idiom dictionary build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a dictionary (text or compiled) into the JLDX binary format
    Compile {
        /// Input dictionary file
        input_file: String,
        /// Output file
        output_file: String,
    },
    /// Show dictionary info (format auto-detected by magic bytes)
    Info {
        /// Dictionary file
        file: String,
    },
    /// Look up an idiom (exact match)
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Idiom to look up
        idiom: String,
    },
    /// List idioms starting with a character
    Starts {
        /// Dictionary file
        dict_file: String,
        /// Leading character
        leading: char,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    // Stderr only; the result is always `Ok(None)`.
    let _ = trace_init::init_tracing(None);

    match cli.command {
        Command::Compile {
            input_file,
            output_file,
        } => dict_ops::compile(&input_file, &output_file),
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup { dict_file, idiom } => dict_ops::lookup(&dict_file, &idiom),
        Command::Starts { dict_file, leading } => dict_ops::starts(&dict_file, leading),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
