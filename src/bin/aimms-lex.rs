//! Command-line interface for the AIMMS lexer
//! This binary tokenizes AIMMS source files the way the documentation highlighter sees them.
//!
//! Usage:
//!   aimms-lex tokenize `<path>` [--format `<format>`] [--config `<file>`] [--raw]  - Print the token stream
//!   aimms-lex declarations `<path>` [--config `<file>`]                        - Print declared identifiers
//!   aimms-lex info                                                            - Print lexer metadata

use aimms_highlight::aimms::config::{HighlightConfig, Loader};
use aimms_highlight::aimms::formats::OutputFormat;
use aimms_highlight::aimms::vocabulary;
use aimms_highlight::aimms::{AimmsLexer, HighlightError, SourceLoader};
use clap::{Arg, ArgAction, ArgMatches, Command};

fn main() {
    env_logger::init();

    let matches = Command::new("aimms-lex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how AIMMS source is tokenized for highlighting")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokenize")
                .about("Print the classified token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the AIMMS source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (token-json, token-yaml, token-simple)"),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("raw")
                        .long("raw")
                        .help("Skip declaration resolution and print scanner categories")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("declarations")
                .about("Print the identifiers declared in a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the AIMMS source file")
                        .required(true)
                        .index(1),
                )
                .arg(config_arg()),
        )
        .subcommand(Command::new("info").about("Print lexer metadata and vocabulary versions"))
        .get_matches();

    let result = match matches.subcommand() {
        Some(("tokenize", tokenize_matches)) => handle_tokenize_command(tokenize_matches),
        Some(("declarations", declarations_matches)) => {
            handle_declarations_command(declarations_matches)
        }
        Some(("info", _)) => {
            handle_info_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML configuration file layered over the defaults")
}

fn load_config(matches: &ArgMatches, raw: bool) -> Result<HighlightConfig, HighlightError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if raw {
        loader = loader.set_override("lexer.resolve_declarations", false)?;
    }
    Ok(loader.build()?)
}

fn load_source(matches: &ArgMatches, config: &HighlightConfig) -> Result<SourceLoader, HighlightError> {
    let path = matches
        .get_one::<String>("path")
        .ok_or_else(|| HighlightError::IoError("missing path".to_string()))?;
    SourceLoader::from_path_with(path, AimmsLexer::with_options(config.lexer))
}

/// Handle the tokenize command
fn handle_tokenize_command(matches: &ArgMatches) -> Result<(), HighlightError> {
    let config = load_config(matches, matches.get_flag("raw"))?;
    let format = match matches.get_one::<String>("format") {
        Some(name) => name.parse::<OutputFormat>()?,
        None => config.output.format,
    };

    let source = load_source(matches, &config)?;
    print!("{}", source.serialize(format)?);
    Ok(())
}

/// Handle the declarations command
fn handle_declarations_command(matches: &ArgMatches) -> Result<(), HighlightError> {
    let config = load_config(matches, false)?;
    let source = load_source(matches, &config)?;
    print!("{}", source.serialize_declarations()?);
    Ok(())
}

/// Handle the info command
fn handle_info_command() {
    println!("{}", AimmsLexer::NAME);
    println!("  aliases:   {}", AimmsLexer::ALIASES.join(", "));
    println!("  filenames: {}", AimmsLexer::FILENAMES.join(", "));
    println!();
    println!("Vocabularies:");
    for vocab in vocabulary::all() {
        println!(
            "  {} (version {}, {} words)",
            vocab.name(),
            vocab.version().unwrap_or("unversioned"),
            vocab.len()
        );
    }
}
