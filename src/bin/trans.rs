//! trans - Resolve translation keys from a language directory
//!
//! Looks up one or more keys in `<LANGUAGE_DIR>/<locale>/all.<ext>` and
//! prints the placeholder-filled strings. Without `--locale` the system
//! locale picks the language.

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use translator::locale::system_accept_language;
use translator::{format, DataFormat, FormatData, Translator};

fn build_cli() -> Command {
    Command::new("trans")
        .about("Resolve translation keys against per-locale pattern tables")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("language_dir")
                .help("Directory holding one subdirectory per locale")
                .required_unless_present("pattern")
                .index(1)
        )
        .arg(
            Arg::new("keys")
                .help("Keys to resolve (dotted paths descend into nested tables)")
                .num_args(1..)
                .required_unless_present("pattern")
                .index(2)
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Locale to use, e.g. en_US (default: system locale)")
                .value_name("LOCALE")
        )
        .arg(
            Arg::new("arg")
                .long("arg")
                .short('a')
                .help("Placeholder value as name=value (repeatable)")
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
        )
        .arg(
            Arg::new("value")
                .long("value")
                .short('v')
                .help("Single value bound to the {0} placeholder")
                .value_name("VALUE")
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Data file format: json, yaml or toml")
                .value_parser(str::parse::<DataFormat>)
                .default_value("json")
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .short('p')
                .help("Format this literal pattern instead of looking up keys")
                .value_name("PATTERN")
                .conflicts_with("keys")
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as a JSON object keyed by lookup key")
                .action(ArgAction::SetTrue)
        )
}

fn format_data(matches: &ArgMatches) -> Result<FormatData> {
    let mut data = match matches.get_one::<String>("value") {
        Some(value) => FormatData::single(value),
        None => FormatData::new(),
    };

    for pair in matches.get_many::<String>("arg").unwrap_or_default() {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid --arg '{}': expected NAME=VALUE", pair);
        };
        data.insert(name, value);
    }

    Ok(data)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let data = format_data(&matches)?;

    if let Some(pattern) = matches.get_one::<String>("pattern") {
        println!("{}", format(pattern, &data));
        return Ok(());
    }

    let Some(language_dir) = matches.get_one::<String>("language_dir").map(PathBuf::from) else {
        bail!("a language directory is required");
    };
    let keys: Vec<&String> = matches.get_many::<String>("keys").unwrap_or_default().collect();
    let data_format = matches
        .get_one::<DataFormat>("format")
        .copied()
        .unwrap_or_default();

    let mut builder = Translator::builder(&language_dir).data_format(data_format);
    builder = match matches.get_one::<String>("locale") {
        Some(locale) => builder.locale(locale),
        None => builder.accept_language_from(system_accept_language),
    };

    let mut translator = builder
        .build()
        .with_context(|| format!("failed to open language directory {}", language_dir.display()))?;

    let lines = translator
        .trans_map(keys.iter().map(|key| (key.as_str(), data.clone())))
        .with_context(|| format!("failed to resolve keys in locale {}", translator.locale()))?;

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&lines).context("failed to encode results")?;
        println!("{}", json);
        return Ok(());
    }

    if let [key] = keys.as_slice() {
        if let Some(line) = lines.get(key.as_str()) {
            println!("{}", line);
        }
        return Ok(());
    }

    for key in &keys {
        if let Some(line) = lines.get(key.as_str()) {
            println!("{}\t{}", key, line);
        }
    }

    Ok(())
}
