// Command-line interface for mdox
//
// This binary converts a Markdown file into a Word document, and can show what the
// scanner made of a file before it is rendered.
//
// The conversion itself lives in the mdox-babel crate. This crate only deals with the
// shell: arguments, configuration files, reading the input and writing the output.
//
// Usage:
//  mdox <input> [--title <title>] [--output <file>]           - Convert to docx (default)
//  mdox convert <input> [--title <title>] [--output <file>]   - Same as above (explicit)
//  mdox inspect <path> [<transform>]                          - Show scanned blocks (defaults to "blocks-treeviz")
//  mdox --list-transforms                                     - List available transforms
//
// The output format follows the output file extension (.docx unless told otherwise).
//
// Extra Parameters:
//
// Parameters can be passed using --extra-<parameter-name> <value>.
// Known names override configuration keys (page-size, body-font, ...), the rest are
// handed to the output format or inspect transform.
// Example:
//  mdox notes.md --extra-page-size a4 --extra-code-font "Fira Code"

use mdox_cli::transforms;

use anyhow::{bail, Context};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command, ValueHint};
use mdox_babel::formats::docx::DocxFormat;
use mdox_babel::{FormatRegistry, RenderOptions};
use mdox_config::{Loader, MdoxConfig};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "help"];

/// `--extra-<name>` parameters that map onto configuration keys
const CONFIG_OVERRIDES: &[(&str, &str)] = &[
    ("page-size", "page.size"),
    ("body-font", "fonts.body"),
    ("code-font", "fonts.code"),
    ("default-title", "document.default_title"),
    ("toc-title", "document.toc_title"),
    ("diagram-language", "diagrams.language"),
];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("mdox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown into a styled Word document")
        .long_about(
            "mdox turns a Markdown file into a .docx document with a title page,\n\
            a table of contents, styled headings, lists, tables and boxed code.\n\n\
            Commands:\n  \
            - convert: Render a Markdown file to docx (default)\n  \
            - inspect: View the blocks the scanner found\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration or pass format options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            mdox notes.md                               # Writes output.docx\n  \
            mdox notes.md --title \"Field Guide\" -o guide.docx\n  \
            mdox notes.md --extra-page-size a4          # A4 pages\n  \
            mdox inspect notes.md                       # Block tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mdox.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline details to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a Markdown file is scanned")
                .long_about(
                    "View the block sequence the scanner produces for a Markdown file.\n\n\
                    Transforms:\n  \
                    - blocks-treeviz:  Block tree visualization (default)\n  \
                    - blocks-json:     Blocks as JSON\n  \
                    - runs-json:       Inline styled runs per block\n\n\
                    Extra Parameters:\n  \
                    --extra-full      List code lines and table rows in the tree\n\n\
                    Examples:\n  \
                    mdox inspect notes.md                  # Tree visualization\n  \
                    mdox inspect notes.md runs-json        # Inline emphasis",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'blocks-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a Markdown file to docx (default command)")
                .long_about(
                    "Render a Markdown file into a Word document.\n\n\
                    The output format follows the output file extension: .docx (default)\n\
                    or .json for the scanned block sequence.\n\n\
                    Examples:\n  \
                    mdox convert notes.md                        # Writes output.docx\n  \
                    mdox convert notes.md -o notes.docx          # Explicit output\n  \
                    mdox notes.md --title \"Field Guide\"          # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input Markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Document title (defaults to the configured default title)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to output.docx)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

/// Parse the command line, injecting `convert` when the first argument is a file.
///
/// Usage errors exit with status 1. Help and version output exit normally.
fn parse_args(cleaned_args: &[String]) -> clap::ArgMatches {
    let cli = build_cli();
    let result = match cli.clone().try_get_matches_from(cleaned_args) {
        Ok(m) => Ok(m),
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                cli.try_get_matches_from(&new_args)
            } else {
                Err(e)
            }
        }
    };

    result.unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            std::process::exit(1);
        }
    })
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("mdox=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mdox=warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);
    let matches = parse_args(&cleaned_args);

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let result = load_cli_config(config_path, &mut extra_params).and_then(|config| {
        match matches.subcommand() {
            Some(("inspect", sub_matches)) => {
                let path = sub_matches
                    .get_one::<String>("path")
                    .context("path is required")?;
                let transform = sub_matches
                    .get_one::<String>("transform")
                    .map(|s| s.as_str())
                    .unwrap_or(transforms::DEFAULT_TRANSFORM);
                handle_inspect_command(path, transform, &extra_params)
            }
            Some(("convert", sub_matches)) => {
                let input = sub_matches
                    .get_one::<String>("input")
                    .context("input is required")?;
                let title = sub_matches.get_one::<String>("title").map(|s| s.as_str());
                let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
                handle_convert_command(input, title, output, &extra_params, &config)
            }
            _ => bail!("Unknown subcommand. Use --help for usage information."),
        }
    });

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
) -> anyhow::Result<()> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading file '{path}'"))?;

    let output = transforms::execute_transform(&source, transform, extra_params)
        .map_err(anyhow::Error::msg)?;

    print!("{output}");
    Ok(())
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    title: Option<&str>,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &MdoxConfig,
) -> anyhow::Result<()> {
    let source =
        fs::read_to_string(input).with_context(|| format!("reading file '{input}'"))?;

    let mut registry = FormatRegistry::default();
    registry.register(DocxFormat::new(RenderOptions::from(config)));

    let output = output.unwrap_or(config.output.default_path.as_str());
    let to = registry
        .detect_format_from_filename(output)
        .unwrap_or_else(|| "docx".to_string());

    let blocks = registry.parse(&source, "markdown")?;

    let mut format_options = extra_params.clone();
    if let Some(title) = title {
        format_options.insert("title".to_string(), title.to_string());
    }

    let data = registry
        .serialize_with_options(&blocks, &to, &format_options)
        .context("serialization failed")?;

    fs::write(output, data.into_bytes()).with_context(|| format!("writing file '{output}'"))?;
    tracing::info!(path = output, format = to.as_str(), "document written");

    println!("✅ Document created: {output}");
    if to == "docx" {
        println!(
            "Tip: the table of contents fills in when the document is opened; \
            if it stays empty, right-click it and choose Update Field."
        );
    }
    Ok(())
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }

    println!("\nOutput formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            if format.supports_serialization() {
                println!("  {format_name:<10}{}", format.description());
            }
        }
    }
}

/// Layer defaults, `./mdox.toml`, `--config` and `--extra-*` overrides.
///
/// Overrides that name a configuration key are removed from `extra_params`.
fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> anyhow::Result<MdoxConfig> {
    let mut loader = Loader::new().with_optional_file("mdox.toml");
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }

    for (param, key) in CONFIG_OVERRIDES {
        if let Some(value) = extra_params.remove(*param) {
            loader = loader
                .set_override(key, value)
                .with_context(|| format!("applying --extra-{param}"))?;
        }
    }

    loader.build().context("failed to load configuration")
}
