//! Command-line interface for lean-grid
//! This binary transforms grid shortcodes in form markup and helps inspect and author them.
//!
//! Usage:
//!   lean-grid transform `<path|->` [--config `<file>`] [--preset `<name>`] [--legacy]
//!   lean-grid inspect `<path|->` [--format `<format>`] [--config `<file>`]
//!   lean-grid row-tag [--gap `<n>`] [--class `<class>`] [--wrap]
//!   lean-grid col-tag [--col `<n>`] [--sm `<n>`] [--md `<n>`] [--lg `<n>`] [--xl `<n>`] [--class `<class>`] [--wrap]
//!   lean-grid list-formats
//!   lean-grid features [--config `<file>`]

use clap::{Arg, ArgAction, ArgMatches, Command};
use lean_grid::grid::config::{Loader, Preset, Settings};
use lean_grid::grid::features::{Feature, FormPipeline};
use lean_grid::grid::generator::{close_tag, ColTag, RowTag};
use lean_grid::grid::processor::{available_formats, process_str, OutputFormat};
use lean_grid::grid::transform::Transformer;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("lean-grid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Grid layout shortcodes for Contact Form 7 markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("transform")
                .about("Rewrite grid shortcodes into HTML")
                .arg(path_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("preset")
                        .long("preset")
                        .short('p')
                        .help("Apply a named preset (e.g., 'lean-forms')"),
                )
                .arg(
                    Arg::new("legacy")
                        .long("legacy")
                        .help("Pair each opening tag with the first closing tag after it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the tokens or tree the transformer sees")
                .arg(path_arg())
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'token-simple', 'ast-tag')")
                        .default_value("ast-tag"),
                ),
        )
        .subcommand(
            Command::new("row-tag")
                .about("Generate a row shortcode")
                .arg(value_arg("gap", "Gap between columns in pixels"))
                .arg(value_arg("class", "Extra CSS class"))
                .arg(name_arg("row"))
                .arg(wrap_arg()),
        )
        .subcommand(
            Command::new("col-tag")
                .about("Generate a column shortcode")
                .arg(value_arg("col", "Column width out of 12"))
                .arg(value_arg("sm", "Width at the small breakpoint"))
                .arg(value_arg("md", "Width at the medium breakpoint"))
                .arg(value_arg("lg", "Width at the large breakpoint"))
                .arg(value_arg("xl", "Width at the extra large breakpoint"))
                .arg(value_arg("class", "Extra CSS class"))
                .arg(name_arg("col"))
                .arg(wrap_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available inspect formats"))
        .subcommand(
            Command::new("features")
                .about("List features and whether they are enabled")
                .arg(config_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("transform", sub)) => handle_transform_command(sub),
        Some(("inspect", sub)) => handle_inspect_command(sub),
        Some(("row-tag", sub)) => handle_row_tag_command(sub),
        Some(("col-tag", sub)) => handle_col_tag_command(sub),
        Some(("list-formats", _)) => handle_list_formats_command(),
        Some(("features", sub)) => handle_features_command(sub),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the form markup, or '-' for stdin")
        .required(true)
        .index(1)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML configuration file layered over the defaults")
}

fn value_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help)
}

fn name_arg(default: &'static str) -> Arg {
    Arg::new("name")
        .long("name")
        .help("Shortcode name")
        .default_value(default)
}

fn wrap_arg() -> Arg {
    Arg::new("wrap")
        .long("wrap")
        .help("Wrap stdin in the generated tags")
        .action(ArgAction::SetTrue)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn read_input(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            fail(format!("failed to read stdin: {}", e));
        }
        source
    } else {
        std::fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("failed to read {}: {}", path, e)))
    }
}

fn load_settings(matches: &ArgMatches, preset: Option<Preset>, legacy: bool) -> Settings {
    let mut loader = Loader::new();
    if let Some(preset) = preset {
        loader = loader.with_preset(preset);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if legacy {
        loader = loader
            .set_override("grid.matching", "legacy")
            .unwrap_or_else(|e| fail(e));
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

/// Handle the transform command
fn handle_transform_command(matches: &ArgMatches) {
    let preset = matches.get_one::<String>("preset").map(|name| {
        Preset::from_name(name).unwrap_or_else(|| {
            let available: Vec<&str> = Preset::ALL.iter().map(Preset::name).collect();
            fail(format!(
                "unknown preset '{}' (available: {})",
                name,
                available.join(", ")
            ))
        })
    });
    let settings = load_settings(matches, preset, matches.get_flag("legacy"));
    let pipeline = FormPipeline::from_settings(&settings).unwrap_or_else(|e| fail(e));

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    print!("{}", pipeline.render(&read_input(path)));
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches) {
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");
    let format = OutputFormat::from_string(format).unwrap_or_else(|e| fail(e));
    let settings = load_settings(matches, None, false);
    let transformer = Transformer::new(settings.grid).unwrap_or_else(|e| fail(e));

    let path = matches
        .get_one::<String>("path")
        .expect("path is a required argument");
    let output = process_str(&read_input(path), format, &transformer).unwrap_or_else(|e| fail(e));
    println!("{}", output.trim_end());
}

fn value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn print_tag(matches: &ArgMatches, open: String, snippet: String) {
    let name = matches
        .get_one::<String>("name")
        .expect("name has a default value");
    if matches.get_flag("wrap") {
        print!("{}{}{}", open, read_input("-"), close_tag(name));
    } else {
        println!("{}", snippet);
    }
}

/// Handle the row-tag command
fn handle_row_tag_command(matches: &ArgMatches) {
    let name = matches
        .get_one::<String>("name")
        .expect("name has a default value");
    let row = RowTag {
        gap: value(matches, "gap"),
        class: value(matches, "class"),
    };
    print_tag(matches, row.open_tag(name), row.snippet(name));
}

/// Handle the col-tag command
fn handle_col_tag_command(matches: &ArgMatches) {
    let name = matches
        .get_one::<String>("name")
        .expect("name has a default value");
    let col = ColTag {
        col: value(matches, "col"),
        sm: value(matches, "sm"),
        md: value(matches, "md"),
        lg: value(matches, "lg"),
        xl: value(matches, "xl"),
        class: value(matches, "class"),
    };
    print_tag(matches, col.open_tag(name), col.snippet(name));
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}

/// Handle the features command
fn handle_features_command(matches: &ArgMatches) {
    let settings = load_settings(matches, None, false);
    for feature in Feature::ALL {
        let state = if settings.features.is_enabled(feature) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{:<14} {:<8} {}", feature.key(), state, feature.label());
    }
}
