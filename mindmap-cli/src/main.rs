// Command-line interface for mindmap
//
// This binary converts between Markdown outlines and mind-map trees, and lets
// you inspect the intermediate stages of an import.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  mindmap <input> --to <format> [--from <format>] [--output <file>] [--resolve-images]
//          [--prune-empty] [--max-level <n>] [--auto-number]
//  mindmap convert <input> --to <format> ...   - Same as above (explicit)
//  mindmap inspect <path> [<transform>]        - Show the AST or tree built from a Markdown file
//
// Configuration is layered: embedded defaults, then ./mindmap.toml, then --config <path>.
// Diagnostics go to stderr through tracing; -v raises the level (-vv debug, -vvv trace).

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mindmap_babel::{
    resolve_images, ExportOptions, FormatRegistry, HttpImageResolver, ImageResolverOptions,
    ImportOptions, MarkdownImporter, MindMapRoot, TreeTransforms,
};
use mindmap_config::{Loader, MindmapConfig, PROJECT_CONFIG_FILE};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["inspect", "convert", "help"];

fn build_cli() -> Command {
    Command::new("mindmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown outlines and mind-map trees")
        .long_about(
            "mindmap folds Markdown headings, paragraphs and lists into a mind-map tree\n\
            (JSON) and writes trees back out as Markdown.\n\n\
            Commands:\n  \
            - convert: Transform between formats (default command)\n  \
            - inspect: View the Markdown AST or the built tree\n\n\
            Examples:\n  \
            mindmap notes.md --to json                  # Markdown to tree JSON (stdout)\n  \
            mindmap tree.json --to markdown -o out.md   # Tree JSON back to Markdown\n  \
            mindmap inspect notes.md                    # Indented outline of the tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a mindmap.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (repeat for more)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a Markdown file is imported")
                .long_about(
                    "View the structures built while importing a Markdown file.\n\n\
                    Transforms:\n  \
                    - tree-outline: Indented outline of the tree (default)\n  \
                    - tree-json:    The tree as stored\n  \
                    - ast-json:     The Markdown AST the tree is built from",
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
                        .help("Transform to apply. Defaults to 'tree-outline'")
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
                .about("Convert between formats (default command)")
                .long_about(
                    "Convert between Markdown and mind-map tree JSON.\n\n\
                    Supported formats:\n  \
                    - markdown:      Markdown outline (.md, .markdown)\n  \
                    - markdown-list: Nested bullet list (output only)\n  \
                    - json:          Mind-map tree (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("resolve-images")
                        .long("resolve-images")
                        .help("Fetch images, embed them as data URLs and record their size")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("prune-empty")
                        .long("prune-empty")
                        .help("Drop nodes with blank text and no image, hyperlink or note")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("max-level")
                        .long("max-level")
                        .value_name("N")
                        .help("Keep only the first N levels of the tree (0 keeps all)")
                        .value_parser(clap::value_parser!(usize))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("auto-number")
                        .long("auto-number")
                        .help("Prefix nodes with outline numbers (1, 1.1, 1.2.1, ...)")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config, matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform, &config);
        }
        Some(("convert", sub_matches)) => handle_convert_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MindmapConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Install the stderr subscriber. `-v` wins over `RUST_LOG`, which wins
/// over the configured level.
fn init_logging(config: &MindmapConfig, verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn importer_from_config(config: &MindmapConfig) -> MarkdownImporter {
    MarkdownImporter::new(ImportOptions::from(&config.import))
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, config: &MindmapConfig) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let importer = importer_from_config(config);
    let output = transforms::execute_transform(&source, transform, &importer).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the convert command
fn handle_convert_command(sub_matches: &ArgMatches, config: &MindmapConfig) {
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");
    let to = sub_matches.get_one::<String>("to").expect("to is required");
    let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
    let resolve = sub_matches.get_flag("resolve-images") || config.images.resolve;

    let registry = FormatRegistry::with_options(
        ImportOptions::from(&config.import),
        ExportOptions::from(&config.export),
    );

    // Auto-detect --from if not provided
    let from = match sub_matches.get_one::<String>("from") {
        Some(f) => f.to_string(),
        None => match registry.detect_format_from_filename(input) {
            Some(detected) => detected,
            None => {
                eprintln!("Error: Could not detect format from filename '{input}'");
                eprintln!("Please specify --from explicitly");
                std::process::exit(1);
            }
        },
    };

    // Validate formats exist
    for name in [from.as_str(), to.as_str()] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let mut tree = registry.parse(&source, &from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    debug!(from = %from, nodes = tree.node_count(), "parsed input");

    let transforms = tree_transforms(sub_matches, config);
    if !transforms.is_noop() {
        transforms.apply(&mut tree);
        debug!(nodes = tree.node_count(), "applied tree transforms");
    }

    if resolve {
        run_image_pass(&mut tree, input, config);
    }

    let result = registry.serialize(&tree, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Flags switch transforms on; `--max-level` replaces the configured depth.
fn tree_transforms(sub_matches: &ArgMatches, config: &MindmapConfig) -> TreeTransforms {
    let configured = TreeTransforms::from(&config.tree);
    TreeTransforms {
        prune_empty: sub_matches.get_flag("prune-empty") || configured.prune_empty,
        max_level: sub_matches
            .get_one::<usize>("max-level")
            .copied()
            .unwrap_or(configured.max_level),
        auto_number: sub_matches.get_flag("auto-number") || configured.auto_number,
    }
}

/// Resolve images on a single-threaded runtime. Relative paths are read
/// next to the input file unless the config names a directory.
fn run_image_pass(tree: &mut MindMapRoot, input: &str, config: &MindmapConfig) {
    let mut options = ImageResolverOptions::from(&config.images);
    if options.base_dir.is_none() {
        options.base_dir = Path::new(input).parent().map(Path::to_path_buf);
    }

    let resolver = HttpImageResolver::new(options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error starting async runtime: {e}");
            std::process::exit(1);
        });

    let summary = runtime.block_on(resolve_images(tree, &resolver));
    info!(
        resolved = summary.resolved,
        failed = summary.failed,
        "image pass finished"
    );
}
