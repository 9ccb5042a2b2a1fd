// Command-line interface for vitae
//
// This binary turns a YAML outline into a CV. The rendering itself lives in vitae-babel;
// this crate only parses arguments, loads configuration, sets up logging and decides
// where files go.
//
// Usage:
//  vitae [OUT] [-i <input>] (--latex|--pdf|--html) [--cache]   - Build a CV (default)
//  vitae build [OUT] [-i <input>] (--latex|--pdf|--html)       - Same as above (explicit)
//  vitae inspect <path> [<transform>]                          - Debug view of the parsed tree
//  vitae --list-formats                                        - List output formats
//
// OUT is the output path without extension; the mode flag adds `.tex`, `.pdf` or `.html`.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  vitae --html --extra-css-path print.css

use vitae_cli::transforms;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use vitae_babel::cache::{content_hash, Cache};
use vitae_babel::publish::{publish, PublishSpec};
use vitae_babel::{Document, FormatRegistry, Toolchain, VitaeError};
use vitae_config::{Loader, VitaeConfig, PROJECT_FILE};

const SUBCOMMANDS: &[&str] = &["build", "inspect", "help"];

/// Output mode selected by one of the mutually exclusive flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Latex,
    Pdf,
    Html,
}

impl Mode {
    fn from_matches(matches: &ArgMatches) -> Option<Self> {
        if matches.get_flag("latex") {
            Some(Mode::Latex)
        } else if matches.get_flag("pdf") {
            Some(Mode::Pdf)
        } else if matches.get_flag("html") {
            Some(Mode::Html)
        } else {
            None
        }
    }

    /// Registry name of the format.
    fn format(self) -> &'static str {
        match self {
            Mode::Latex => "latex",
            Mode::Pdf => "pdf",
            Mode::Html => "html",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Mode::Latex => "LaTeX",
            Mode::Pdf => "PDF",
            Mode::Html => "HTML",
        }
    }
}

/// Everything a build needs, resolved from arguments and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildRequest {
    input: PathBuf,
    out: String,
    mode: Mode,
    use_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BuildOutcome {
    Generated(PathBuf),
    Unchanged,
}

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

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
    Command::new("vitae")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a CV in LaTeX, PDF or HTML from a YAML outline")
        .long_about(
            "vitae renders a CV written as a nested YAML list.\n\n\
            Each label may be followed by a list of its children. Top-level labels become\n\
            sections; a section whose entries have children of their own becomes a\n\
            two-column table.\n\n\
            Examples:\n  \
            vitae --pdf                      # cv.yaml -> cv.pdf\n  \
            vitae resume -i me.yaml --html   # me.yaml -> resume.html\n  \
            vitae --latex --cache            # skip work when cv.yaml is unchanged\n  \
            vitae inspect cv.yaml            # show the parsed tree",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a vitae.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Build a CV (default command)")
                .arg(
                    Arg::new("out")
                        .help("Output path without extension (default from config: cv)")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("PATH")
                        .help("YAML source file (default from config: cv.yaml)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("latex")
                        .long("latex")
                        .help("Write LaTeX source to <OUT>.tex")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("pdf")
                        .long("pdf")
                        .help("Compile a PDF to <OUT>.pdf")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Write a self-contained page to <OUT>.html")
                        .action(ArgAction::SetTrue),
                )
                .group(
                    ArgGroup::new("mode")
                        .args(["latex", "pdf", "html"])
                        .required(true)
                        .multiple(false),
                )
                .arg(
                    Arg::new("cache")
                        .long("cache")
                        .help("Skip work when the input is unchanged since the last run")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show the parsed tree of a CV source")
                .arg(
                    Arg::new("path")
                        .help("Path to the YAML file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("View to print. Defaults to 'tree-treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

/// Parse arguments, injecting the `build` subcommand when none was given.
fn parse_args(cli: Command, args: &[String]) -> Result<ArgMatches, clap::Error> {
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => Ok(matches),
        Err(e) => {
            let injectable = !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
                && args
                    .get(1)
                    .map(|first| !SUBCOMMANDS.contains(&first.as_str()))
                    .unwrap_or(false);
            if !injectable {
                return Err(e);
            }

            let mut new_args = vec![args[0].clone(), "build".to_string()];
            new_args.extend_from_slice(&args[1..]);
            cli.try_get_matches_from(&new_args)
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let matches = parse_args(build_cli(), &cleaned_args).unwrap_or_else(|e| e.exit());

    setup_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("build", sub_matches)) => {
            let request = build_request(sub_matches, &config);
            match run_build(&request, &config, &extra_params) {
                Ok(BuildOutcome::Generated(path)) => println!(
                    "{} CV generated: {}",
                    request.mode.display_name(),
                    path.display()
                ),
                Ok(BuildOutcome::Unchanged) => println!("No changes."),
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                eprintln!("Error: missing path");
                std::process::exit(1);
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Initialize the global subscriber. `RUST_LOG` takes precedence over `-v`.
fn setup_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_request(matches: &ArgMatches, config: &VitaeConfig) -> BuildRequest {
    let Some(mode) = Mode::from_matches(matches) else {
        eprintln!("Error: one of --latex, --pdf or --html is required");
        std::process::exit(1);
    };

    BuildRequest {
        input: matches
            .get_one::<String>("input")
            .map(PathBuf::from)
            .unwrap_or_else(|| config.input.path.clone()),
        out: matches
            .get_one::<String>("out")
            .cloned()
            .unwrap_or_else(|| config.output.stem.clone()),
        mode,
        use_cache: matches.get_flag("cache"),
    }
}

/// Render the requested output, honoring the cache.
///
/// The document is fully rendered in memory before the output file is touched, so a
/// failure never leaves a partial artifact behind.
fn run_build(
    request: &BuildRequest,
    config: &VitaeConfig,
    extra_params: &HashMap<String, String>,
) -> Result<BuildOutcome, VitaeError> {
    let document = Document::from_path(&request.input)?;
    let toolchain = Toolchain::from(&config.convert);
    let registry = FormatRegistry::with_toolchain(&toolchain);
    let format = request.mode.format();

    let output = PathBuf::from(format!(
        "{}.{}",
        request.out,
        registry.output_extension(format)?
    ));
    let stem = output_stem(&request.out);
    let cache_key = format!("{stem}.{format}");

    let cache = if request.use_cache {
        Some(Cache::open(&config.cache.directory)?)
    } else {
        None
    };

    let options = format_options(request.mode, config, cache.as_ref(), &stem, extra_params);
    let digest = build_digest(&document, &toolchain, &options);

    if let Some(cache) = &cache {
        if output.exists() && cache.is_fresh(&cache_key, &digest) {
            info!(output = %output.display(), "input unchanged, skipping generation");
            return Ok(BuildOutcome::Unchanged);
        }
    }

    debug!(format, ?options, input = %request.input.display(), "building");

    publish(
        &registry,
        PublishSpec::new(&document, format)
            .with_output_path(&output)
            .with_options(options),
    )?;

    if let Some(cache) = &cache {
        cache.record(&cache_key, &digest)?;
    }

    Ok(BuildOutcome::Generated(output))
}

/// Digest of everything that shapes an output: the document, the external tools and the
/// resolved format options. A custom stylesheet contributes its contents, not its path.
fn build_digest(
    document: &Document,
    toolchain: &Toolchain,
    options: &HashMap<String, String>,
) -> String {
    let mut parts = vec![
        document.hashsum(),
        format!("converter={}", toolchain.converter),
        format!("compiler={}", toolchain.compiler),
    ];

    let mut pairs: Vec<_> = options.iter().collect();
    pairs.sort();
    parts.extend(pairs.into_iter().map(|(key, value)| format!("{key}={value}")));

    if let Some(css) = options.get("css-path") {
        // Unreadable stylesheets hash as empty; the build itself reports the error.
        let stylesheet = fs::read(css)
            .map(|bytes| content_hash(&bytes))
            .unwrap_or_default();
        parts.push(format!("stylesheet={stylesheet}"));
    }

    content_hash(parts.join("\u{1e}").as_bytes())
}

/// File name part of the output path, used to name cache entries and build files.
fn output_stem(out: &str) -> String {
    Path::new(out)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("cv")
        .to_string()
}

fn format_options(
    mode: Mode,
    config: &VitaeConfig,
    cache: Option<&Cache>,
    stem: &str,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();

    match mode {
        Mode::Pdf => {
            if let Some(cache) = cache {
                options.insert("build-dir".to_string(), cache.dir().display().to_string());
                options.insert("reuse".to_string(), "true".to_string());
            }
            options.insert("jobname".to_string(), stem.to_string());
        }
        Mode::Html => {
            if let Some(css) = &config.convert.html.custom_css {
                options.insert("css-path".to_string(), css.display().to_string());
            }
        }
        Mode::Latex => {}
    }

    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }

    options
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let output = transforms::execute_transform(&source, transform).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            println!("  {:<10} {}", format_name, format.description());
        }
    }

    println!("\nInspect transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> VitaeConfig {
    let loader = Loader::new().with_optional_file(PROJECT_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Error: failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move extras that map onto configuration keys into the configuration.
fn apply_config_overrides(config: &mut VitaeConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        config.convert.html.custom_css = Some(PathBuf::from(path));
    }
    if let Some(converter) = extra_params.remove("converter") {
        config.convert.latex.converter = converter;
    }
    if let Some(compiler) = extra_params.remove("compiler") {
        config.convert.pdf.compiler = compiler;
    }
    if let Some(dir) = extra_params.remove("cache-dir") {
        config.cache.directory = PathBuf::from(dir);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}
