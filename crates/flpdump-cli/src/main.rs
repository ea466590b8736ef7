use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use log::{LevelFilter, debug};

use flpdump_core::ProjectFile;

mod render;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("FLPDUMP_BUILD_COMMIT"),
    ", ",
    env!("FLPDUMP_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  flpdump project inspect song.flp\n  flpdump project show song.flp --json --pretty -o song.json\n  flpdump project inspect 'drafts/*.flp'";

#[derive(Parser, Debug)]
#[command(name = "flpdump")]
#[command(version = LONG_VERSION)]
#[command(
    about = "Read-only inspector for FL Studio project files (.flp).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Disable colored output (NO_COLOR is honoured too)
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on FL Studio project files.
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ProjectCommands {
    /// Decode a project and print its metadata, channels and mixer.
    #[command(alias = "show")]
    #[command(after_help = EXAMPLES)]
    Inspect {
        /// Path to a .flp file (a glob pattern must match exactly one file)
        input: PathBuf,

        /// Emit the decoded model as JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long, requires = "json")]
        pretty: bool,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let result = match cli.command {
        Commands::Project { command } => match command {
            ProjectCommands::Inspect {
                input,
                json,
                pretty,
                output,
                quiet,
            } => cmd_project_inspect(input, json, pretty, output, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: LogLevel) {
    env_logger::Builder::from_default_env()
        .filter_level(level.into())
        .format_timestamp(None)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_project_inspect(
    input: PathBuf,
    json: bool,
    pretty: bool,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if let Some(output_path) = output.as_ref() {
        ensure_distinct_output(&resolved_input, output_path)?;
    }

    debug!("decoding {}", resolved_input.display());
    let file = flpdump_core::decode_project_file(&resolved_input).map_err(|err| {
        CliError::new(
            format!("failed to decode {}: {}", resolved_input.display(), err),
            Some("the file may be truncated or not an FL Studio project".to_string()),
        )
    })?;

    let Some(output_path) = output else {
        let rendered = render_output(&file, json, pretty)?;
        print!("{}", rendered);
        return Ok(());
    };

    // Files never carry escape codes.
    colored::control::set_override(false);
    let rendered = render_output(&file, json, pretty)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output_path, rendered)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;

    if !quiet {
        eprintln!("OK: output written -> {}", output_path.display());
    }
    Ok(())
}

fn render_output(file: &ProjectFile, json: bool, pretty: bool) -> Result<String, CliError> {
    if !json {
        return Ok(render::Summary(file).to_string());
    }
    let mut out = if pretty {
        serde_json::to_string_pretty(file)
    } else {
        serde_json::to_string(file)
    }
    .context("JSON serialization failed")?;
    out.push('\n');
    Ok(out)
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A missing output directory cannot contain the input.
    let Ok(output_dir) = fs::canonicalize(output_dir) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a .flp project".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a .flp project".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "flp" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .flp file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected a .flp file".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single project file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
