//! CLI module containing the main entry point logic.
//!
//! Reads a Java expression, converts it in the requested direction and
//! prints the replacement text.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::concat::ChainPolicy;
use crate::config::{self, ConvertOptions};
use crate::convert::{Replacement, convert_to_block, convert_to_literal};
use crate::error::ConvertError;
use crate::fatal_error;
use crate::indent::MarginPolicy;
use crate::parser::{self, ParsedExpression};
use crate::to_block::FormatStyle;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code used when the conversion does not apply to the input.
pub const NOT_APPLICABLE_EXIT_CODE: i32 = 2;

/// CLI arguments for the textblock tool.
#[derive(ClapParser)]
#[command(name = "textblock")]
#[command(version = PKG_VERSION)]
#[command(
    about = "Convert Java string literal concatenations to text blocks and back",
    long_about = None
)]
struct Cli {
    /// File holding the expression to convert (`-` or omitted reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Conversion direction
    #[arg(long, value_name = "DIRECTION", default_value = "auto")]
    direction: Direction,

    /// How the margin of a text block is computed
    #[arg(long, value_name = "POLICY")]
    margin_policy: Option<MarginPolicy>,

    /// Formatting call used when the block has placeholders
    #[arg(long, value_name = "STYLE")]
    format_style: Option<FormatStyle>,

    /// Only convert concatenations made entirely of literals
    #[arg(long)]
    literals_only: bool,

    /// Config file, or a directory containing `.textblock.json`
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format for the replacement (text, json)
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    output_format: OutputFormatArg,

    /// Log conversion stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Which way to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Direction {
    /// A lone text block becomes literals, anything else becomes a block
    Auto,
    /// Literals to a text block
    ToBlock,
    /// A text block to literals
    ToLiteral,
}

/// Output format for the replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormatArg {
    /// The replacement source text (default)
    Text,
    /// The serialized replacement as JSON
    Json,
}

impl OutputFormatArg {
    /// Render a replacement according to this format
    #[must_use]
    pub fn format_result(self, replacement: &Replacement) -> String {
        match self {
            Self::Text => replacement.text.clone(),
            Self::Json => serde_json::to_string_pretty(replacement)
                .unwrap_or_else(|_| replacement.text.clone()),
        }
    }
}

impl Cli {
    /// Apply flags on top of options loaded from a config file.
    fn apply_overrides(&self, mut options: ConvertOptions) -> ConvertOptions {
        if let Some(policy) = self.margin_policy {
            options.margin_policy = policy;
        }
        if let Some(style) = self.format_style {
            options.format_style = style;
        }
        if self.literals_only {
            options.chain_policy = ChainPolicy::LiteralsOnly;
        }
        options
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when embedded in another tool.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Convert a parsed expression in the given direction.
///
/// # Errors
///
/// Returns `Err` when the expression has nothing to convert in that
/// direction, or the conversion itself does not apply.
pub fn convert_expression(
    parsed: &ParsedExpression,
    direction: Direction,
    options: &ConvertOptions,
) -> Result<Replacement, ConvertError> {
    let direction = match direction {
        Direction::Auto if parsed.single_text_block().is_some() => Direction::ToLiteral,
        Direction::Auto => Direction::ToBlock,
        other => other,
    };
    debug!(?direction, operands = parsed.operands.len(), "converting expression");

    match direction {
        Direction::ToLiteral => {
            let block = parsed
                .single_text_block()
                .ok_or(ConvertError::NotATextBlock)?;
            convert_to_literal(block, options)
        }
        Direction::ToBlock | Direction::Auto => {
            if !parsed.has_string_literal() {
                return Err(ConvertError::NoStringLiteral);
            }
            convert_to_block(&parsed.to_operands(), options)
        }
    }
}

/// Read the expression from a file, or stdin for `None` and `-`.
fn read_input(input: Option<&Path>) -> Result<(String, Option<String>), String> {
    match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .map(|source| (source, Some(path.display().to_string())))
            .map_err(|e| format!("Error reading {}: {e}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("Error reading stdin: {e}"))?;
            Ok((source, None))
        }
    }
}

/// Main CLI logic that can be called from external wrappers.
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(ref config_path) = cli.config {
        config::set_custom_config_path(Some(config_path.clone()));
    }

    let options = match config::load_options() {
        Ok(options) => cli.apply_overrides(options),
        Err(e) => fatal_error(&format!("Error: {e}")),
    };

    let (source, filename) = match read_input(cli.input.as_deref()) {
        Ok(read) => read,
        Err(message) => fatal_error(&message),
    };

    let parsed = match parser::parse(source.trim(), filename.as_deref()) {
        Ok(parsed) => parsed,
        Err(e) => fatal_error(&e.to_string()),
    };

    match convert_expression(&parsed, cli.direction, &options) {
        Ok(replacement) => println!("{}", cli.output_format.format_result(&replacement)),
        Err(reason) => {
            eprintln!("Not applicable: {reason}");
            process::exit(NOT_APPLICABLE_EXIT_CODE);
        }
    }
}
