//! String literal (or concatenation) to text block conversion.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::concat::{Operand, PlaceholderSet, check_convertible, classify};
use crate::config::ConvertOptions;
use crate::convert::Replacement;
use crate::error::ConvertError;
use crate::escape::{escape_delimiter_runs, escape_trailing_whitespace, unescape_literal};
use crate::literals::{NEW_LINE, THREE_QUOTES};

/// Formatting call used when a block carries placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormatStyle {
    /// `"""...""".formatted(args)`
    #[default]
    Formatted,
    /// `String.format("""...""", args)`
    StringFormat,
}

/// What is being replaced: a lone literal or a whole concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionTarget {
    SingleLiteral(String),
    Chain(Vec<Operand>),
}

impl ConversionTarget {
    /// Pick the target for a list of operands. More than one operand means
    /// the literal sits inside a concatenation.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an empty list or a single non-literal operand.
    pub fn from_operands(operands: &[Operand]) -> Result<Self, ConvertError> {
        match operands {
            [] => Err(ConvertError::NoOperands),
            [single] if single.is_literal => Ok(Self::SingleLiteral(single.text.clone())),
            [_] => Err(ConvertError::NonLiteralOperand),
            _ => Ok(Self::Chain(operands.to_vec())),
        }
    }

    #[must_use]
    pub fn replaces_whole_chain(&self) -> bool {
        matches!(self, Self::Chain(_))
    }
}

/// Convert a target into text block source.
///
/// # Errors
///
/// Returns `Err` if a chain is not convertible under the configured
/// [`ChainPolicy`](crate::concat::ChainPolicy).
pub fn convert(
    target: &ConversionTarget,
    options: &ConvertOptions,
) -> Result<Replacement, ConvertError> {
    match target {
        ConversionTarget::SingleLiteral(text) => Ok(convert_single_literal(text)),
        ConversionTarget::Chain(operands) => convert_chain(operands, options),
    }
}

fn convert_single_literal(text: &str) -> Replacement {
    let content = unescape_literal(text.trim());
    Replacement {
        text: render_block(&content),
        replaces_whole_chain: false,
    }
}

fn convert_chain(operands: &[Operand], options: &ConvertOptions) -> Result<Replacement, ConvertError> {
    check_convertible(operands, options.chain_policy)?;

    let classified = classify(operands);
    let block = render_block(&classified.text);
    let text = if classified.placeholders.is_empty() {
        block
    } else {
        wrap_in_format_call(&block, &classified.placeholders, options.format_style)
    };

    Ok(Replacement {
        text,
        replaces_whole_chain: true,
    })
}

/// Put content between delimiters, each on its own line.
///
/// Trailing whitespace on a content line is escaped so the block keeps it.
#[must_use]
pub fn render_block(content: &str) -> String {
    let content = escape_delimiter_runs(content);
    let content = escape_trailing_whitespace(&content);
    format!("{THREE_QUOTES}{NEW_LINE}{content}{NEW_LINE}{THREE_QUOTES}")
}

fn wrap_in_format_call(block: &str, placeholders: &PlaceholderSet, style: FormatStyle) -> String {
    let arguments = placeholders.arguments();
    debug!(?style, arguments = %arguments, "wrapping block in formatting call");
    match style {
        FormatStyle::Formatted => format!("{block}.formatted({arguments})"),
        FormatStyle::StringFormat => format!("String.format({block}, {arguments})"),
    }
}
