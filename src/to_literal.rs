//! Text block to concatenated string literal conversion.
//!
//! Each normalized line of the block becomes its own literal ending in an
//! escaped newline, and the literals are joined with `+`. The last literal
//! drops its escaped newline, so the block's implicit trailing newline is
//! not reproduced.

use tracing::debug;

use crate::convert::Replacement;
use crate::error::ConvertError;
use crate::escape::escape_quotes;
use crate::indent::{self, LineRecord, MarginPolicy};
use crate::literals::{CONCAT_JOINER, ESCAPED_NEW_LINE, NEW_LINE, QUOTE, THREE_QUOTES};

/// Convert the raw source of a text block, delimiters included.
///
/// # Errors
///
/// Returns [`ConvertError::EmptyInput`] for empty or whitespace-only input.
pub fn convert(block: &str, policy: MarginPolicy) -> Result<Replacement, ConvertError> {
    if block.trim().is_empty() {
        return Err(ConvertError::EmptyInput);
    }

    let content = block.replace(THREE_QUOTES, "");
    let content = content.trim_start_matches(NEW_LINE);
    let escaped = escape_quotes(content);

    let closing_tabs = closing_indent(block);
    let normalized = indent::normalize_with_closing(escaped.lines(), closing_tabs, policy);
    debug!(
        margin = normalized.margin,
        lines = normalized.lines.len(),
        "normalized text block"
    );

    Ok(Replacement {
        text: render_literals(&normalized.lines),
        replaces_whole_chain: false,
    })
}

/// Tab run in front of the closing delimiter, when it sits on its own line.
fn closing_indent(block: &str) -> Option<usize> {
    let before = block.trim_end().strip_suffix(THREE_QUOTES)?;
    let (_, closing) = before.rsplit_once(NEW_LINE)?;
    let record = LineRecord::new(closing);
    record.is_blank().then_some(record.leading_tabs)
}

/// Render lines as a `+`-joined chain of literals.
///
/// No lines render as the empty literal `""`.
#[must_use]
pub fn render_literals(lines: &[String]) -> String {
    let Some((last, init)) = lines.split_last() else {
        return format!("{QUOTE}{QUOTE}");
    };

    init.iter()
        .map(|line| format!("{QUOTE}{line}{ESCAPED_NEW_LINE}{QUOTE}"))
        .chain(std::iter::once(format!("{QUOTE}{last}{QUOTE}")))
        .collect::<Vec<_>>()
        .join(CONCAT_JOINER)
}
