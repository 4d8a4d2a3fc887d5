//! Literal tokens shared by both conversion directions.

/// Opening and closing delimiter of a text block.
pub const THREE_QUOTES: &str = "\"\"\"";
pub const QUOTE: char = '"';
pub const ESCAPED_QUOTE: &str = "\\\"";
pub const BACKSLASH: char = '\\';
pub const NEW_LINE: char = '\n';
/// The two-character `\n` escape as it appears in literal source.
pub const ESCAPED_NEW_LINE: &str = "\\n";
pub const SPACE: char = ' ';
pub const TAB: char = '\t';
/// Escapes that keep trailing whitespace on a text block line.
pub const ESCAPED_SPACE: &str = "\\s";
pub const ESCAPED_TAB: &str = "\\t";

/// Substitution token written in place of a non-literal operand.
pub const PLACEHOLDER: &str = "%s";
pub const PERCENT: char = '%';
pub const ESCAPED_PERCENT: &str = "%%";

/// Separator between rendered per-line literals.
pub const CONCAT_JOINER: &str = "+\n";
/// Separator between formatting-call arguments.
pub const ARGUMENT_SEPARATOR: &str = ", ";
