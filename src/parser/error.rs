//! User-friendly parse error types and formatting.
//!
//! Converts raw pest parser errors into structured, human-readable diagnostics
//! with source context, precise column indicators, and actionable hints.

use std::fmt;

use super::Rule;

/// A structured, user-friendly parser error.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message (no raw rule names).
    pub message: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed) where the error begins.
    pub col: usize,
    /// End column for span errors (used to size the underline caret).
    pub col_end: Option<usize>,
    /// The full text of the offending source line.
    pub source_line: Option<String>,
    /// Optional source file name shown in the error header.
    pub filename: Option<String>,
    /// Optional suggestion to help the user fix the error.
    pub hint: Option<String>,
}

impl ParseError {
    /// Build a `ParseError` from a pest error, enriching it with source context.
    ///
    /// * `error`    – the raw pest error
    /// * `source`   – full source text that was being parsed
    /// * `filename` – optional file name to include in the error header
    #[must_use]
    pub fn from_pest(
        error: &pest::error::Error<Rule>,
        source: &str,
        filename: Option<&str>,
    ) -> Self {
        let (line, col, col_end) = match error.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c, None),
            pest::error::LineColLocation::Span((sl, sc), (el, ec)) => {
                let end = if sl == el { Some(ec) } else { None };
                (sl, sc, end)
            }
        };

        let source_line = source
            .lines()
            .nth(line.saturating_sub(1))
            .map(str::to_string);

        let (message, hint) = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } => (
                friendly_message(positives, source),
                friendly_hint(positives, source, source_line.as_deref()),
            ),
            pest::error::ErrorVariant::CustomError { message } => (message.clone(), None),
        };

        ParseError {
            message,
            line,
            col,
            col_end,
            source_line,
            filename: filename.map(str::to_string),
            hint,
        }
    }
}

/// Return a short, user-facing label for a grammar rule, or `None` to omit it.
fn rule_label(rule: Rule) -> Option<&'static str> {
    match rule {
        Rule::literal_operand | Rule::string_literal => Some("string literal"),
        Rule::text_block => Some("text block (`\"\"\" ... \"\"\"`)"),
        Rule::char_literal => Some("char literal"),
        Rule::expression_operand => Some("expression"),
        // EOI and all silent rules are suppressed.
        _ => None,
    }
}

/// Compose a human-readable message from the expected rule set.
fn friendly_message(positives: &[Rule], source: &str) -> String {
    if source.trim().is_empty() {
        return "expected an expression, found empty input".to_string();
    }

    let mut named: Vec<&str> = Vec::new();
    for label in positives.iter().copied().filter_map(rule_label) {
        if !named.contains(&label) {
            named.push(label);
        }
    }

    match named.as_slice() {
        [] => "unexpected token".to_string(),
        [single] => format!("expected {single}"),
        [a, b] => format!("expected {a} or {b}"),
        many => {
            if let Some((last, rest)) = many.split_last() {
                format!("expected {} or {}", rest.join(", "), last)
            } else {
                "unexpected token".to_string()
            }
        }
    }
}

/// Return an actionable hint based on the failing line and expected rules.
fn friendly_hint(positives: &[Rule], source: &str, source_line: Option<&str>) -> Option<String> {
    if let Some(line) = source_line
        && has_unclosed_quote(line)
        && !source.contains("\"\"\"")
    {
        return Some(
            "A string literal must be closed with `\"` on the same line. \
             Use a text block (`\"\"\"`) for text that spans lines."
                .to_string(),
        );
    }

    if source.trim_end().ends_with('+') {
        return Some("Every `+` must be followed by an operand, e.g. `\"text\" + value`.".to_string());
    }

    let open = source.chars().filter(|c| matches!(c, '(' | '[' | '{')).count();
    let close = source.chars().filter(|c| matches!(c, ')' | ']' | '}')).count();
    if open != close {
        return Some("Brackets must be balanced: check for a missing `)`, `]` or `}`.".to_string());
    }

    if positives.contains(&Rule::expression_operand) {
        return Some(
            "Expected operands joined with `+`, such as `\"Hello, \" + name`.".to_string(),
        );
    }

    None
}

/// True when the line has an odd number of unescaped double quotes.
fn has_unclosed_quote(line: &str) -> bool {
    let mut quotes = 0usize;
    let mut escaped = false;
    for ch in line.chars() {
        match ch {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => quotes += 1,
            _ => escaped = false,
        }
        if ch != '\\' {
            escaped = false;
        }
    }
    quotes % 2 == 1
}

/// Format the caret underline for an error at `col` with optional `col_end`.
fn underline(col: usize, col_end: Option<usize>) -> String {
    let start = col.saturating_sub(1);
    let len = col_end.map_or(1, |end| end.saturating_sub(col).max(1));
    format!("{}{}", " ".repeat(start), "^".repeat(len))
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ── error header ────────────────────────────────────────────────────
        //   error: <message>
        //     --> <file>:<line>:<col>
        writeln!(f, "error: {}", self.message)?;

        let location = match &self.filename {
            Some(name) => format!("{name}:{}:{}", self.line, self.col),
            None => format!("{}:{}", self.line, self.col),
        };
        writeln!(f, "  --> {location}")?;

        // ── source context ──────────────────────────────────────────────────
        //    |
        // NN | <source line>
        //    | <caret>
        if let Some(ref src) = self.source_line {
            let num = self.line.to_string();
            let pad = " ".repeat(num.len());

            writeln!(f, "   {pad} |")?;
            writeln!(f, "   {num} | {src}")?;
            writeln!(f, "   {pad} | {}", underline(self.col, self.col_end))?;
        }

        // ── hint ─────────────────────────────────────────────────────────────
        if let Some(ref hint) = self.hint {
            writeln!(f)?;
            write!(f, "   = hint: {hint}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{super::ExpressionParser, *};
    use pest::Parser;

    /// Drive a real pest parse failure and convert it to `ParseError`.
    fn parse_err(input: &str, filename: Option<&str>) -> ParseError {
        let err = ExpressionParser::parse(Rule::expression, input)
            .expect_err("expected a parse failure for this input");
        ParseError::from_pest(&err, input, filename)
    }

    #[test]
    fn test_display_includes_filename_and_location() {
        let rendered = parse_err("\"unclosed string", Some("Greeting.java")).to_string();
        assert!(
            rendered.contains("Greeting.java:"),
            "filename missing in:\n{rendered}"
        );
        assert!(rendered.contains("error:"), "'error:' prefix missing in:\n{rendered}");
        assert!(rendered.contains("-->"), "location arrow missing in:\n{rendered}");
    }

    #[test]
    fn test_display_without_filename() {
        let rendered = parse_err("\"unclosed string", None).to_string();
        assert!(!rendered.contains(".java"), "unexpected filename in:\n{rendered}");
        assert!(rendered.contains("-->"), "location arrow missing in:\n{rendered}");
    }

    #[test]
    fn test_source_line_and_caret_present() {
        let rendered = parse_err("\"a\" + \"unclosed here", None).to_string();
        assert!(
            rendered.contains("unclosed here"),
            "source line missing in:\n{rendered}"
        );
        assert!(rendered.contains('^'), "caret missing in:\n{rendered}");
    }

    #[test]
    fn test_no_raw_rule_names_in_message() {
        for input in ["\"unclosed", "\"a\" +", "(a + b", ""] {
            let err = parse_err(input, None);
            assert!(
                !err.message.contains("Rule::") && !err.message.contains('_'),
                "raw rule name in message for `{input}`: {}",
                err.message
            );
        }
    }

    #[test]
    fn test_unclosed_quote_hint() {
        let err = parse_err("\"unclosed", None);
        assert!(
            err.hint.as_deref().unwrap_or("").contains("closed with"),
            "got hint: {:?}",
            err.hint
        );
    }

    #[test]
    fn test_missing_operand_hint() {
        let err = parse_err("\"a\" +", None);
        assert!(
            err.hint.as_deref().unwrap_or("").contains("followed by an operand"),
            "got hint: {:?}",
            err.hint
        );
    }

    #[test]
    fn test_unbalanced_bracket_hint() {
        let err = parse_err("\"a\" + call(x", None);
        assert!(
            err.hint.as_deref().unwrap_or("").contains("balanced"),
            "got hint: {:?}",
            err.hint
        );
    }

    #[test]
    fn test_empty_input_message() {
        let err = parse_err("   ", None);
        assert!(err.message.contains("empty input"), "got: {}", err.message);
    }

    #[test]
    fn test_multiline_error_points_to_correct_line() {
        let input = "\"ok\" +\n\"unclosed";
        let err = parse_err(input, None);
        assert_eq!(err.line, 2, "error should point to second line");
        assert!(
            err.source_line.as_deref().unwrap_or("").contains("unclosed"),
            "source_line should contain the bad token; got: {:?}",
            err.source_line
        );
    }

    #[test]
    fn test_has_unclosed_quote() {
        assert!(has_unclosed_quote("\"abc"));
        assert!(!has_unclosed_quote("\"abc\""));
        assert!(!has_unclosed_quote(r#""say \"hi\"""#));
        assert!(has_unclosed_quote(r#""slash \\" + ""#));
    }
}
