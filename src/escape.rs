//! Escaping and unescaping of quotes and newlines in literal source text.
//!
//! Only the two escapes that differ between a quoted literal and a text
//! block are rewritten: `\n` and `\"`. Every other escape pair is valid in
//! both forms and is copied through untouched.

use std::borrow::Cow;

use crate::literals::{
    BACKSLASH, ESCAPED_QUOTE, ESCAPED_SPACE, ESCAPED_TAB, NEW_LINE, QUOTE, SPACE, TAB,
};

/// Remove one trailing and one leading quote, if present.
///
/// A missing boundary quote leaves that side alone. A trailing quote that is
/// itself escaped (`\"`) is not a boundary and is kept.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    let text = match text.strip_suffix(QUOTE) {
        Some(rest) if !ends_with_odd_backslashes(rest) => rest,
        _ => text,
    };
    text.strip_prefix(QUOTE).unwrap_or(text)
}

/// Convert a quoted literal's source text into block content.
///
/// Boundary quotes are stripped first, then `\n` becomes a newline and `\"`
/// becomes a bare quote in a single pass, so `\\n` stays an escaped
/// backslash followed by `n`.
#[must_use]
pub fn unescape_literal(text: &str) -> Cow<'_, str> {
    let body = strip_quotes(text);
    if !body.contains(BACKSLASH) {
        return Cow::Borrowed(body);
    }

    let mut output = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != BACKSLASH {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => output.push(NEW_LINE),
            Some(QUOTE) => output.push(QUOTE),
            Some(other) => {
                output.push(BACKSLASH);
                output.push(other);
            }
            None => output.push(BACKSLASH),
        }
    }
    Cow::Owned(output)
}

/// Escape every bare quote as `\"`.
///
/// Quotes already preceded by an odd run of backslashes are left as they
/// are. Newlines are not touched; the literal renderer splits on them.
#[must_use]
pub fn escape_quotes(text: &str) -> Cow<'_, str> {
    if !text.contains(QUOTE) {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len() + 8);
    let mut backslashes = 0usize;
    for ch in text.chars() {
        if ch == QUOTE && backslashes % 2 == 0 {
            output.push_str(ESCAPED_QUOTE);
        } else {
            output.push(ch);
        }
        backslashes = if ch == BACKSLASH { backslashes + 1 } else { 0 };
    }
    Cow::Owned(output)
}

/// Escape every third quote of a bare quote run, so block content can never
/// contain a closing `"""`.
#[must_use]
pub fn escape_delimiter_runs(text: &str) -> Cow<'_, str> {
    if !text.contains("\"\"\"") {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len() + 4);
    let mut backslashes = 0usize;
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == QUOTE && backslashes % 2 == 0 {
            run += 1;
            if run == 3 {
                output.push_str(ESCAPED_QUOTE);
                run = 0;
            } else {
                output.push(ch);
            }
        } else {
            run = 0;
            output.push(ch);
        }
        backslashes = if ch == BACKSLASH { backslashes + 1 } else { 0 };
    }
    Cow::Owned(output)
}

/// Escape the last whitespace character of every line that ends in one.
///
/// Text block lines lose their trailing whitespace at compile time. Writing
/// the final space as `\s` (or tab as `\t`) keeps it and everything before
/// it in the value.
#[must_use]
pub fn escape_trailing_whitespace(text: &str) -> Cow<'_, str> {
    if !text.split(NEW_LINE).any(|line| line.ends_with([SPACE, TAB])) {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len() + 4);
    for (index, line) in text.split(NEW_LINE).enumerate() {
        if index > 0 {
            output.push(NEW_LINE);
        }
        if let Some(rest) = line.strip_suffix(SPACE) {
            output.push_str(rest);
            output.push_str(ESCAPED_SPACE);
        } else if let Some(rest) = line.strip_suffix(TAB) {
            output.push_str(rest);
            output.push_str(ESCAPED_TAB);
        } else {
            output.push_str(line);
        }
    }
    Cow::Owned(output)
}

fn ends_with_odd_backslashes(text: &str) -> bool {
    text.chars().rev().take_while(|&c| c == BACKSLASH).count() % 2 == 1
}
