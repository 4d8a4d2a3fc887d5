//! Operands of a string concatenation chain.
//!
//! Literal operands are unescaped and joined into one piece of block text.
//! Every other operand is replaced by a `%s` placeholder and remembered, in
//! order, as an argument for the formatting call wrapped around the block.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConvertError;
use crate::escape::unescape_literal;
use crate::literals::{ARGUMENT_SEPARATOR, ESCAPED_PERCENT, PERCENT, PLACEHOLDER};

/// One element of a concatenation chain, as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    pub text: String,
    pub is_literal: bool,
}

impl Operand {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_literal: true,
        }
    }

    #[must_use]
    pub fn expression(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_literal: false,
        }
    }
}

/// Which chains may be merged into a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChainPolicy {
    /// Literals and non-literal expressions
    #[default]
    Mixed,
    /// Only chains made entirely of string literals
    LiteralsOnly,
}

/// A non-literal operand replaced by a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    /// Position of the operand in the chain
    pub index: usize,
    pub source: String,
}

/// Placeholders in the order their arguments must be passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceholderSet(Vec<Placeholder>);

impl PlaceholderSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.0.iter()
    }

    /// Argument list for the formatting call.
    #[must_use]
    pub fn arguments(&self) -> String {
        self.0
            .iter()
            .map(|placeholder| placeholder.source.as_str())
            .collect::<Vec<_>>()
            .join(ARGUMENT_SEPARATOR)
    }
}

/// Block text with placeholders substituted, plus the displaced operands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    pub placeholders: PlaceholderSet,
}

/// Check that a chain can be converted under `policy`.
///
/// # Errors
///
/// Returns [`ConvertError::NoOperands`] for an empty chain, and
/// [`ConvertError::UnsupportedOperand`] for the first non-literal operand
/// when only literals are allowed.
pub fn check_convertible(operands: &[Operand], policy: ChainPolicy) -> Result<(), ConvertError> {
    if operands.is_empty() {
        return Err(ConvertError::NoOperands);
    }

    if policy == ChainPolicy::LiteralsOnly
        && let Some((index, operand)) = operands
            .iter()
            .enumerate()
            .find(|(_, operand)| !operand.is_literal)
    {
        return Err(ConvertError::UnsupportedOperand {
            index,
            text: operand.text.clone(),
        });
    }

    Ok(())
}

#[must_use]
pub fn is_convertible(operands: &[Operand], policy: ChainPolicy) -> bool {
    check_convertible(operands, policy).is_ok()
}

/// Merge a chain into one piece of block text.
///
/// When any placeholder is produced, literal `%` signs are doubled so the
/// formatting call yields them unchanged.
#[must_use]
pub fn classify(operands: &[Operand]) -> Classified {
    let has_expressions = operands.iter().any(|operand| !operand.is_literal);
    let mut text = String::new();
    let mut placeholders = Vec::new();

    for (index, operand) in operands.iter().enumerate() {
        if operand.is_literal {
            let unescaped = unescape_literal(operand.text.trim());
            if has_expressions {
                text.push_str(&unescaped.replace(PERCENT, ESCAPED_PERCENT));
            } else {
                text.push_str(&unescaped);
            }
        } else {
            text.push_str(PLACEHOLDER);
            placeholders.push(Placeholder {
                index,
                source: operand.text.trim().to_string(),
            });
        }
    }

    debug!(
        operands = operands.len(),
        placeholders = placeholders.len(),
        "classified concatenation"
    );

    Classified {
        text,
        placeholders: PlaceholderSet(placeholders),
    }
}
