//! Entry points for the host editor or tool.
//!
//! Both functions are pure: they take source text and return the text to
//! splice in. A [`ConvertError`] means the conversion does not apply and the
//! source must be left as it is.

use serde::Serialize;

use crate::concat::Operand;
use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::to_block::{self, ConversionTarget};
use crate::to_literal;

/// Source text produced by a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub text: String,
    /// The whole concatenation is replaced, not just the literal under the
    /// caret. Text block conversions always replace the block's parent
    /// expression and report `false`.
    pub replaces_whole_chain: bool,
}

/// Convert a literal, or the chain it belongs to, into a text block.
///
/// Pass a single operand for a standalone literal, or every operand of the
/// enclosing concatenation in source order.
///
/// # Errors
///
/// Returns `Err` when there are no operands, the only operand is not a
/// literal, or the chain policy rejects a non-literal operand.
pub fn convert_to_block(
    operands: &[Operand],
    options: &ConvertOptions,
) -> Result<Replacement, ConvertError> {
    let target = ConversionTarget::from_operands(operands)?;
    to_block::convert(&target, options)
}

/// Convert the raw source of a text block into concatenated literals.
///
/// # Errors
///
/// Returns `Err` when the block text is empty.
pub fn convert_to_literal(
    block: &str,
    options: &ConvertOptions,
) -> Result<Replacement, ConvertError> {
    to_literal::convert(block, options.margin_policy)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_inputs_are_not_applicable() {
        let options = ConvertOptions::default();
        assert_eq!(
            convert_to_block(&[], &options),
            Err(ConvertError::NoOperands)
        );
        assert_eq!(
            convert_to_literal("", &options),
            Err(ConvertError::EmptyInput)
        );
    }

    #[test]
    fn test_quote_escaping_both_ways() {
        let options = ConvertOptions::default();
        let block = convert_to_block(&[Operand::literal(r#""He said \"hi\"""#)], &options).unwrap();
        assert!(block.text.contains("\nHe said \"hi\"\n"));

        let literal = convert_to_literal(&block.text, &options).unwrap();
        assert_eq!(literal.text, r#""He said \"hi\"""#);
    }

    #[test]
    fn test_replacement_serializes() {
        let replacement = Replacement {
            text: "\"a\"".to_string(),
            replaces_whole_chain: true,
        };
        let json = serde_json::to_value(&replacement).unwrap();
        assert_eq!(json["text"], "\"a\"");
        assert_eq!(json["replaces_whole_chain"], true);
    }
}
