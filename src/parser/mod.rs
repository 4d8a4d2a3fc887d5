//! Parser implementation using pest
//!
//! Splits a Java expression into the operands of its top-level `+` chain
//! and tells string literals and text blocks apart from everything else.
//! This is the host side of a conversion: the core only needs each
//! operand's text and whether it is a literal.

pub mod error;

use pest::Parser;
use pest_derive::Parser;

use crate::concat::Operand;
pub use error::ParseError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ExpressionParser;

/// Classification of a top-level operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    StringLiteral,
    TextBlock,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperand {
    pub kind: OperandKind,
    pub text: String,
}

/// Top-level operands of an expression, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExpression {
    pub operands: Vec<ParsedOperand>,
}

impl ParsedExpression {
    /// The block's source text if the whole expression is one text block.
    #[must_use]
    pub fn single_text_block(&self) -> Option<&str> {
        match self.operands.as_slice() {
            [only] if only.kind == OperandKind::TextBlock => Some(&only.text),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_string_literal(&self) -> bool {
        self.operands
            .iter()
            .any(|operand| operand.kind == OperandKind::StringLiteral)
    }

    /// Operands for block conversion. Text blocks inside a chain are not
    /// quoted literals, so they become formatting arguments.
    ///
    /// `+` only means string concatenation from the first string literal
    /// on. Operands before it are added together first (`1 + 2 + "a"` is
    /// `"3a"`), so two or more of them are grouped into one parenthesized
    /// argument.
    #[must_use]
    pub fn to_operands(&self) -> Vec<Operand> {
        let first_literal = self
            .operands
            .iter()
            .position(|operand| operand.kind == OperandKind::StringLiteral)
            .unwrap_or(self.operands.len());
        let (prefix, rest) = self.operands.split_at(first_literal);

        let mut operands = Vec::with_capacity(rest.len() + 1);
        match prefix {
            [] => {}
            [single] => operands.push(Operand::expression(single.text.clone())),
            many => {
                let sum = many
                    .iter()
                    .map(|operand| operand.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" + ");
                operands.push(Operand::expression(format!("({sum})")));
            }
        }

        operands.extend(rest.iter().map(|operand| match operand.kind {
            OperandKind::StringLiteral => Operand::literal(operand.text.clone()),
            OperandKind::TextBlock | OperandKind::Expression => {
                Operand::expression(operand.text.clone())
            }
        }));
        operands
    }
}

/// Parse a Java expression into its concatenation operands.
///
/// # Errors
///
/// Returns `Err` if the input is empty, has an unclosed literal or group,
/// or has a `+` with no operand after it.
pub fn parse(input: &str, filename: Option<&str>) -> Result<ParsedExpression, ParseError> {
    let pairs = ExpressionParser::parse(Rule::expression, input)
        .map_err(|e| ParseError::from_pest(&e, input, filename))?;

    let mut operands = Vec::new();
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::text_block => operands.push(ParsedOperand {
                kind: OperandKind::TextBlock,
                text: pair.as_str().to_string(),
            }),
            Rule::string_literal => operands.push(ParsedOperand {
                kind: OperandKind::StringLiteral,
                text: pair.as_str().to_string(),
            }),
            Rule::expression_operand => operands.push(ParsedOperand {
                kind: OperandKind::Expression,
                text: pair.as_str().to_string(),
            }),
            _ => {}
        }
    }

    Ok(ParsedExpression { operands })
}
