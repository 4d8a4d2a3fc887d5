//! Error types for conversion and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Why a conversion does not apply.
///
/// None of these are failures of the tool: the caller is expected to leave
/// the source unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("text block is empty")]
    EmptyInput,

    #[error("concatenation has no operands")]
    NoOperands,

    #[error("the only operand is not a string literal")]
    NonLiteralOperand,

    #[error("expression contains no string literal")]
    NoStringLiteral,

    #[error("expression is not a single text block")]
    NotATextBlock,

    #[error("operand {index} is not a string literal: {text}")]
    UnsupportedOperand { index: usize, text: String },
}

/// Failure to load a `.textblock.json` file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_error_messages() {
        assert_eq!(ConvertError::EmptyInput.to_string(), "text block is empty");
        assert_eq!(
            ConvertError::UnsupportedOperand {
                index: 1,
                text: "name".to_string()
            }
            .to_string(),
            "operand 1 is not a string literal: name"
        );
    }

    #[test]
    fn test_config_error_mentions_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/tmp/.textblock.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/tmp/.textblock.json"), "got: {rendered}");
        assert!(rendered.contains("missing"), "got: {rendered}");
    }
}
