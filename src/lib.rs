//! # textblock
//!
//! Converts Java string literals, and `+` concatenations of them, into text
//! blocks, and text blocks back into concatenated literals.
//!
//! The conversions work on source text only. [`convert_to_block`] takes the
//! operands of a concatenation and [`convert_to_literal`] takes the raw
//! source of a text block. Either returns a [`Replacement`] to splice in, or
//! a [`ConvertError`] saying why the conversion does not apply.

pub mod cli;
pub mod concat;
pub mod config;
pub mod convert;
pub mod error;
pub mod escape;
pub mod indent;
pub mod literals;
pub mod parser;
pub mod to_block;
pub mod to_literal;

pub use concat::Operand;
pub use config::ConvertOptions;
pub use convert::{Replacement, convert_to_block, convert_to_literal};
pub use error::ConvertError;

/// Print an error message and exit with code 1.
pub fn fatal_error(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
