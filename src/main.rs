//! # textblock
//!
//! Command-line front end for the Java text block converter.
//!
//! ## Usage
//!
//! - Convert a file: `textblock Greeting.java.txt`
//! - Convert stdin: `echo '"a\n" + "b"' | textblock`
//! - Force a direction: `textblock --direction to-literal block.txt`
//! - Structured output: `textblock --output-format json expr.txt`

fn main() {
    textblock::cli::run_cli();
}
