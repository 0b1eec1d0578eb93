//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - display functions for status, success and error lines
//! - This module - interactive prompts and user input handling
//!
//! Prompts read from an injected `BufRead` and write to an injected `Write`
//! so version resolution stays testable without a terminal; `main` passes
//! locked stdin and stdout.

use std::io::{BufRead, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_dirty_entries, display_error, display_release_plan, display_status, display_success,
};

/// Prompt for a value with a default accepted on empty input.
///
/// Prints `label [default]: `, reads one line, and returns the trimmed input,
/// or the default if the operator just presses Enter.
///
/// # Arguments
/// * `label` - Prompt text shown before the bracketed default
/// * `default` - Value returned on empty input
/// * `input` / `output` - Streams to read from and write to (stdin/stdout in
///   the binary, buffers in tests)
pub fn prompt_with_default(
    label: &str,
    default: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<String> {
    write!(output, "{} [{}]: ", label, default)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// Block until the operator presses Enter.
pub fn wait_for_enter(
    message: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    write!(output, "{} ", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_empty_input_accepts_default() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut output = Vec::new();
        let value = prompt_with_default("Release version", "2.0", &mut input, &mut output).unwrap();
        assert_eq!(value, "2.0");
        assert_eq!(String::from_utf8(output).unwrap(), "Release version [2.0]: ");
    }

    #[test]
    fn test_prompt_explicit_input_wins() {
        let mut input = Cursor::new(b"3.1\n".to_vec());
        let mut output = Vec::new();
        let value = prompt_with_default("Release version", "2.0", &mut input, &mut output).unwrap();
        assert_eq!(value, "3.1");
    }

    #[test]
    fn test_prompt_trims_whitespace() {
        let mut input = Cursor::new(b"  2.5  \n".to_vec());
        let mut output = Vec::new();
        let value = prompt_with_default("Next version", "2.1", &mut input, &mut output).unwrap();
        assert_eq!(value, "2.5");
    }

    #[test]
    fn test_prompt_eof_accepts_default() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let value = prompt_with_default("Release version", "2.0", &mut input, &mut output).unwrap();
        assert_eq!(value, "2.0");
    }

    #[test]
    fn test_wait_for_enter_consumes_a_line() {
        let mut input = Cursor::new(b"\nleftover".to_vec());
        let mut output = Vec::new();
        wait_for_enter("Press Enter to finish.", &mut input, &mut output).unwrap();

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "leftover");
    }
}
