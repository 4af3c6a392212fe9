// ABOUTME: CLI split command - segment a text file into cards without the TUI
//
// Reads a file, applies the rule-based splitter, and prints the segments
// as text or JSON.

use super::{OutputFormat, SplitArgs};
use crate::split::{is_valid_text_length, split_text, SplitOptions, MAX_TEXT_LEN, MIN_TEXT_LEN};
use anyhow::{Context, Result};

/// Execute the split command
pub fn execute(args: SplitArgs, format: OutputFormat) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    if !is_valid_text_length(&text) {
        anyhow::bail!(
            "input must be between {MIN_TEXT_LEN} and {MAX_TEXT_LEN} characters, got {}",
            text.trim().chars().count()
        );
    }

    let options = SplitOptions {
        max_segment_len: args.max_segment_len,
        max_cards: args.max_cards,
    };
    let segments = split_text(&text, options);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&segments)?);
        }
        OutputFormat::Text => {
            for segment in &segments {
                println!("--- card {:02} ({} chars)", segment.index + 1, segment.text.chars().count());
                println!("{}", segment.text);
                println!();
            }
            println!("{} segment(s)", segments.len());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rejects_too_short_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "short").unwrap();

        let args = SplitArgs {
            input: file.path().to_path_buf(),
            max_segment_len: 300,
            max_cards: 9,
        };
        assert!(execute(args, OutputFormat::Text).is_err());
    }

    #[test]
    fn splits_valid_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First paragraph with enough text to pass validation.\n\nSecond paragraph here.").unwrap();

        let args = SplitArgs {
            input: file.path().to_path_buf(),
            max_segment_len: 300,
            max_cards: 9,
        };
        assert!(execute(args, OutputFormat::Text).is_ok());
    }
}
