// ABOUTME: AI-assisted text splitting via the backend chat endpoint
// Falls back to the rule-based splitter when the model reply cannot be parsed

use crate::api::types::ChatMessage;
use crate::api::GenClient;
use crate::models::Segment;
use crate::split::splitter::{split_text, SplitOptions};
use anyhow::Result;
use tracing::warn;

const SPLIT_SYSTEM_PROMPT: &str = "You split long-form text into a sequence of short segments, \
one per social-media card. Preserve the author's wording and order. Reply with the segments \
only, separated by lines containing exactly ---. No numbering, no commentary.";

/// Ask the model to split the text, falling back to the rule-based splitter
/// when the reply is unusable.
pub async fn ai_split(client: &GenClient, text: &str, options: SplitOptions) -> Result<Vec<Segment>> {
    let prompt = format!(
        "Split the following text into at most {} card segments:\n\n{}",
        options.max_cards, text
    );

    let reply = client
        .chat(vec![
            ChatMessage::system(SPLIT_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .await?;

    let segments = parse_segments(&reply, options.max_cards);
    if segments.is_empty() {
        warn!("AI split reply had no usable segments, falling back to rule-based splitter");
        return Ok(split_text(text, options));
    }
    Ok(segments)
}

/// Parse a model reply into segments. Accepts a JSON array of strings or
/// `---`-separated blocks; anything else yields no segments.
fn parse_segments(reply: &str, max_cards: usize) -> Vec<Segment> {
    let trimmed = reply.trim();

    let parts: Vec<String> = if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
        list
    } else {
        let mut blocks = vec![String::new()];
        for line in trimmed.lines() {
            let bare = line.trim();
            if bare.len() >= 3 && bare.chars().all(|c| c == '-') {
                blocks.push(String::new());
            } else if let Some(block) = blocks.last_mut() {
                if !block.is_empty() {
                    block.push('\n');
                }
                block.push_str(line);
            }
        }
        blocks.into_iter().map(|b| b.trim().to_string()).collect()
    };

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .take(max_cards)
        .enumerate()
        .map(|(index, text)| Segment::new(index, text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dash_separated_reply() {
        let reply = "First card text.\n---\nSecond card text.\n---\nThird card text.";
        let segments = parse_segments(reply, 9);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "First card text.");
        assert_eq!(segments[2].text, "Third card text.");
    }

    #[test]
    fn test_parse_json_array_reply() {
        let reply = r#"["one", "two"]"#;
        let segments = parse_segments(reply, 9);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text, "two");
    }

    #[test]
    fn test_parse_caps_at_max_cards() {
        let reply = (0..12).map(|i| format!("card {i}")).collect::<Vec<_>>().join("\n---\n");
        let segments = parse_segments(&reply, 9);
        assert_eq!(segments.len(), 9);
    }

    #[test]
    fn test_parse_garbage_yields_nothing() {
        assert!(parse_segments("", 9).is_empty());
        assert!(parse_segments("---\n---\n", 9).is_empty());
    }

    #[test]
    fn test_parse_indices_sequential() {
        let segments = parse_segments("a\n---\nb\n---\nc", 9);
        let indices: Vec<usize> = segments.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
