// ABOUTME: Rule-based text segmentation
// Paragraph-first, slicing long paragraphs at sentence boundaries and merging short ones

use crate::models::Segment;
use lazy_static::lazy_static;
use regex::Regex;

/// Minimum accepted input length, in characters
pub const MIN_TEXT_LEN: usize = 10;
/// Maximum accepted input length, in characters
pub const MAX_TEXT_LEN: usize = 5000;
/// Longest text a single card can comfortably carry
pub const MAX_SEGMENT_LEN: usize = 300;
/// Most platforms cap a post at nine images
pub const MAX_CARDS: usize = 9;

lazy_static! {
    // Sentence boundary: CJK or Latin terminator, optionally followed by a closing quote
    static ref SENTENCE_END: Regex = Regex::new(r#"[。！？.!?]+[」』”"']?"#).unwrap();
}

/// Tunables for the rule-based splitter
#[derive(Debug, Clone, Copy)]
pub struct SplitOptions {
    /// Longest segment, in characters
    pub max_segment_len: usize,
    /// Hard cap on the number of segments; overflow merges into the last one
    pub max_cards: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_segment_len: MAX_SEGMENT_LEN,
            max_cards: MAX_CARDS,
        }
    }
}

/// Whether the draft text is acceptable for the input step
pub fn is_valid_text_length(text: &str) -> bool {
    let len = text.trim().chars().count();
    (MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&len)
}

/// Split source text into card-sized segments.
///
/// Paragraphs (blank-line separated) are the primary unit: consecutive short
/// paragraphs merge while they fit, and a paragraph longer than the segment
/// limit is sliced at sentence boundaries. The result never exceeds the card
/// cap; overflow is folded into the final segment.
pub fn split_text(text: &str, options: SplitOptions) -> Vec<Segment> {
    // A zero limit is meaningless; treat it as 1
    let max_segment_len = options.max_segment_len.max(1);
    let max_cards = options.max_cards.max(1);

    let paragraphs: Vec<&str> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut pieces: Vec<String> = Vec::new();
    for paragraph in paragraphs {
        if paragraph.chars().count() <= max_segment_len {
            push_or_merge(&mut pieces, paragraph, max_segment_len);
        } else {
            for chunk in slice_long_paragraph(paragraph, max_segment_len) {
                push_or_merge(&mut pieces, &chunk, max_segment_len);
            }
        }
    }

    // Fold overflow beyond the card cap into the last segment
    if pieces.len() > max_cards {
        let tail = pieces.split_off(max_cards - 1);
        pieces.push(tail.join("\n\n"));
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| Segment::new(index, text))
        .collect()
}

/// Merge into the previous piece when both are short, otherwise start a new one
fn push_or_merge(pieces: &mut Vec<String>, text: &str, max_len: usize) {
    if let Some(last) = pieces.last_mut() {
        let combined = last.chars().count() + text.chars().count() + 2;
        if combined <= max_len {
            last.push_str("\n\n");
            last.push_str(text);
            return;
        }
    }
    pieces.push(text.to_string());
}

/// Slice an over-long paragraph at sentence boundaries, packing sentences
/// greedily. A single sentence longer than the limit is hard-cut.
fn slice_long_paragraph(paragraph: &str, max_len: usize) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();
    let mut cursor = 0;
    for m in SENTENCE_END.find_iter(paragraph) {
        let sentence = paragraph[cursor..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        cursor = m.end();
    }
    let rest = paragraph[cursor..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for sentence in sentences {
        let sentence_len = sentence.chars().count();
        if sentence_len > max_len {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(hard_cut(&sentence, max_len));
            continue;
        }
        // Keep a space between Latin sentences; CJK text joins directly
        let sep = usize::from(
            !current.is_empty() && sentence.starts_with(|c: char| c.is_ascii_alphanumeric()),
        );
        if !current.is_empty() && current.chars().count() + sep + sentence_len > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() && sentence.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            current.push(' ');
        }
        current.push_str(&sentence);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Cut at character (not byte) boundaries
fn hard_cut(text: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_len)
        .map(|c| c.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_length_validation() {
        assert!(!is_valid_text_length(""));
        assert!(!is_valid_text_length("short"));
        assert!(is_valid_text_length("this is long enough to pass"));
        assert!(!is_valid_text_length(&"x".repeat(MAX_TEXT_LEN + 1)));
        // Surrounding whitespace does not count
        assert!(!is_valid_text_length("   tiny   "));
    }

    #[test]
    fn test_short_paragraphs_merge() {
        let text = "First thought.\n\nSecond thought.";
        let segments = split_text(text, SplitOptions::default());

        assert_eq!(segments.len(), 1);
        assert!(segments[0].text.contains("First thought."));
        assert!(segments[0].text.contains("Second thought."));
    }

    #[test]
    fn test_paragraphs_split_when_over_limit() {
        let options = SplitOptions {
            max_segment_len: 30,
            max_cards: MAX_CARDS,
        };
        let text = "A paragraph that stays alone.\n\nAnother one that stays alone.";
        let segments = split_text(text, options);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 0);
        assert_eq!(segments[1].index, 1);
    }

    #[test]
    fn test_long_paragraph_sliced_at_sentences() {
        let options = SplitOptions {
            max_segment_len: 40,
            max_cards: MAX_CARDS,
        };
        let text = "One sentence here. Another sentence there. A third one follows. And a fourth closes it.";
        let segments = split_text(text, options);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.text.chars().count() <= 40);
        }
    }

    #[test]
    fn test_cjk_sentence_boundaries() {
        let options = SplitOptions {
            max_segment_len: 12,
            max_cards: MAX_CARDS,
        };
        let text = "第一句话很短。第二句话也不长。第三句话收尾。";
        let segments = split_text(text, options);

        assert!(segments.len() >= 2);
        assert!(segments[0].text.ends_with('。'));
    }

    #[test]
    fn test_overflow_folds_into_last_card() {
        let options = SplitOptions {
            max_segment_len: 10,
            max_cards: 3,
        };
        let text = (0..8)
            .map(|i| format!("para {i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let segments = split_text(&text, options);

        assert_eq!(segments.len(), 3);
        assert!(segments[2].text.contains("para 7"));
    }

    #[test]
    fn test_oversized_single_sentence_hard_cut() {
        let options = SplitOptions {
            max_segment_len: 10,
            max_cards: MAX_CARDS,
        };
        let text = "abcdefghijklmnopqrstuvwxyz";
        let segments = split_text(text, options);

        assert!(segments.iter().all(|s| s.text.chars().count() <= 10));
    }

    #[test]
    fn test_zero_limits_treated_as_one() {
        let options = SplitOptions {
            max_segment_len: 0,
            max_cards: 0,
        };
        let segments = split_text("ab\n\ncd", options);

        assert_eq!(segments.len(), 1);
        assert!(segments[0].text.contains('a'));
        assert!(segments[0].text.contains('d'));
    }

    #[test]
    fn test_zero_segment_length_does_not_break_hard_cut() {
        let options = SplitOptions {
            max_segment_len: 0,
            max_cards: MAX_CARDS,
        };
        let segments = split_text("abcde", options);

        assert_eq!(segments.len(), 5);
        assert!(segments.iter().all(|s| s.text.chars().count() == 1));
    }

    #[test]
    fn test_empty_input_yields_no_segments() {
        assert!(split_text("", SplitOptions::default()).is_empty());
        assert!(split_text("  \n\n  ", SplitOptions::default()).is_empty());
    }

    #[test]
    fn test_indices_are_sequential() {
        let options = SplitOptions {
            max_segment_len: 15,
            max_cards: MAX_CARDS,
        };
        let text = "alpha beta gamma.\n\ndelta epsilon zeta.\n\neta theta iota.";
        let segments = split_text(text, options);

        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
        }
    }
}
