// ABOUTME: Card domain models: text segments, generated cards, and image payloads

use serde::{Deserialize, Serialize};

/// One piece of the source text, destined to become a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Zero-based position in the segment list
    pub index: usize,
    pub text: String,
}

impl Segment {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Lifecycle of a card's image generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardStatus {
    Pending,
    Generating,
    Done,
    Failed,
}

/// Image payload returned by the generation backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageData {
    /// Hosted URL, fetched at save time
    Url(String),
    /// Base64-encoded PNG bytes embedded in the response
    Base64(String),
}

/// A card tracked through generation and download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCard {
    pub index: usize,
    pub text: String,
    pub status: CardStatus,
    pub image: Option<ImageData>,
    pub error: Option<String>,
}

impl GeneratedCard {
    pub fn from_segment(segment: &Segment) -> Self {
        Self {
            index: segment.index,
            text: segment.text.clone(),
            status: CardStatus::Pending,
            image: None,
            error: None,
        }
    }

    pub fn mark_generating(&mut self) {
        self.status = CardStatus::Generating;
        self.image = None;
        self.error = None;
    }

    pub fn mark_done(&mut self, image: ImageData) {
        self.status = CardStatus::Done;
        self.image = Some(image);
        self.error = None;
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.status = CardStatus::Failed;
        self.image = None;
        self.error = Some(message.into());
    }

    /// File name used when saving to disk, 1-based and zero-padded
    pub fn file_name(&self) -> String {
        format!("card-{:02}.png", self.index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn card_starts_pending() {
        let card = GeneratedCard::from_segment(&Segment::new(2, "hello"));
        assert_eq!(card.status, CardStatus::Pending);
        assert!(card.image.is_none());
        assert!(card.error.is_none());
    }

    #[test]
    fn mark_done_clears_error() {
        let mut card = GeneratedCard::from_segment(&Segment::new(0, "x"));
        card.mark_failed("boom");
        assert_eq!(card.status, CardStatus::Failed);
        assert_eq!(card.error.as_deref(), Some("boom"));

        card.mark_done(ImageData::Url("https://img/1.png".into()));
        assert_eq!(card.status, CardStatus::Done);
        assert!(card.error.is_none());
    }

    #[test]
    fn file_name_is_one_based() {
        let card = GeneratedCard::from_segment(&Segment::new(0, "x"));
        assert_eq!(card.file_name(), "card-01.png");
        let card = GeneratedCard::from_segment(&Segment::new(9, "x"));
        assert_eq!(card.file_name(), "card-10.png");
    }
}
