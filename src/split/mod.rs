// ABOUTME: Text splitting for card generation
// Rule-based segmentation locally, with optional AI-assisted splitting via the backend

pub mod ai;
pub mod splitter;

pub use splitter::{
    is_valid_text_length, split_text, SplitOptions, MAX_CARDS, MAX_SEGMENT_LEN, MAX_TEXT_LEN,
    MIN_TEXT_LEN,
};
