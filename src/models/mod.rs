// ABOUTME: Domain models for cards, templates, and recent projects

pub mod card;
pub mod project;
pub mod template;

pub use card::{CardStatus, GeneratedCard, ImageData, Segment};
pub use project::{ProjectHistory, RecentProject};
pub use template::{CardTemplate, TemplateLibrary};
