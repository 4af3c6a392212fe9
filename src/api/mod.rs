// ABOUTME: Client for the multimodal generation backend (chat + image endpoints)

pub mod client;
pub mod types;

pub use client::GenClient;
pub use types::{GenAuth, GenError};
