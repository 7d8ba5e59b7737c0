//! Meetbrief Transcription
//!
//! Client for the mymeet meeting-transcription service

pub mod mymeet;
pub mod types;

// Re-export main types
pub use mymeet::MyMeetClient;
pub use types::{LinkRequest, Transcriber, TranscriptResponse};
