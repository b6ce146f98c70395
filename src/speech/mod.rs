pub mod chunker;
pub mod client;
pub mod tones;
pub mod voice;

pub use chunker::{split_text, truncate_for_speech};
pub use client::{MurfClient, SpeechProvider};
pub use tones::VoiceTones;
pub use voice::VoiceClient;
