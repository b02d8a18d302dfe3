//! Transcript grammars shipped with chatsift.
//!
//! Every grammar implements [`TranscriptGrammar`](crate::parser::TranscriptGrammar).

pub mod whatsapp;

pub use whatsapp::WhatsAppParser;
