//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Mutex;

use chatsift::error::AcquisitionError;
use chatsift::notify::Notifier;
use chatsift::parsers::WhatsAppParser;
use chrono::Utc;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds an in-memory zip. Names ending in `/` become directories.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// A WhatsApp grammar reading timestamps as UTC, so tests do not depend on
/// the machine's zone.
pub fn utc_parser() -> WhatsAppParser<Utc> {
    WhatsAppParser::new().with_timezone(Utc)
}

/// Remembers every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, bool)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn all_had_errors(&self) -> bool {
        self.calls.lock().unwrap().iter().all(|(_, had_error)| *had_error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, error: Option<&AcquisitionError>) {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_owned(), error.is_some()));
    }
}

/// An iOS transcript with an encryption notice, a system line, a multi-line
/// message and a photo.
pub const IOS_TRANSCRIPT: &str = "\
[15.01.24, 10:29:00] Alice: \u{200E}Messages and calls are end-to-end encrypted. No one outside of this chat can read them.
[15.01.24, 10:30:00] Alice: Hello Bob
[15.01.24, 10:30:30] \u{200E}Alice added Carol
[15.01.24, 10:31:00] Bob: Hi!
How are you?
[16.01.24, 08:00:00] Carol: \u{200E}<attached: 00000012-PHOTO-2024-01-16-08-00-00.jpg>
[17.01.24, 21:15:00] Bob: Good night";
