//! Removal of the fabricated author on the encryption notice.
//!
//! Some exports write the "Messages and calls are end-to-end encrypted"
//! notice as if a participant had sent it (often whoever sorts first). Left
//! alone, that participant gets a message they never wrote. Only the head of
//! the transcript is scanned: the notice is always among the first lines,
//! and users who later talk about "end-to-end" keep their authorship.

use tracing::debug;

use crate::Message;

/// Substring identifying the encryption notice.
pub const ENCRYPTION_NOTICE_MARKER: &str = "end-to-end";

/// Number of leading messages scanned for the notice.
pub const ENCRYPTION_NOTICE_WINDOW: usize = 10;

/// Clears the author of encryption notices among the first
/// [`ENCRYPTION_NOTICE_WINDOW`] messages.
///
/// Messages are never dropped or reordered.
///
/// # Example
///
/// ```
/// use chatsift::Message;
/// use chatsift::core::redact::replace_encryption_message_author;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let messages = vec![
///     Message::new(0, now, Some("Alice"), "Messages and calls are end-to-end encrypted."),
///     Message::new(1, now, Some("Alice"), "Hi Bob"),
/// ];
///
/// let messages = replace_encryption_message_author(messages);
/// assert!(messages[0].author.is_none());
/// assert_eq!(messages[1].author(), Some("Alice"));
/// ```
pub fn replace_encryption_message_author(mut messages: Vec<Message>) -> Vec<Message> {
    let mut redacted = 0usize;

    for msg in messages.iter_mut().take(ENCRYPTION_NOTICE_WINDOW) {
        if msg.message.contains(ENCRYPTION_NOTICE_MARKER) && msg.author.take().is_some() {
            redacted += 1;
        }
    }

    if redacted > 0 {
        debug!(redacted, "cleared author on encryption notice");
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn messages_with_notice_at(position: usize, total: usize) -> Vec<Message> {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        (0..total)
            .map(|i| {
                let text = if i == position {
                    "Messages and calls are end-to-end encrypted."
                } else {
                    "hello"
                };
                Message::new(i, date, Some("Alice"), text)
            })
            .collect()
    }

    #[test]
    fn test_notice_inside_window_is_redacted() {
        let messages = replace_encryption_message_author(messages_with_notice_at(9, 11));
        assert!(messages[9].author.is_none());
        assert!(messages.iter().filter(|m| m.author.is_none()).count() == 1);
    }

    #[test]
    fn test_notice_outside_window_keeps_author() {
        let messages = replace_encryption_message_author(messages_with_notice_at(10, 11));
        assert_eq!(messages[10].author(), Some("Alice"));
        assert!(messages.iter().all(|m| m.author.is_some()));
    }

    #[test]
    fn test_order_and_length_preserved() {
        let original = messages_with_notice_at(0, 5);
        let messages = replace_encryption_message_author(original.clone());
        assert_eq!(messages.len(), original.len());
        for (before, after) in original.iter().zip(&messages) {
            assert_eq!(before.index, after.index);
            assert_eq!(before.message, after.message);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(replace_encryption_message_author(vec![]).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let messages = vec![Message::new(0, date, Some("Bob"), "END-TO-END rocks")];
        let messages = replace_encryption_message_author(messages);
        assert_eq!(messages[0].author(), Some("Bob"));
    }
}
