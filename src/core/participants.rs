//! Participant extraction.

use std::collections::HashSet;

use crate::Message;

/// Distinct authors in order of first appearance.
///
/// System messages (no author) contribute nothing.
///
/// # Example
///
/// ```
/// use chatsift::Message;
/// use chatsift::core::participants::participants_from_messages;
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let messages = vec![
///     Message::new(0, now, Some("A"), "hi"),
///     Message::new(1, now, None::<&str>, "A added B"),
///     Message::new(2, now, Some("B"), "hello"),
///     Message::new(3, now, Some("A"), "welcome"),
/// ];
///
/// assert_eq!(participants_from_messages(&messages), ["A", "B"]);
/// ```
pub fn participants_from_messages(messages: &[Message]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut participants = Vec::new();

    for author in messages.iter().filter_map(Message::author) {
        if seen.insert(author) {
            participants.push(author.to_owned());
        }
    }

    participants
}
