//! `WhatsApp` TXT transcript grammar.
//!
//! `WhatsApp` exports vary by locale. This parser reads the whole transcript
//! once to find message headers, infers the date order from all of them,
//! then builds one record per header with continuation lines appended.
//!
//! Supported formats:
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - iOS (EU): `[15.01.24, 10:30:45] Sender: Message`
//! - Android: `15/01/2024, 10:30 - Sender: Message`
//! - Android (RU): `15.01.2024, 10:30 - Sender: Message`
//!
//! Headers without a `Sender: ` part are system notices and carry no author.

use chrono::{Local, TimeZone};

use crate::config::{DateOrder, ParseOptions, WhatsAppConfig};
use crate::core::calendar::resolve_local;
use crate::error::{ChatsiftError, Result};
use crate::parser::{ParsedMessage, TranscriptGrammar};
use crate::parsing::whatsapp::{
    MessageHeader, build_timestamp, infer_date_order, parse_attachment, parse_header,
    split_author, strip_directional_marks,
};

/// Parser for WhatsApp TXT transcripts.
///
/// Wall-clock times in the transcript are read in `Tz`, the device's local
/// zone by default.
///
/// # Example
///
/// ```rust
/// use chatsift::config::ParseOptions;
/// use chatsift::parser::TranscriptGrammar;
/// use chatsift::parsers::WhatsAppParser;
/// use chrono::Utc;
///
/// let parser = WhatsAppParser::new().with_timezone(Utc);
/// let messages = parser.parse_str(
///     "[1/15/24, 10:30:45 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi",
///     ParseOptions::new(),
/// )?;
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].author.as_deref(), Some("Bob"));
/// # Ok::<(), chatsift::ChatsiftError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WhatsAppParser<Tz: TimeZone = Local> {
    config: WhatsAppConfig,
    timezone: Tz,
}

impl WhatsAppParser<Local> {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(WhatsAppConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self {
            config,
            timezone: Local,
        }
    }
}

impl Default for WhatsAppParser<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> WhatsAppParser<Tz> {
    /// Reads transcript times in another time zone.
    #[must_use]
    pub fn with_timezone<T: TimeZone>(self, timezone: T) -> WhatsAppParser<T> {
        WhatsAppParser {
            config: self.config,
            timezone,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Returns the zone transcript times are read in.
    pub fn timezone(&self) -> &Tz {
        &self.timezone
    }

    fn parse_content(&self, text: &str, options: ParseOptions) -> Result<Vec<ParsedMessage>> {
        let lines: Vec<&str> = text.lines().collect();

        if lines.iter().all(|line| line.trim().is_empty()) {
            return Ok(vec![]);
        }

        // Step 1: find every header so the date order sees the whole transcript
        let headers: Vec<Option<MessageHeader<'_>>> =
            lines.iter().map(|line| parse_header(line)).collect();

        if headers.iter().all(Option::is_none) {
            return Err(ChatsiftError::invalid_format(
                "WhatsApp",
                "No message headers found. \
                 Make sure the text is a WhatsApp chat export.",
            ));
        }

        // Step 2: decide how to read dates
        let order = self
            .config
            .date_order
            .unwrap_or_else(|| infer_date_order(headers.iter().flatten().map(|h| &h.date)));

        // Step 3: build records
        let mut messages: Vec<ParsedMessage> = Vec::new();

        for (line_no, (line, header)) in lines.iter().zip(&headers).enumerate() {
            match header {
                Some(header) => messages.push(self.build_message(header, order, line_no + 1)?),
                None => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    // Continuation of previous message (multiline);
                    // lines before the first header are dropped
                    if let Some(last) = messages.last_mut() {
                        last.message.push('\n');
                        last.message.push_str(line);
                    }
                }
            }
        }

        if options.parse_attachments {
            for msg in &mut messages {
                msg.attachment = parse_attachment(&msg.message);
            }
        }

        Ok(messages)
    }

    fn build_message(
        &self,
        header: &MessageHeader<'_>,
        order: DateOrder,
        line_no: usize,
    ) -> Result<ParsedMessage> {
        let date = build_timestamp(&header.date, &header.time, order)
            .and_then(|naive| resolve_local(&self.timezone, naive))
            .ok_or_else(|| ChatsiftError::whatsapp_timestamp(header.stamp, line_no))?;

        let (author, text) = split_author(header.body);
        let (author, text) = if self.config.strip_directional_marks {
            (
                author.map(strip_directional_marks),
                text.trim_start_matches(['\u{200E}', '\u{200F}']),
            )
        } else {
            (author, text)
        };

        Ok(ParsedMessage::new(
            date,
            author.filter(|a| !a.is_empty()).map(str::to_owned),
            text,
        ))
    }
}

impl<Tz> TranscriptGrammar for WhatsAppParser<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn parse_str(&self, text: &str, options: ParseOptions) -> Result<Vec<ParsedMessage>> {
        self.parse_content(text, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Attachment;
    use chrono::{FixedOffset, Utc};

    fn utc_parser() -> WhatsAppParser<Utc> {
        WhatsAppParser::new().with_timezone(Utc)
    }

    fn parse(text: &str) -> Vec<ParsedMessage> {
        utc_parser().parse_str(text, ParseOptions::new()).unwrap()
    }

    #[test]
    fn test_parser_name() {
        assert_eq!(utc_parser().name(), "WhatsApp");
    }

    #[test]
    fn test_empty_text() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n").is_empty());
    }

    #[test]
    fn test_parse_ios_us() {
        let messages = parse(
            "[1/15/24, 10:30:45 AM] Alice: Hello\n\
             [1/15/24, 1:05:00 PM] Bob: Hi there",
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author.as_deref(), Some("Alice"));
        assert_eq!(messages[0].message, "Hello");
        assert_eq!(
            messages[0].date,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap()
        );
        assert_eq!(
            messages[1].date,
            Utc.with_ymd_and_hms(2024, 1, 15, 13, 5, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_android_day_first() {
        let messages = parse(
            "15/01/2024, 10:30 - Alice: Hello\n\
             16/01/2024, 09:00 - Bob: Morning",
        );
        assert_eq!(
            messages[1].date,
            Utc.with_ymd_and_hms(2024, 1, 16, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_system_message_has_no_author() {
        let messages = parse(
            "15.01.24, 10:30 - Alice created group \"Trip\"\n\
             15.01.24, 10:31 - Alice: Welcome",
        );
        assert_eq!(messages.len(), 2);
        assert!(messages[0].author.is_none());
        assert_eq!(messages[0].message, "Alice created group \"Trip\"");
        assert_eq!(messages[1].author.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_encryption_notice_keeps_fabricated_author() {
        // Redaction happens later in the pipeline, not in the grammar.
        let messages = parse(
            "[15.01.24, 10:30:00] Alice: \u{200E}Messages and calls are end-to-end encrypted.",
        );
        assert_eq!(messages[0].author.as_deref(), Some("Alice"));
        assert!(messages[0].message.starts_with("Messages and calls"));
    }

    #[test]
    fn test_multiline_and_orphan_lines() {
        let messages = parse(
            "orphan before any header\n\
             [1/15/24, 10:30:45 AM] Alice: first line\n\
             second line\n\
             \n\
             third line\n\
             [1/15/24, 10:31:00 AM] Bob: Hi",
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "first line\nsecond line\nthird line");
    }

    #[test]
    fn test_no_headers_is_error() {
        let result = utc_parser().parse_str("hello\nworld", ParseOptions::new());
        assert!(matches!(result, Err(ChatsiftError::InvalidFormat { .. })));
    }

    #[test]
    fn test_impossible_date_is_parse_error() {
        let result = utc_parser().parse_str(
            "[31/02/24, 10:30:45] Alice: Hello",
            ParseOptions::new(),
        );
        match result {
            Err(ChatsiftError::Parse { line, .. }) => assert_eq!(line, Some(1)),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_forced_date_order() {
        let parser = WhatsAppParser::with_config(
            WhatsAppConfig::new().with_date_order(DateOrder::DayFirst),
        )
        .with_timezone(Utc);
        let messages = parser
            .parse_str("[1/2/24, 10:00:00] Alice: Hi", ParseOptions::new())
            .unwrap();
        assert_eq!(
            messages[0].date,
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_timezone_applied() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        let parser = WhatsAppParser::new().with_timezone(tz);
        let messages = parser
            .parse_str("26.10.2025, 20:40 - Alice: Hi", ParseOptions::new())
            .unwrap();
        assert_eq!(
            messages[0].date,
            Utc.with_ymd_and_hms(2025, 10, 26, 17, 40, 0).unwrap()
        );
    }

    #[test]
    fn test_attachments_only_when_requested() {
        let text = "[6/7/20, 3:13:20 PM] Alice: \u{200E}<attached: 00000042-PHOTO-2020-06-07.jpg>";

        let without = parse(text);
        assert!(without[0].attachment.is_none());

        let with = utc_parser()
            .parse_str(text, ParseOptions::new().with_parse_attachments(true))
            .unwrap();
        assert_eq!(
            with[0].attachment,
            Some(Attachment::new("00000042-PHOTO-2020-06-07.jpg"))
        );
    }

    #[test]
    fn test_marks_kept_when_not_stripping() {
        let parser = WhatsAppParser::with_config(
            WhatsAppConfig::new().with_strip_directional_marks(false),
        )
        .with_timezone(Utc);
        let messages = parser
            .parse_str("[15.01.24, 10:30:00] Alice: \u{200E}hi", ParseOptions::new())
            .unwrap();
        assert_eq!(messages[0].message, "\u{200E}hi");
    }

    #[test]
    fn test_crlf_line_endings() {
        let messages = parse("15/01/2024, 10:30 - Alice: Hello\r\n15/01/2024, 10:31 - Bob: Hi\r\n");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message, "Hello");
    }

    #[test]
    fn test_dst_gap_and_repeated_hour() {
        let parser = WhatsAppParser::with_config(
            WhatsAppConfig::new().with_date_order(DateOrder::DayFirst),
        )
        .with_timezone(chrono_tz::America::Sao_Paulo);
        let messages = parser
            .parse_str(
                "04/11/2018, 00:30 - Alice: inside the skipped hour\n\
                 16/02/2019, 23:30 - Bob: inside the repeated hour",
                ParseOptions::new(),
            )
            .unwrap();
        assert_eq!(
            messages[0].date,
            Utc.with_ymd_and_hms(2018, 11, 4, 3, 30, 0).unwrap()
        );
        assert_eq!(
            messages[1].date,
            Utc.with_ymd_and_hms(2019, 2, 17, 1, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_year_first() {
        let messages = parse(
            "2024-01-15, 10:30 - Alice: Hello\n\
             [2024-01-16, 9:05:30 PM] Bob: Hi",
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].date,
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
        assert_eq!(messages[1].author.as_deref(), Some("Bob"));
        assert_eq!(
            messages[1].date,
            Utc.with_ymd_and_hms(2024, 1, 16, 21, 5, 30).unwrap()
        );
    }
}
