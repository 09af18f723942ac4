//! Protocol message value object and header tokenizer.

use std::{fmt, str::FromStr};

use super::error::DecodeError;

/// Sender names of this many characters or more are cut down on decode.
pub const SENDER_TRUNCATE_THRESHOLD: usize = 10;

/// Number of characters kept when a sender name is truncated.
pub const SENDER_KEPT_CHARS: usize = 9;

/// Separator between the header and the free-text content.
///
/// Matched literally: exactly one space on each side of the dash. Tabs or runs
/// of other whitespace around it are an `UnexpectedTrailer`.
const CONTENT_SEPARATOR: &str = " - ";

/// Protocol command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Client announces its nickname
    Login,
    /// Chat text broadcast
    Chat,
    /// Flower shower broadcast
    Flower,
    /// Server-originated notice
    System,
}

impl Command {
    /// Wire name of the command
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Login => "LOGIN",
            Command::Chat => "CHAT",
            Command::Flower => "FLOWER",
            Command::System => "SYSTEM",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGIN" => Ok(Command::Login),
            "CHAT" => Ok(Command::Chat),
            "FLOWER" => Ok(Command::Flower),
            "SYSTEM" => Ok(Command::System),
            other => Err(DecodeError::UnknownCommand(other.to_string())),
        }
    }
}

/// One protocol unit.
///
/// A plain value: it holds no reference to the connection it came from or is
/// going to, so the router builds a fresh copy for every recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub command: Command,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Registry size when the message was built (SYSTEM broadcasts only)
    pub online_count: Option<usize>,
    pub sender: String,
    pub content: Option<String>,
}

impl Message {
    /// `[LOGIN][time][nickname]`
    pub fn login(timestamp: i64, sender: impl Into<String>) -> Self {
        Self {
            command: Command::Login,
            timestamp,
            online_count: None,
            sender: sender.into(),
            content: None,
        }
    }

    /// `[CHAT][time][sender] - content`
    pub fn chat(timestamp: i64, sender: impl Into<String>, content: Option<String>) -> Self {
        Self {
            command: Command::Chat,
            timestamp,
            online_count: None,
            sender: sender.into(),
            content,
        }
    }

    /// `[FLOWER][time][sender]( - content)?`
    pub fn flower(timestamp: i64, sender: impl Into<String>, content: Option<String>) -> Self {
        Self {
            command: Command::Flower,
            timestamp,
            online_count: None,
            sender: sender.into(),
            content,
        }
    }

    /// SYSTEM broadcast carrying the online count.
    ///
    /// The count travels in the sender slot: `[SYSTEM][time][2] - Bob joined`.
    pub fn system(timestamp: i64, online_count: usize, content: impl Into<String>) -> Self {
        Self {
            command: Command::System,
            timestamp,
            online_count: Some(online_count),
            sender: online_count.to_string(),
            content: Some(content.into()),
        }
    }

    /// SYSTEM notice addressed with a textual sender label and no online count
    pub fn notice(timestamp: i64, sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            command: Command::System,
            timestamp,
            online_count: None,
            sender: sender.into(),
            content: Some(content.into()),
        }
    }

    /// Parse one text frame into a message.
    ///
    /// Accepts all four commands. Unlike [`crate::protocol::decode`] this reports
    /// why a frame was rejected instead of collapsing the failure to `None`.
    pub fn parse(text: &str) -> Result<Self, DecodeError> {
        if text.trim().is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut rest = text;
        let command = take_field(&mut rest)?;
        let time = take_field(&mut rest)?;
        let sender = take_field(&mut rest)?;
        let content = parse_trailer(rest)?;

        let command: Command = command.parse()?;
        let timestamp = time.parse::<i64>().unwrap_or(0);
        let sender = truncate_sender(sender);

        let message = match command {
            Command::Login => Message::login(timestamp, sender),
            Command::Chat => Message::chat(timestamp, sender, content),
            Command::Flower => Message::flower(timestamp, sender, content),
            Command::System => Message {
                command,
                timestamp,
                online_count: sender.parse::<usize>().ok(),
                sender,
                content,
            },
        };

        Ok(message)
    }

    /// Serialize to the wire form
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}][{}]", self.command, self.timestamp, self.sender)?;
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => write!(f, "{CONTENT_SEPARATOR}{content}"),
            _ => Ok(()),
        }
    }
}

/// Apply the sender length rule: 10 characters or more keep only the first 9.
pub fn truncate_sender(sender: &str) -> String {
    if sender.chars().count() >= SENDER_TRUNCATE_THRESHOLD {
        sender.chars().take(SENDER_KEPT_CHARS).collect()
    } else {
        sender.to_string()
    }
}

/// Consume one `[...]` field from the front of `rest`.
fn take_field<'a>(rest: &mut &'a str) -> Result<&'a str, DecodeError> {
    if rest.is_empty() {
        return Err(DecodeError::MissingField);
    }
    let inner = rest
        .strip_prefix('[')
        .ok_or(DecodeError::MissingOpeningBracket)?;
    let end = inner.find(']').ok_or(DecodeError::UnterminatedField)?;
    *rest = &inner[end + 1..];
    Ok(&inner[..end])
}

/// Everything after the header: nothing, or ` - ` followed by the content.
fn parse_trailer(rest: &str) -> Result<Option<String>, DecodeError> {
    if rest.is_empty() {
        return Ok(None);
    }
    match rest.strip_prefix(CONTENT_SEPARATOR) {
        Some("") => Ok(None),
        Some(content) => Ok(Some(content.to_string())),
        None => Err(DecodeError::UnexpectedTrailer(rest.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        // テスト項目: LOGIN メッセージが解析される
        // given (前提条件):
        let text = "[LOGIN][1700000000000][Alice]";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message, Message::login(1700000000000, "Alice"));
    }

    #[test]
    fn test_parse_login_ignores_content() {
        // テスト項目: LOGIN の本文は保持されない
        // given (前提条件):
        let text = "[LOGIN][1][Alice] - hi there";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.content, None);
    }

    #[test]
    fn test_parse_chat_with_content() {
        // テスト項目: CHAT の本文が区切り以降すべて取り込まれる
        // given (前提条件):
        let text = "[CHAT][12][Bob] - see [this] - and that";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.command, Command::Chat);
        assert_eq!(message.timestamp, 12);
        assert_eq!(message.sender, "Bob");
        assert_eq!(message.content.as_deref(), Some("see [this] - and that"));
    }

    #[test]
    fn test_parse_chat_with_empty_content() {
        // テスト項目: 空の本文は本文なしとして扱われる
        // given (前提条件):
        let text = "[CHAT][12][Bob] - ";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message.content, None);
    }

    #[test]
    fn test_parse_flower_keeps_content_for_display() {
        // テスト項目: サーバーから届いた FLOWER の本文は表示用に保持される
        // given (前提条件):
        let text = "[FLOWER][5][Bob] - Bob sent a shower of flowers";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            Message::flower(5, "Bob", Some("Bob sent a shower of flowers".to_string()))
        );
    }

    #[test]
    fn test_parse_system_recovers_online_count() {
        // テスト項目: SYSTEM の送信者欄が数値なら接続数として復元される
        // given (前提条件):
        let text = "[SYSTEM][7][3] - Bob joined";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message, Message::system(7, 3, "Bob joined"));
        assert_eq!(message.online_count, Some(3));
    }

    #[test]
    fn test_parse_system_notice_has_no_online_count() {
        // テスト項目: 送信者欄が文字列の SYSTEM は接続数を持たない
        // given (前提条件):
        let text = "[SYSTEM][7][you] - wait";

        // when (操作):
        let message = Message::parse(text).unwrap();

        // then (期待する結果):
        assert_eq!(message, Message::notice(7, "you", "wait"));
    }

    #[test]
    fn test_parse_invalid_time_is_zero() {
        // テスト項目: 数値でない・空の時刻は 0 として扱われる
        // given (前提条件):
        let non_numeric = "[CHAT][soon][Bob] - hi";
        let empty = "[CHAT][][Bob] - hi";

        // when (操作):
        let a = Message::parse(non_numeric).unwrap();
        let b = Message::parse(empty).unwrap();

        // then (期待する結果):
        assert_eq!(a.timestamp, 0);
        assert_eq!(b.timestamp, 0);
    }

    #[test]
    fn test_sender_truncation_boundary() {
        // テスト項目: 10 文字以上の送信者名は先頭 9 文字に切り詰められる
        // given (前提条件):
        let nine = "abcdefghi";
        let ten = "abcdefghij";
        let long = "abcdefghijklmnop";

        // when (操作):
        let a = Message::parse(&format!("[LOGIN][0][{nine}]")).unwrap();
        let b = Message::parse(&format!("[LOGIN][0][{ten}]")).unwrap();
        let c = Message::parse(&format!("[LOGIN][0][{long}]")).unwrap();

        // then (期待する結果):
        assert_eq!(a.sender, "abcdefghi");
        assert_eq!(b.sender, "abcdefghi");
        assert_eq!(c.sender, "abcdefghi");
    }

    #[test]
    fn test_sender_truncation_counts_characters() {
        // テスト項目: 切り詰めはバイトではなく文字単位で行われる
        // given (前提条件):
        let name = "さくらさくらさくらさくら";

        // when (操作):
        let truncated = truncate_sender(name);

        // then (期待する結果):
        assert_eq!(truncated.chars().count(), 9);
        assert_eq!(truncated, "さくらさくらさくら");
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 不正なヘッダーはそれぞれのエラーになる
        // given / when / then:
        assert_eq!(Message::parse("   "), Err(DecodeError::Empty));
        assert_eq!(
            Message::parse("hello"),
            Err(DecodeError::MissingOpeningBracket)
        );
        assert_eq!(
            Message::parse("[CHAT][1"),
            Err(DecodeError::UnterminatedField)
        );
        assert_eq!(Message::parse("[CHAT][1]"), Err(DecodeError::MissingField));
        assert_eq!(
            Message::parse("[CHAT][1][a]junk"),
            Err(DecodeError::UnexpectedTrailer("junk".to_string()))
        );
        assert_eq!(
            Message::parse("[PING][0][x]"),
            Err(DecodeError::UnknownCommand("PING".to_string()))
        );
    }

    #[test]
    fn test_separator_is_matched_literally() {
        // テスト項目: 区切りは「空白・ハイフン・空白」のみで、タブなどは受け付けない
        // given (前提条件):
        let tab = "[CHAT][0][Alice]\t-\thello";
        let double_space = "[CHAT][0][Alice]  - hello";

        // when / then:
        assert_eq!(
            Message::parse(tab),
            Err(DecodeError::UnexpectedTrailer("\t-\thello".to_string()))
        );
        assert_eq!(
            Message::parse(double_space),
            Err(DecodeError::UnexpectedTrailer("  - hello".to_string()))
        );
    }

    #[test]
    fn test_display_omits_empty_content() {
        // テスト項目: 本文が空または無い場合は区切りを出力しない
        // given (前提条件):
        let without = Message::chat(1, "you", None);
        let empty = Message::chat(1, "you", Some(String::new()));
        let with = Message::chat(1, "you", Some("hello".to_string()));

        // when / then:
        assert_eq!(without.to_wire(), "[CHAT][1][you]");
        assert_eq!(empty.to_wire(), "[CHAT][1][you]");
        assert_eq!(with.to_wire(), "[CHAT][1][you] - hello");
    }

    #[test]
    fn test_system_message_wire_form() {
        // テスト項目: SYSTEM ブロードキャストは送信者欄に接続数を載せる
        // given (前提条件):
        let message = Message::system(1700000000000, 2, "Bob joined");

        // when (操作):
        let wire = message.to_wire();

        // then (期待する結果):
        assert_eq!(wire, "[SYSTEM][1700000000000][2] - Bob joined");
    }
}
