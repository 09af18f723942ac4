//! Turning typed lines into outgoing frames.

use hanami_shared::protocol::Message;

const FLOWER_COMMAND: &str = "/flower";
const QUIT_COMMAND: &str = "/quit";

/// What to do with one line of user input
#[derive(Debug, PartialEq, Eq)]
pub enum InputAction {
    Send(Message),
    Quit,
    Skip,
}

/// Map a typed line to an action.
///
/// `/flower` and `/quit` are commands; any other non-blank line is chat.
pub fn parse_input(line: &str, nickname: &str, now_millis: i64) -> InputAction {
    let line = line.trim();
    match line {
        "" => InputAction::Skip,
        FLOWER_COMMAND => InputAction::Send(Message::flower(now_millis, nickname, None)),
        QUIT_COMMAND => InputAction::Quit,
        text => InputAction::Send(Message::chat(now_millis, nickname, Some(text.to_string()))),
    }
}
