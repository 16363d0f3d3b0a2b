//! Rendering of directory, thread and notice output.
//!
//! The formatter is a pure consumer of domain state: it never mutates
//! anything and carries no I/O. Wide and Compact are two renderings over the
//! same state, not two state machines.

use std::fmt;

use crate::common::time::{
    format_day_heading, format_message_time, format_preview_timestamp, same_calendar_day,
};
use crate::domain::{ChatRoom, Message, UserId};

/// Preview text for a room without messages
pub const EMPTY_PREVIEW: &str = "No messages yet";

/// Right margin for own messages in the wide thread view
const WIDE_THREAD_WIDTH: usize = 72;

const WIDE_PREVIEW_LIMIT: usize = 40;
const COMPACT_PREVIEW_LIMIT: usize = 24;

/// Terminal analog of the desktop/mobile responsive variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Wide,
    Compact,
}

/// Transient user-facing notifications (spec error taxonomy plus
/// informational confirmations)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DirectoryLoadFailed,
    RoomLoadFailed,
    RoomCreateFailed,
    ChannelConnectFailed,
    ChannelClosed,
    RoomNotFound(String),
    ChannelNotOpen,
    DirectoryStillLoading,
    RoomCreated(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::DirectoryLoadFailed => {
                write!(f, "Could not load your conversations. Try /rooms again.")
            }
            Notice::RoomLoadFailed => write!(f, "Could not load that conversation."),
            Notice::RoomCreateFailed => write!(f, "Could not start the conversation."),
            Notice::ChannelConnectFailed => {
                write!(f, "Live connection failed; messages will not update.")
            }
            Notice::ChannelClosed => {
                write!(f, "Live connection lost. Re-open the room to reconnect.")
            }
            Notice::RoomNotFound(id) => write!(f, "No conversation '{}' in your list.", id),
            Notice::ChannelNotOpen => write!(f, "Not connected to a room; open one first."),
            Notice::DirectoryStillLoading => {
                write!(f, "Still loading conversations; will open the room once ready.")
            }
            Notice::RoomCreated(name) => write!(f, "Conversation with {} started.", name),
        }
    }
}

/// Terminal stand-in for the counterpart's avatar: their initial in parens
fn avatar_marker(display_name: &str) -> String {
    let initial = display_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("({})", initial)
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Pure string builders for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render the room list. Each line carries the room identifier, the
    /// counterpart's display name, the last-message preview (or the
    /// empty-state string) and a timestamp: time of day for messages from
    /// today, a short date otherwise.
    pub fn format_directory(
        rooms: &[ChatRoom],
        me: &UserId,
        now_millis: i64,
        mode: ViewMode,
    ) -> String {
        let mut output = String::new();
        output.push_str("Conversations:\n");

        if rooms.is_empty() {
            output.push_str("  (No conversations yet — start one with /new <email>)\n");
            return output;
        }

        let limit = match mode {
            ViewMode::Wide => WIDE_PREVIEW_LIMIT,
            ViewMode::Compact => COMPACT_PREVIEW_LIMIT,
        };

        for room in rooms {
            let counterpart = room.counterpart(me);
            let marker = avatar_marker(&counterpart.display_name);
            let (preview, stamp) = match room.preview() {
                Some(message) => (
                    truncate(message.body.as_str(), limit),
                    format_preview_timestamp(message.sent_at.value(), now_millis),
                ),
                None => (EMPTY_PREVIEW.to_string(), String::new()),
            };

            match mode {
                ViewMode::Wide => {
                    output.push_str(&format!(
                        "  [{}] {} {:<18} {:<42} {}\n",
                        room.id.as_str(),
                        marker,
                        counterpart.display_name,
                        preview,
                        stamp
                    ));
                }
                ViewMode::Compact => {
                    output.push_str(&format!(
                        "  [{}] {} {}: {} {}\n",
                        room.id.as_str(),
                        marker,
                        counterpart.display_name,
                        preview,
                        stamp
                    ));
                }
            }
        }

        output
    }

    /// Render a full message thread with calendar-day separators
    pub fn format_thread(room: &ChatRoom, me: &UserId, mode: ViewMode) -> String {
        let counterpart = room.counterpart(me);
        let mut output = String::new();
        output.push_str(&format!("=== Chat with {} ===\n", counterpart.display_name));

        if room.messages().is_empty() {
            output.push_str("  (No messages)\n");
            return output;
        }

        let mut previous: Option<&Message> = None;
        for message in room.messages() {
            output.push_str(&Self::format_appended(previous, message, me, mode));
            previous = Some(message);
        }

        output
    }

    /// Render one message as appended to the thread: a day separator iff it
    /// is the first message or its calendar day differs from the previous
    /// message's, then the aligned bubble.
    pub fn format_appended(
        previous: Option<&Message>,
        message: &Message,
        me: &UserId,
        mode: ViewMode,
    ) -> String {
        let needs_separator = match previous {
            None => true,
            Some(prev) => !same_calendar_day(prev.sent_at.value(), message.sent_at.value()),
        };

        let mut output = String::new();
        if needs_separator {
            output.push_str(&Self::format_day_separator(message.sent_at.value()));
        }
        output.push_str(&Self::format_bubble(message, me, mode));
        output
    }

    /// Render a calendar-day separator line
    pub fn format_day_separator(timestamp_millis: i64) -> String {
        format!("---- {} ----\n", format_day_heading(timestamp_millis))
    }

    /// Render one message bubble. Own messages sit on the right in the wide
    /// view and carry a `me>` marker in the compact view.
    pub fn format_bubble(message: &Message, me: &UserId, mode: ViewMode) -> String {
        let time = format_message_time(message.sent_at.value());
        let mine = message.is_from(me);

        match (mode, mine) {
            (ViewMode::Wide, true) => {
                let bubble = format!("{} [{}]", message.body.as_str(), time);
                format!("{:>width$}\n", bubble, width = WIDE_THREAD_WIDTH)
            }
            (ViewMode::Wide, false) => {
                format!("{} [{}]\n", message.body.as_str(), time)
            }
            (ViewMode::Compact, true) => {
                format!("me> {} [{}]\n", message.body.as_str(), time)
            }
            (ViewMode::Compact, false) => {
                format!("{}> {} [{}]\n", message.sender.as_str(), message.body.as_str(), time)
            }
        }
    }

    /// Render the wide-view placeholder shown while no room is selected
    pub fn format_empty_pane() -> String {
        "Select a conversation to start chatting.\n".to_string()
    }

    /// Render a transient notice
    pub fn format_notice(notice: &Notice) -> String {
        format!("! {}\n", notice)
    }
}
