//! Application-state container for the chat page.
//!
//! All page state lives in [`ChatState`] and is mutated exclusively through
//! [`Action`]s applied by [`ChatState::apply`]. Transitions are pure (no I/O,
//! no clocks) so every flow in the spec can be exercised deterministically.
//!
//! Room selection carries a monotonically increasing generation. Asynchronous
//! results are tagged with the generation they were requested under and are
//! dropped when a newer selection has superseded them, so a slow room-detail
//! response can never overwrite the state of a different selection.

use crate::domain::{ChatRoom, Message, RoomId, UserId};

/// Loading state of the room directory, replaced wholesale on refetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directory {
    Loading,
    Fulfilled(Vec<ChatRoom>),
    Rejected,
}

impl Directory {
    /// The loaded rooms, if the directory has been fulfilled
    pub fn rooms(&self) -> Option<&[ChatRoom]> {
        match self {
            Directory::Fulfilled(rooms) => Some(rooms),
            _ => None,
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Directory::Fulfilled(_))
    }
}

/// The current room selection and its generation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    generation: u64,
    room_id: Option<RoomId>,
}

/// State transitions of the chat page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A directory fetch has started
    DirectoryRequested,
    /// The directory fetch succeeded; replaces the stored list wholesale
    DirectoryFulfilled(Vec<ChatRoom>),
    /// The directory fetch failed; the list stays non-fulfilled
    DirectoryRejected,
    /// The user navigated to a room; supersedes any in-flight resolution
    RoomSelected(RoomId),
    /// The user navigated away from all rooms (directory / empty state)
    SelectionCleared,
    /// A room-detail fetch completed for the given selection generation
    RoomDetailFulfilled { generation: u64, room: ChatRoom },
    /// A room-detail fetch failed for the given selection generation
    RoomDetailRejected { generation: u64 },
    /// A live `chat_message` event arrived
    MessageArrived(Message),
}

/// All state owned by the chat page
#[derive(Debug, Clone)]
pub struct ChatState {
    /// Identity used to distinguish "me" vs "counterpart"
    pub me: UserId,
    directory: Directory,
    selection: Selection,
    active: Option<ChatRoom>,
}

impl ChatState {
    pub fn new(me: UserId) -> Self {
        Self {
            me,
            directory: Directory::Loading,
            selection: Selection {
                generation: 0,
                room_id: None,
            },
            active: None,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Generation of the current selection; bumped on every navigation
    pub fn generation(&self) -> u64 {
        self.selection.generation
    }

    pub fn selected_room_id(&self) -> Option<&RoomId> {
        self.selection.room_id.as_ref()
    }

    /// The resolved active room, once its detail has been applied
    pub fn active_room(&self) -> Option<&ChatRoom> {
        self.active.as_ref()
    }

    /// Apply one state transition
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::DirectoryRequested => {
                self.directory = Directory::Loading;
            }
            Action::DirectoryFulfilled(rooms) => {
                self.directory = Directory::Fulfilled(rooms);
            }
            Action::DirectoryRejected => {
                self.directory = Directory::Rejected;
            }
            Action::RoomSelected(room_id) => {
                self.selection.generation += 1;
                self.selection.room_id = Some(room_id);
                self.active = None;
            }
            Action::SelectionCleared => {
                self.selection.generation += 1;
                self.selection.room_id = None;
                self.active = None;
            }
            Action::RoomDetailFulfilled { generation, room } => {
                // Drop responses belonging to a superseded selection
                if generation != self.selection.generation {
                    return;
                }
                if self.selection.room_id.as_ref() != Some(&room.id) {
                    return;
                }
                self.active = Some(room);
            }
            Action::RoomDetailRejected { generation } => {
                // The active room stays unset; nothing to roll back
                let _ = generation;
            }
            Action::MessageArrived(message) => {
                // Append-only, and only to the room currently on screen
                if let Some(active) = &mut self.active
                    && active.id == message.room_id
                {
                    active.push_message(message);
                }
            }
        }
    }
}
