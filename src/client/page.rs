//! Chat page orchestration.
//!
//! The page wires the state container, the composer, the channel manager and
//! the REST usecases together. Every user command and channel event funnels
//! through here; the session loop only shuttles strings in and printed blocks
//! out.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::composer::Composer;
use crate::client::formatter::{MessageFormatter, Notice, ViewMode};
use crate::client::manager::ChannelManager;
use crate::common::time::Clock;
use crate::domain::{
    ChannelConnector, ChannelEvent, ChannelStatus, DirectoryApi, Message, MessageBody, RoomId,
    UserId,
};
use crate::state::{Action, ChatState, Directory};
use crate::usecase::{LoadDirectoryUseCase, ResolveRoomUseCase, StartRoomUseCase};

/// What one page interaction produced: text blocks to print and, when a new
/// channel was opened, the stream of its inbound events.
pub struct PageOutput {
    pub blocks: Vec<String>,
    pub events: Option<mpsc::UnboundedReceiver<ChannelEvent>>,
}

impl PageOutput {
    fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            events: None,
        }
    }

    fn text(block: String) -> Self {
        Self {
            blocks: vec![block],
            events: None,
        }
    }

    fn notice(notice: Notice) -> Self {
        Self::text(MessageFormatter::format_notice(&notice))
    }

    fn merge(mut self, other: PageOutput) -> Self {
        self.blocks.extend(other.blocks);
        if other.events.is_some() {
            self.events = other.events;
        }
        self
    }
}

/// The chat page: state, composer and channel manager behind the commands
/// the session loop dispatches.
pub struct ChatPage {
    state: ChatState,
    composer: Composer,
    manager: ChannelManager,
    load_directory: LoadDirectoryUseCase,
    resolve_room: ResolveRoomUseCase,
    start_room: StartRoomUseCase,
    clock: Arc<dyn Clock>,
    mode: ViewMode,
    /// Room the user asked for before the directory finished loading
    pending_open: Option<String>,
}

impl ChatPage {
    pub fn new(
        me: UserId,
        api: Arc<dyn DirectoryApi>,
        connector: Arc<dyn ChannelConnector>,
        clock: Arc<dyn Clock>,
        mode: ViewMode,
    ) -> Self {
        Self {
            state: ChatState::new(me),
            composer: Composer::new(),
            manager: ChannelManager::new(connector),
            load_directory: LoadDirectoryUseCase::new(api.clone()),
            resolve_room: ResolveRoomUseCase::new(api.clone()),
            start_room: StartRoomUseCase::new(api),
            clock,
            mode,
            pending_open: None,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn channel_status(&self) -> ChannelStatus {
        self.manager.status()
    }

    /// Fetch the room directory. Once it lands, a deferred `/open` request
    /// is completed.
    pub async fn refresh_directory(&mut self) -> PageOutput {
        self.state.apply(Action::DirectoryRequested);

        match self.load_directory.execute().await {
            Ok(rooms) => {
                self.state.apply(Action::DirectoryFulfilled(rooms));
                let mut output = PageOutput::text(self.render_directory());
                if let Some(raw_id) = self.pending_open.take() {
                    output = output.merge(self.open_room(&raw_id).await);
                }
                output
            }
            Err(e) => {
                tracing::warn!("Directory load failed: {}", e);
                self.state.apply(Action::DirectoryRejected);
                PageOutput::notice(Notice::DirectoryLoadFailed)
            }
        }
    }

    /// Navigate into a room: resolve its history, then bind the live
    /// channel. The channel is opened only after the history has been
    /// applied, so a live append can never be overwritten by the fetch.
    pub async fn open_room(&mut self, raw_id: &str) -> PageOutput {
        if !self.state.directory().is_fulfilled() {
            self.pending_open = Some(raw_id.to_string());
            return PageOutput::notice(Notice::DirectoryStillLoading);
        }

        let room_id = match RoomId::new(raw_id.to_string()) {
            Ok(id) => id,
            Err(_) => return PageOutput::notice(Notice::RoomNotFound(raw_id.to_string())),
        };

        let known = self
            .state
            .directory()
            .rooms()
            .map(|rooms| rooms.iter().any(|room| room.id == room_id))
            .unwrap_or(false);
        if !known {
            return PageOutput::notice(Notice::RoomNotFound(raw_id.to_string()));
        }

        self.state.apply(Action::RoomSelected(room_id.clone()));
        let generation = self.state.generation();

        match self.resolve_room.execute(&room_id, generation).await {
            Ok((generation, room)) => {
                self.state
                    .apply(Action::RoomDetailFulfilled { generation, room });
            }
            Err(e) => {
                tracing::warn!("Room '{}' load failed: {}", room_id.as_str(), e);
                self.state.apply(Action::RoomDetailRejected { generation });
                return PageOutput::notice(Notice::RoomLoadFailed);
            }
        }

        // The user may have navigated again while the fetch was in flight
        let Some(active) = self.state.active_room() else {
            return PageOutput::empty();
        };
        let thread = MessageFormatter::format_thread(active, &self.state.me, self.mode);

        match self.manager.switch_to(room_id).await {
            Ok(events) => PageOutput {
                blocks: vec![thread],
                events: Some(events),
            },
            Err(e) => {
                tracing::warn!("Channel connect failed: {}", e);
                PageOutput::text(thread).merge(PageOutput::notice(Notice::ChannelConnectFailed))
            }
        }
    }

    /// Submit one message over the live channel.
    ///
    /// The draft survives a refused submit; the echoed message arrives back
    /// through the channel and is appended by [`ChatPage::handle_event`].
    pub async fn submit_draft(&mut self, text: &str) -> PageOutput {
        self.composer.set_draft(text);

        if self.manager.status() != ChannelStatus::Open {
            return PageOutput::notice(Notice::ChannelNotOpen);
        }

        let Some(content) = self.composer.begin_submit() else {
            return PageOutput::empty();
        };

        let body = match MessageBody::new(content.clone()) {
            Ok(body) => body,
            Err(_) => {
                self.composer.finish_submit();
                return PageOutput::empty();
            }
        };

        let result = self.manager.send(body).await;
        self.composer.finish_submit();

        match result {
            Ok(()) => PageOutput::empty(),
            Err(e) => {
                tracing::warn!("Send failed: {}", e);
                self.composer.set_draft(&content);
                PageOutput::notice(Notice::ChannelNotOpen)
            }
        }
    }

    /// React to one inbound channel event
    pub async fn handle_event(&mut self, event: ChannelEvent) -> PageOutput {
        match event {
            ChannelEvent::MessageReceived(message) => self.handle_arrival(message),
            ChannelEvent::Closed => {
                tracing::info!("Channel closed by peer");
                self.manager.teardown().await;
                PageOutput::notice(Notice::ChannelClosed)
            }
        }
    }

    fn handle_arrival(&mut self, message: Message) -> PageOutput {
        let relevant = self
            .state
            .active_room()
            .map(|room| room.id == message.room_id)
            .unwrap_or(false);
        if !relevant {
            tracing::debug!("Dropping event for non-active room '{}'", message.room_id.as_str());
            self.state.apply(Action::MessageArrived(message));
            return PageOutput::empty();
        }

        let previous = self
            .state
            .active_room()
            .and_then(|room| room.preview())
            .cloned();
        let block = MessageFormatter::format_appended(
            previous.as_ref(),
            &message,
            &self.state.me,
            self.mode,
        );
        self.state.apply(Action::MessageArrived(message));
        PageOutput::text(block)
    }

    /// Start a conversation with a counterpart, then refetch the directory
    /// so the new room shows up in the list.
    pub async fn create_room(&mut self, counterpart_email: &str) -> PageOutput {
        match self.start_room.execute(counterpart_email).await {
            Ok(room) => {
                let name = room.counterpart(&self.state.me).display_name.clone();
                PageOutput::notice(Notice::RoomCreated(name)).merge(self.refresh_directory().await)
            }
            Err(e) => {
                tracing::warn!("Room creation failed: {}", e);
                PageOutput::notice(Notice::RoomCreateFailed)
            }
        }
    }

    /// Leave the active room: clear the selection and tear the channel down
    pub async fn close_room(&mut self) -> PageOutput {
        self.state.apply(Action::SelectionCleared);
        self.manager.teardown().await;

        if self.state.directory().is_fulfilled() {
            PageOutput::text(self.render_directory())
        } else {
            PageOutput::text(MessageFormatter::format_empty_pane())
        }
    }

    /// Re-render the current view
    pub fn render(&self) -> PageOutput {
        if let Some(active) = self.state.active_room() {
            return PageOutput::text(MessageFormatter::format_thread(
                active,
                &self.state.me,
                self.mode,
            ));
        }
        match self.state.directory() {
            Directory::Fulfilled(_) => PageOutput::text(self.render_directory()),
            Directory::Loading => PageOutput::text("Loading conversations…\n".to_string()),
            Directory::Rejected => PageOutput::notice(Notice::DirectoryLoadFailed),
        }
    }

    fn render_directory(&self) -> String {
        let rooms = self.state.directory().rooms().unwrap_or(&[]);
        MessageFormatter::format_directory(
            rooms,
            &self.state.me,
            self.clock.now_utc_millis(),
            self.mode,
        )
    }
}
