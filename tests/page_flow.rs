//! End-to-end page flows against in-process fake collaborators.
//!
//! A fake REST backend serves a canned directory and a fake channel echoes
//! sent messages back, so every spec flow (load, navigate, send, live
//! append, failure notices) runs deterministically without a server.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use tripchat::client::formatter::EMPTY_PREVIEW;
use tripchat::client::{ChatPage, ViewMode};
use tripchat::common::time::FixedClock;
use tripchat::domain::{
    ApiError, ChannelConnector, ChannelError, ChannelEvent, ChannelStatus, ChannelTransport,
    ChatRoom, DirectoryApi, Message, MessageBody, OutboundMessage, Participant, RoomId, Timestamp,
    UserId,
};

// 2023-01-01T09:30:00Z
const SUNDAY_MORNING: i64 = 1672565400000;
// 2023-01-01T22:45:00Z
const SUNDAY_EVENING: i64 = 1672613100000;

fn user(id: &str) -> UserId {
    UserId::new(id.to_string()).unwrap()
}

fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

fn message(room: &str, sender: &str, body: &str, at: i64) -> Message {
    Message::new(
        user(sender),
        MessageBody::new(body.to_string()).unwrap(),
        Timestamp::new(at),
        room_id(room),
    )
}

fn room(id: &str, counterpart_name: &str, messages: Vec<Message>) -> ChatRoom {
    ChatRoom::new(
        room_id(id),
        vec![
            Participant::new(user("me"), "Me".to_string(), None),
            Participant::new(user("them"), counterpart_name.to_string(), None),
        ],
        messages,
    )
    .unwrap()
}

/// Fake REST collaborator serving a canned directory
struct FakeDirectoryApi {
    rooms: Mutex<Vec<ChatRoom>>,
    fail_list: AtomicBool,
    fail_detail: AtomicBool,
}

impl FakeDirectoryApi {
    fn new(rooms: Vec<ChatRoom>) -> Self {
        Self {
            rooms: Mutex::new(rooms),
            fail_list: AtomicBool::new(false),
            fail_detail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl DirectoryApi for FakeDirectoryApi {
    async fn list_rooms(&self) -> Result<Vec<ChatRoom>, ApiError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Status(502));
        }
        Ok(self.rooms.lock().unwrap().clone())
    }

    async fn room_detail(&self, id: &RoomId) -> Result<ChatRoom, ApiError> {
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        self.rooms
            .lock()
            .unwrap()
            .iter()
            .find(|room| &room.id == id)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn create_room(&self, counterpart_email: &str) -> Result<ChatRoom, ApiError> {
        let mut rooms = self.rooms.lock().unwrap();
        let created = room(
            &format!("r{}", rooms.len() + 1),
            counterpart_email,
            vec![],
        );
        rooms.push(created.clone());
        Ok(created)
    }
}

/// Fake channel transport that echoes sent messages back as inbound events
struct EchoTransport {
    room_id: RoomId,
    open: AtomicBool,
    close_requests: AtomicUsize,
    sent: Mutex<Vec<OutboundMessage>>,
    events_tx: mpsc::UnboundedSender<ChannelEvent>,
}

#[async_trait]
impl ChannelTransport for EchoTransport {
    fn status(&self) -> ChannelStatus {
        if self.open.load(Ordering::SeqCst) {
            ChannelStatus::Open
        } else {
            ChannelStatus::Closed
        }
    }

    async fn send(&self, outbound: OutboundMessage) -> Result<(), ChannelError> {
        let echoed = Message::new(
            user("me"),
            outbound.content.clone(),
            Timestamp::new(SUNDAY_EVENING),
            self.room_id.clone(),
        );
        self.sent.lock().unwrap().push(outbound);
        self.events_tx
            .send(ChannelEvent::MessageReceived(echoed))
            .ok();
        Ok(())
    }

    async fn close(&self) -> Result<(), ChannelError> {
        self.close_requests.fetch_add(1, Ordering::SeqCst);
        self.open.store(false, Ordering::SeqCst);
        Ok(())
    }
}

struct FakeConnector {
    transports: Mutex<Vec<Arc<EchoTransport>>>,
    connect_count: AtomicUsize,
}

impl FakeConnector {
    fn new() -> Self {
        Self {
            transports: Mutex::new(Vec::new()),
            connect_count: AtomicUsize::new(0),
        }
    }

    fn transport(&self, index: usize) -> Arc<EchoTransport> {
        self.transports.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl ChannelConnector for FakeConnector {
    async fn connect(
        &self,
        room_id: &RoomId,
    ) -> Result<
        (
            Arc<dyn ChannelTransport>,
            mpsc::UnboundedReceiver<ChannelEvent>,
        ),
        ChannelError,
    > {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(EchoTransport {
            room_id: room_id.clone(),
            open: AtomicBool::new(true),
            close_requests: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            events_tx,
        });
        self.transports.lock().unwrap().push(transport.clone());
        Ok((transport, events_rx))
    }
}

fn two_room_directory() -> Vec<ChatRoom> {
    vec![
        room(
            "r1",
            "Daniela",
            vec![message("r1", "them", "Hi", SUNDAY_MORNING)],
        ),
        room("r2", "Marco", vec![]),
    ]
}

fn page_with(
    api: Arc<FakeDirectoryApi>,
    connector: Arc<FakeConnector>,
) -> ChatPage {
    ChatPage::new(
        user("me"),
        api,
        connector,
        Arc::new(FixedClock::new(SUNDAY_EVENING)),
        ViewMode::Wide,
    )
}

#[tokio::test]
async fn test_directory_lists_previews_and_empty_state() {
    // given: two rooms, one with history and one without
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let mut page = page_with(api, Arc::new(FakeConnector::new()));

    // when:
    let output = page.refresh_directory().await;

    // then: the listing carries the last-message preview, the same-day
    // time stamp and the empty-state text
    let listing = output.blocks.join("");
    assert!(listing.contains("Daniela"));
    assert!(listing.contains("Hi"));
    assert!(listing.contains("09:30"));
    assert!(listing.contains("Marco"));
    assert!(listing.contains(EMPTY_PREVIEW));
}

#[tokio::test]
async fn test_opening_a_room_renders_history_and_binds_channel() {
    // given:
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;

    // when:
    let output = page.open_room("r1").await;

    // then: the thread is rendered and a live channel is open for r1
    let thread = output.blocks.join("");
    assert!(thread.contains("Chat with Daniela"));
    assert!(thread.contains("Hi"));
    assert!(thread.contains("January 1, 2023"));
    assert!(output.events.is_some());
    assert_eq!(page.channel_status(), ChannelStatus::Open);
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_navigating_between_rooms_closes_previous_channel_once() {
    // given: r1 is open with a live channel
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;
    page.open_room("r1").await;

    // when:
    let output = page.open_room("r2").await;

    // then: exactly one close for r1 and a fresh channel for r2
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 2);
    assert_eq!(
        connector.transport(0).close_requests.load(Ordering::SeqCst),
        1
    );
    assert_eq!(connector.transport(1).status(), ChannelStatus::Open);
    assert!(output.events.is_some());
    assert!(output.blocks.join("").contains("Chat with Marco"));
}

#[tokio::test]
async fn test_sending_appends_via_echo_without_disturbing_history() {
    // given: r1 open, one message in history
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;
    let mut events = page.open_room("r1").await.events.unwrap();

    // when: the user submits a draft and the echo comes back
    page.submit_draft("Hello there").await;
    let event = events.recv().await.unwrap();
    let output = page.handle_event(event).await;

    // then: the transport saw one payload for r1, the echoed message was
    // appended after the existing history and the composer is clear
    let sent = connector.transport(0).sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].room_id, room_id("r1"));
    assert_eq!(sent[0].content.as_str(), "Hello there");

    let bodies: Vec<&str> = page
        .state()
        .active_room()
        .unwrap()
        .messages()
        .iter()
        .map(|m| m.body.as_str())
        .collect();
    assert_eq!(bodies, vec!["Hi", "Hello there"]);
    assert!(output.blocks.join("").contains("Hello there"));
    assert_eq!(page.composer().draft(), "");
}

#[tokio::test]
async fn test_live_append_does_not_repeat_day_separator() {
    // given: r1 open with a message earlier the same day
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector);
    page.refresh_directory().await;
    page.open_room("r1").await;

    // when: a same-day message arrives
    let output = page
        .handle_event(ChannelEvent::MessageReceived(message(
            "r1",
            "them",
            "Still there?",
            SUNDAY_EVENING,
        )))
        .await;

    // then: the appended block has no day separator
    let block = output.blocks.join("");
    assert!(block.contains("Still there?"));
    assert!(!block.contains("January 1, 2023"));
}

#[tokio::test]
async fn test_whitespace_draft_is_not_sent() {
    // given: r1 open
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;
    page.open_room("r1").await;

    // when:
    let output = page.submit_draft("   \t ").await;

    // then: nothing left the client
    assert!(connector.transport(0).sent.lock().unwrap().is_empty());
    assert!(output.blocks.is_empty());
}

#[tokio::test]
async fn test_submit_without_open_channel_keeps_draft() {
    // given: directory loaded but no room open
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let mut page = page_with(api, Arc::new(FakeConnector::new()));
    page.refresh_directory().await;

    // when:
    let output = page.submit_draft("Hello").await;

    // then: refused with a notice, draft intact for a retry
    assert!(output.blocks.join("").contains("Not connected"));
    assert_eq!(page.composer().draft(), "Hello");
}

#[tokio::test]
async fn test_directory_failure_surfaces_notice() {
    // given: a backend that refuses the listing
    let api = Arc::new(FakeDirectoryApi::new(vec![]));
    api.fail_list.store(true, Ordering::SeqCst);
    let mut page = page_with(api, Arc::new(FakeConnector::new()));

    // when:
    let output = page.refresh_directory().await;

    // then:
    assert!(
        output
            .blocks
            .join("")
            .contains("Could not load your conversations")
    );
}

#[tokio::test]
async fn test_room_detail_failure_surfaces_notice_and_leaves_no_channel() {
    // given:
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api.clone(), connector.clone());
    page.refresh_directory().await;
    api.fail_detail.store(true, Ordering::SeqCst);

    // when:
    let output = page.open_room("r1").await;

    // then: no channel was opened for the failed resolution
    assert!(
        output
            .blocks
            .join("")
            .contains("Could not load that conversation")
    );
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 0);
    assert_eq!(page.channel_status(), ChannelStatus::Closed);
}

#[tokio::test]
async fn test_open_for_unknown_room_is_refused() {
    // given:
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;

    // when:
    let output = page.open_room("r9").await;

    // then:
    assert!(output.blocks.join("").contains("No conversation 'r9'"));
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_open_before_directory_load_is_deferred() {
    // given: the user asks for r1 before any directory fetch has finished
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());

    // when:
    let deferred = page.open_room("r1").await;
    let output = page.refresh_directory().await;

    // then: the deferred navigation completes once the directory lands
    assert!(deferred.blocks.join("").contains("Still loading"));
    assert!(output.blocks.join("").contains("Chat with Daniela"));
    assert!(output.events.is_some());
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_peer_close_surfaces_notice_without_reconnect() {
    // given: r1 open
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;
    page.open_room("r1").await;

    // when: the channel drops
    let output = page.handle_event(ChannelEvent::Closed).await;

    // then: the user is told and no automatic reconnect happens
    assert!(output.blocks.join("").contains("Live connection lost"));
    assert_eq!(page.channel_status(), ChannelStatus::Closed);
    assert_eq!(connector.connect_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_creating_a_room_refreshes_the_directory() {
    // given:
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let mut page = page_with(api, Arc::new(FakeConnector::new()));
    page.refresh_directory().await;

    // when:
    let output = page.create_room("nadia@example.com").await;

    // then: confirmation plus a listing that includes the new room
    let text = output.blocks.join("");
    assert!(text.contains("nadia@example.com"));
    assert!(text.contains("[r3]"));
    assert_eq!(page.state().directory().rooms().unwrap().len(), 3);
}

#[tokio::test]
async fn test_closing_a_room_returns_to_directory_and_tears_down() {
    // given: r1 open with a live channel
    let api = Arc::new(FakeDirectoryApi::new(two_room_directory()));
    let connector = Arc::new(FakeConnector::new());
    let mut page = page_with(api, connector.clone());
    page.refresh_directory().await;
    page.open_room("r1").await;

    // when:
    let output = page.close_room().await;

    // then:
    assert!(output.blocks.join("").contains("Conversations:"));
    assert!(page.state().active_room().is_none());
    assert_eq!(
        connector.transport(0).close_requests.load(Ordering::SeqCst),
        1
    );
    assert_eq!(page.channel_status(), ChannelStatus::Closed);
}
